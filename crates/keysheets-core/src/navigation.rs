//! Ctrl+Arrow navigation over one row or column
//!
//! A spreadsheet's "end" jump moves along a line of cells:
//! - from an occupied cell whose neighbour is occupied, to the last occupied
//!   cell of that contiguous run
//! - otherwise, to the next occupied cell in that direction, or to the edge
//!   of the sheet when there is none

/// Direction of an end jump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Whether the jump moves towards higher row/column numbers
    pub fn is_forward(&self) -> bool {
        matches!(self, Direction::Down | Direction::Right)
    }

    /// Whether the jump moves along a column (changing the row)
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// Position reached by an end jump along one line.
///
/// `occupied` holds the 1-based positions of occupied cells on the line,
/// sorted ascending without duplicates. `last` is the final position on the
/// line (the sheet's last row or column). Positions run `1..=last`.
pub fn end_of_run(occupied: &[u32], from: u32, direction: Direction, last: u32) -> u32 {
    let is_occupied = |pos: u32| occupied.binary_search(&pos).is_ok();

    if direction.is_forward() {
        if from >= last {
            return last;
        }
        if is_occupied(from) && is_occupied(from + 1) {
            let mut pos = from + 1;
            while pos < last && is_occupied(pos + 1) {
                pos += 1;
            }
            return pos;
        }
        let idx = occupied.partition_point(|&p| p <= from);
        occupied.get(idx).copied().filter(|&p| p <= last).unwrap_or(last)
    } else {
        if from <= 1 {
            return 1;
        }
        if is_occupied(from) && is_occupied(from - 1) {
            let mut pos = from - 1;
            while pos > 1 && is_occupied(pos - 1) {
                pos -= 1;
            }
            return pos;
        }
        let idx = occupied.partition_point(|&p| p < from);
        if idx == 0 {
            1
        } else {
            occupied[idx - 1]
        }
    }
}
