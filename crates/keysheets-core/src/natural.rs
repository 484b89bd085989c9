//! Natural ordering for cell labels
//!
//! Digit runs compare by numeric value and everything else compares as text,
//! so `A2` sorts before `A10`.

use std::cmp::Ordering;

/// Compare two strings in natural order
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks::new(a);
    let mut right = Chunks::new(b);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x, y) {
                    (Chunk::Digits(x), Chunk::Digits(y)) => cmp_digits(x, y),
                    (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
                    (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
                    (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

/// Sort `(label, value)` pairs by the natural order of their labels
pub fn sort_by_address<T>(pairs: &mut [(String, T)]) {
    pairs.sort_by(|(a, _), (b, _)| natural_cmp(a, b));
}

/// Numeric comparison of two ASCII digit runs of any length
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, Copy)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len());

        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if digits {
            Chunk::Digits(chunk)
        } else {
            Chunk::Text(chunk)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_natural_cmp() {
        assert_eq!(natural_cmp("A2", "A10"), Ordering::Less);
        assert_eq!(natural_cmp("A10", "A2"), Ordering::Greater);
        assert_eq!(natural_cmp("A1", "B1"), Ordering::Less);
        assert_eq!(natural_cmp("A10", "B1"), Ordering::Less);
        assert_eq!(natural_cmp("A1", "A1"), Ordering::Equal);
        assert_eq!(natural_cmp("A01", "A1"), Ordering::Less);
    }

    #[test]
    fn test_sort_labels() {
        let mut pairs = vec![
            ("A2".to_string(), 2),
            ("A10".to_string(), 10),
            ("A1".to_string(), 1),
        ];
        sort_by_address(&mut pairs);

        let labels: Vec<&str> = pairs.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["A1", "A2", "A10"]);
    }

    #[test]
    fn test_sort_row_labels() {
        let mut pairs: Vec<(String, ())> = ["C1", "A1", "B1"]
            .iter()
            .map(|s| (s.to_string(), ()))
            .collect();
        sort_by_address(&mut pairs);

        let labels: Vec<&str> = pairs.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["A1", "B1", "C1"]);
    }

    #[test]
    fn test_large_digit_runs() {
        assert_eq!(
            natural_cmp("A99999999999999999999", "A100000000000000000000"),
            Ordering::Less
        );
    }
}
