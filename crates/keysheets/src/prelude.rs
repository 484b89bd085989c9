//! Prelude module - common imports for keysheets users
//!
//! ```rust
//! use keysheets::prelude::*;
//! ```

pub use crate::{
    // Cell types
    CellAddress,
    CellRef,
    CellType,
    CellValue,

    // Error types
    Error,
    Result,

    // Main types
    Session,
    SessionConfig,
};
