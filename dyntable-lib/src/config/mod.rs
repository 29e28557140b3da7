//! Table and column configuration.

mod column;
mod table;

pub use column::*;
pub use table::*;

/// Width of the preamble grid.
pub const GRID_COLUMNS: u8 = 12;
