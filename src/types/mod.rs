//! Grid model: cells, styles, merges and sizing, as handed over by a grid source.

mod cell;
mod grid;
mod style;

pub use cell::*;
pub use grid::*;
pub use style::*;
