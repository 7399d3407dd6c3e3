//! Line oriented readers for per-tile text files.
//!
//! - [`TextRowReader`] tokenizes one file, gzip aware.
//! - [`PasteReader`] reads the three files of a tile in lockstep.

mod paste_reader;
pub use paste_reader::*;

mod row_reader;
pub use row_reader::*;
