//! Building blocks shared by the flowcell crates.
//!
//! - [`types`]: tile kinds, cycle windows, pasted row groups and aligned reads,
//! - [`io`]: the whitespace row tokenizer and the three-file paste reader,
//! - [`macros`]: assertion helpers for tests.

pub mod io;
pub mod macros;
pub mod types;

pub use io::*;
pub use types::*;
