//! Contains tile kinds, cycle windows, row groups and aligned reads.

mod aligned_read;
pub use aligned_read::*;

mod cycle_window;
pub use cycle_window::*;

mod row_group;
pub use row_group::*;

mod tile_kind;
pub use tile_kind::*;
