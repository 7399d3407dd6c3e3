pub mod dump;
pub mod probe;
