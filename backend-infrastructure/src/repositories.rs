// Store adapters

pub mod json_store;
pub mod roster_file;

pub use json_store::*;
pub use roster_file::*;
