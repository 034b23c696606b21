// Domain services

pub mod recurrence;

pub use recurrence::*;
