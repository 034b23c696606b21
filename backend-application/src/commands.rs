// Application commands (write side)

pub mod event_commands;
pub mod outcome_commands;
pub mod response_commands;
