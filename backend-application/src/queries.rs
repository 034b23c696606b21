// Application queries (read side)

pub mod event_queries;
pub mod outcome_queries;
pub mod response_queries;
