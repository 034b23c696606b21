pub mod event_handlers;
pub mod ops_handlers;
pub mod outcome_handlers;
pub mod response_handlers;

pub use event_handlers::*;
pub use ops_handlers::*;
pub use outcome_handlers::*;
pub use response_handlers::*;
