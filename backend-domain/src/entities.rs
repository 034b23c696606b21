// Domain entities

pub mod config;
pub mod event;
pub mod member;
pub mod outcome;
pub mod repeat;
pub mod response;

pub use config::*;
pub use event::*;
pub use member::*;
pub use outcome::*;
pub use repeat::*;
pub use response::*;
