pub mod notify_service;

pub use notify_service::*;
