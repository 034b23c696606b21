// Request middleware helpers

pub mod auth;

pub use auth::*;
