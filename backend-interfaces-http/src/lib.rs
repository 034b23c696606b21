// HTTP Interface Layer

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::*;
pub use middleware::*;
pub use routes::*;
