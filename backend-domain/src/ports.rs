// Port traits the domain expects infrastructure to implement:
// persistence gateways and the outbound notifier.

pub mod repositories;
pub mod services;

pub use repositories::*;
pub use services::*;
