// Domain value objects
pub mod identifiers;
pub mod member_role;

pub use identifiers::*;
pub use member_role::*;
