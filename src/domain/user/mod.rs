pub mod entity;
pub mod invariants;

pub use entity::{Session, User, UserRole};
pub use invariants::{validate_credentials, validate_login};
