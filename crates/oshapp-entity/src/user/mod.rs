//! User and employee directory entities.

pub mod employee;
pub mod model;
pub mod role;

pub use employee::Employee;
pub use model::User;
pub use role::Role;
