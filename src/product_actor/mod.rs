//! Product-specific domain logic: the entity binding, its errors and body validation.

pub mod entity;
pub mod error;
pub mod validation;

pub use error::*;
pub use validation::{validate_create, validate_update, ValidationErrors};
