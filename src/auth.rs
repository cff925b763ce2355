//! Credentials, scopes, and token models.

pub mod credentials;
pub mod scope;
pub mod token;

pub use credentials::*;
pub use scope::*;
pub use token::{secret::*, set::*};
