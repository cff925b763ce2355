//! Token secrets and token endpoint payloads.

pub mod secret;
pub mod set;
