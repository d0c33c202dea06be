//! # Demo Security
//!
//! Credential hashing for identities stored by the demo engine.

pub mod password;

pub use password::{PasswordCost, PasswordError, PasswordService};
