//! User identity

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A stored user. The password is only kept as a hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A user about to be created, carrying the clear-text password.
#[derive(Debug, Clone, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 64, message = "User id must be between 1 and 64 characters"))]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
    #[validate(email)]
    pub email: String,
}

impl NewUser {
    pub fn new(id: &str, first_name: &str, last_name: &str, password: &str, email: &str) -> Self {
        Self {
            id: id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            password: password.to_string(),
            email: email.to_string(),
        }
    }

    /// Builds the stored form once the password has been hashed.
    pub fn into_user(self, password_hash: String) -> User {
        User {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password_hash,
        }
    }
}
