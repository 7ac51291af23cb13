use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{UserId, Username};

/// A member account, provisioned by the accounts service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: String,
    pub joined_at: NaiveDateTime,
}

/// Data required to insert a new [`User`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewUser {
    pub username: Username,
    pub email: String,
    pub joined_at: NaiveDateTime,
}

impl NewUser {
    /// Builds an insertable user stamped with the current time.
    pub fn new(username: Username, email: String) -> Self {
        Self {
            username,
            email,
            joined_at: chrono::Utc::now().naive_utc(),
        }
    }
}
