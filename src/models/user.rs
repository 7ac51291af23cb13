use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{TypeConstraintError, Username};
use crate::domain::user::{NewUser as DomainNewUser, User as DomainUser};

/// Diesel model representing the `users` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::users)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub joined_at: NaiveDateTime,
}

/// Insertable form of [`User`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub joined_at: NaiveDateTime,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: user.id.try_into()?,
            username: Username::new(user.username)?,
            email: user.email,
            joined_at: user.joined_at,
        })
    }
}

impl From<DomainNewUser> for NewUser {
    fn from(user: DomainNewUser) -> Self {
        Self {
            username: user.username.into_inner(),
            email: user.email,
            joined_at: user.joined_at,
        }
    }
}
