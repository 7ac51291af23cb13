use diesel::prelude::*;

use crate::domain::types::UserId;
use crate::domain::user::{NewUser, User};
use crate::models::user::{NewUser as DbNewUser, User as DbUser};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, UserReader, UserWriter};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let user = users::table
            .filter(users::id.eq(id.get()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        let user = user.map(TryInto::try_into).transpose()?;
        Ok(user)
    }

    fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let user = users::table
            .filter(users::username.eq(username))
            .first::<DbUser>(&mut conn)
            .optional()?;

        let user = user.map(TryInto::try_into).transpose()?;
        Ok(user)
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, user: &NewUser) -> RepositoryResult<usize> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user: DbNewUser = user.clone().into();

        let affected = diesel::insert_into(users::table)
            .values(db_user)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
