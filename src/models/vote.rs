//! Insertable rows for the per-kind vote membership tables.
//!
//! One row per (recommendation, user, direction); direction exclusivity is
//! handled by the toggle transaction, the composite primary key is the
//! storage backstop.

use chrono::NaiveDateTime;
use diesel::prelude::*;

macro_rules! vote_model {
    ($name:ident, $table:ident, $rec_col:ident) => {
        #[derive(Debug, Clone, Insertable, Queryable)]
        #[diesel(table_name = crate::schema::$table)]
        pub struct $name {
            pub $rec_col: i32,
            pub user_id: i32,
            pub direction: String,
            pub created_at: NaiveDateTime,
        }
    };
}

vote_model!(WebsiteVote, website_votes, website_id);
vote_model!(BookVote, book_votes, book_id);
vote_model!(VideoVote, video_votes, video_id);
