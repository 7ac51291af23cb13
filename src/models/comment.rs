//! Rows for the per-kind comment tables.
//!
//! Comments convert to the domain type together with the author's username,
//! which the repository joins from `users` on read; see
//! `repository::comment`.

use chrono::NaiveDateTime;
use diesel::prelude::*;

macro_rules! comment_model {
    ($row:ident, $new:ident, $table:ident, $rec_col:ident) => {
        #[derive(Debug, Clone, Identifiable, Queryable)]
        #[diesel(table_name = crate::schema::$table)]
        pub struct $row {
            pub id: i32,
            pub $rec_col: i32,
            pub author_id: i32,
            pub text: String,
            pub created_at: NaiveDateTime,
        }

        #[derive(Debug, Insertable)]
        #[diesel(table_name = crate::schema::$table)]
        pub struct $new {
            pub $rec_col: i32,
            pub author_id: i32,
            pub text: String,
            pub created_at: NaiveDateTime,
        }
    };
}

comment_model!(
    WebsiteComment,
    NewWebsiteComment,
    website_comments,
    website_id
);
comment_model!(BookComment, NewBookComment, book_comments, book_id);
comment_model!(VideoComment, NewVideoComment, video_comments, video_id);
