//! Insertable rows for the per-kind bookmark membership tables.

use chrono::NaiveDateTime;
use diesel::prelude::*;

macro_rules! bookmark_model {
    ($name:ident, $table:ident, $rec_col:ident) => {
        #[derive(Debug, Clone, Insertable, Queryable)]
        #[diesel(table_name = crate::schema::$table)]
        pub struct $name {
            pub $rec_col: i32,
            pub user_id: i32,
            pub created_at: NaiveDateTime,
        }
    };
}

bookmark_model!(WebsiteBookmark, website_bookmarks, website_id);
bookmark_model!(BookBookmark, book_bookmarks, book_id);
bookmark_model!(VideoBookmark, video_bookmarks, video_id);
