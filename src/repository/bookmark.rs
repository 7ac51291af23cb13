use crate::domain::recommendation::RecommendationRef;
use crate::domain::types::{RecommendationKind, UserId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{BookmarkReader, BookmarkWriter, DieselRepository};

/// Per-kind queries against one bookmark table.
macro_rules! bookmark_queries {
    ($kind:ident, $table:ident, $rec_col:ident, $model:ident) => {
        pub(crate) mod $kind {
            use diesel::prelude::*;

            use crate::db::DbConnection;
            use crate::models::bookmark::$model;
            use crate::schema::$table;

            pub(crate) fn exists(
                conn: &mut DbConnection,
                rec_id: i32,
                user_id: i32,
            ) -> QueryResult<bool> {
                let count = $table::table
                    .filter($table::$rec_col.eq(rec_id))
                    .filter($table::user_id.eq(user_id))
                    .count()
                    .get_result::<i64>(conn)?;
                Ok(count > 0)
            }

            pub(crate) fn toggle(
                conn: &mut DbConnection,
                rec_id: i32,
                user_id: i32,
            ) -> QueryResult<bool> {
                conn.transaction(|conn| {
                    let removed = diesel::delete(
                        $table::table
                            .filter($table::$rec_col.eq(rec_id))
                            .filter($table::user_id.eq(user_id)),
                    )
                    .execute(conn)?;

                    if removed > 0 {
                        return Ok(false);
                    }

                    let bookmark = $model {
                        $rec_col: rec_id,
                        user_id,
                        created_at: chrono::Utc::now().naive_utc(),
                    };
                    diesel::insert_or_ignore_into($table::table)
                        .values(bookmark)
                        .execute(conn)?;

                    Ok(true)
                })
            }
        }
    };
}

bookmark_queries!(website, website_bookmarks, website_id, WebsiteBookmark);
bookmark_queries!(book, book_bookmarks, book_id, BookBookmark);
bookmark_queries!(video, video_bookmarks, video_id, VideoBookmark);

impl BookmarkReader for DieselRepository {
    fn is_bookmarked(&self, rec: RecommendationRef, user_id: UserId) -> RepositoryResult<bool> {
        let mut conn = self.conn()?;

        let bookmarked = match rec.kind {
            RecommendationKind::Website => website::exists(&mut conn, rec.id, user_id.get())?,
            RecommendationKind::Book => book::exists(&mut conn, rec.id, user_id.get())?,
            RecommendationKind::Video => video::exists(&mut conn, rec.id, user_id.get())?,
        };

        Ok(bookmarked)
    }
}

impl BookmarkWriter for DieselRepository {
    fn toggle_bookmark(&self, rec: RecommendationRef, user_id: UserId) -> RepositoryResult<bool> {
        let mut conn = self.conn()?;

        let bookmarked = match rec.kind {
            RecommendationKind::Website => website::toggle(&mut conn, rec.id, user_id.get())?,
            RecommendationKind::Book => book::toggle(&mut conn, rec.id, user_id.get())?,
            RecommendationKind::Video => video::toggle(&mut conn, rec.id, user_id.get())?,
        };

        Ok(bookmarked)
    }
}
