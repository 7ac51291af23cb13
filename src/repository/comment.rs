use crate::domain::comment::{Comment, NewComment};
use crate::domain::recommendation::RecommendationRef;
use crate::domain::types::{CommentId, CommentText, RecommendationKind, UserId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{CommentReader, CommentWriter, DieselRepository};

/// Per-kind queries against one comment table, joined with `users` for the
/// author's username on read.
macro_rules! comment_queries {
    ($kind:ident, $table:ident, $rec_col:ident, $row:ident, $new:ident) => {
        pub(crate) mod $kind {
            use diesel::prelude::*;

            use crate::db::DbConnection;
            use crate::domain::comment::Comment;
            use crate::domain::recommendation::RecommendationRef;
            use crate::domain::types::{
                CommentText, RecommendationKind, TypeConstraintError, Username,
            };
            use crate::models::comment::{$new, $row};
            use crate::schema::{$table, users};

            pub(crate) fn to_domain(
                kind: RecommendationKind,
                row: $row,
                username: String,
            ) -> Result<Comment, TypeConstraintError> {
                Ok(Comment {
                    id: row.id.try_into()?,
                    recommendation: RecommendationRef::new(kind, row.$rec_col),
                    author_id: row.author_id.try_into()?,
                    author_username: Username::new(username)?,
                    text: CommentText::new(row.text)?,
                    created_at: row.created_at,
                })
            }

            pub(crate) fn list(
                conn: &mut DbConnection,
                rec_id: i32,
            ) -> QueryResult<Vec<($row, String)>> {
                $table::table
                    .inner_join(users::table)
                    .filter($table::$rec_col.eq(rec_id))
                    .order(($table::created_at.desc(), $table::id.desc()))
                    .select(($table::all_columns, users::username))
                    .load::<($row, String)>(conn)
            }

            pub(crate) fn get(
                conn: &mut DbConnection,
                id: i32,
            ) -> QueryResult<Option<($row, String)>> {
                $table::table
                    .inner_join(users::table)
                    .filter($table::id.eq(id))
                    .select(($table::all_columns, users::username))
                    .first::<($row, String)>(conn)
                    .optional()
            }

            pub(crate) fn create(conn: &mut DbConnection, comment: $new) -> QueryResult<usize> {
                diesel::insert_into($table::table)
                    .values(comment)
                    .execute(conn)
            }

            pub(crate) fn update(
                conn: &mut DbConnection,
                id: i32,
                author_id: i32,
                text: &str,
            ) -> QueryResult<usize> {
                diesel::update(
                    $table::table
                        .filter($table::id.eq(id))
                        .filter($table::author_id.eq(author_id)),
                )
                .set($table::text.eq(text))
                .execute(conn)
            }

            pub(crate) fn delete(
                conn: &mut DbConnection,
                id: i32,
                author_id: i32,
            ) -> QueryResult<usize> {
                diesel::delete(
                    $table::table
                        .filter($table::id.eq(id))
                        .filter($table::author_id.eq(author_id)),
                )
                .execute(conn)
            }
        }
    };
}

comment_queries!(
    website,
    website_comments,
    website_id,
    WebsiteComment,
    NewWebsiteComment
);
comment_queries!(book, book_comments, book_id, BookComment, NewBookComment);
comment_queries!(
    video,
    video_comments,
    video_id,
    VideoComment,
    NewVideoComment
);

impl CommentReader for DieselRepository {
    fn list_comments(&self, rec: RecommendationRef) -> RepositoryResult<Vec<Comment>> {
        let mut conn = self.conn()?;

        let comments = match rec.kind {
            RecommendationKind::Website => website::list(&mut conn, rec.id)?
                .into_iter()
                .map(|(row, username)| website::to_domain(rec.kind, row, username))
                .collect::<Result<Vec<_>, _>>()?,
            RecommendationKind::Book => book::list(&mut conn, rec.id)?
                .into_iter()
                .map(|(row, username)| book::to_domain(rec.kind, row, username))
                .collect::<Result<Vec<_>, _>>()?,
            RecommendationKind::Video => video::list(&mut conn, rec.id)?
                .into_iter()
                .map(|(row, username)| video::to_domain(rec.kind, row, username))
                .collect::<Result<Vec<_>, _>>()?,
        };

        Ok(comments)
    }

    fn get_comment_by_id(
        &self,
        kind: RecommendationKind,
        id: CommentId,
    ) -> RepositoryResult<Option<Comment>> {
        let mut conn = self.conn()?;

        let comment = match kind {
            RecommendationKind::Website => website::get(&mut conn, id.get())?
                .map(|(row, username)| website::to_domain(kind, row, username))
                .transpose()?,
            RecommendationKind::Book => book::get(&mut conn, id.get())?
                .map(|(row, username)| book::to_domain(kind, row, username))
                .transpose()?,
            RecommendationKind::Video => video::get(&mut conn, id.get())?
                .map(|(row, username)| video::to_domain(kind, row, username))
                .transpose()?,
        };

        Ok(comment)
    }
}

impl CommentWriter for DieselRepository {
    fn create_comment(&self, comment: &NewComment) -> RepositoryResult<usize> {
        use crate::models::comment::{NewBookComment, NewVideoComment, NewWebsiteComment};

        let mut conn = self.conn()?;
        let rec = comment.recommendation;

        let affected = match rec.kind {
            RecommendationKind::Website => website::create(
                &mut conn,
                NewWebsiteComment {
                    website_id: rec.id,
                    author_id: comment.author_id.get(),
                    text: comment.text.as_str().to_string(),
                    created_at: comment.created_at,
                },
            )?,
            RecommendationKind::Book => book::create(
                &mut conn,
                NewBookComment {
                    book_id: rec.id,
                    author_id: comment.author_id.get(),
                    text: comment.text.as_str().to_string(),
                    created_at: comment.created_at,
                },
            )?,
            RecommendationKind::Video => video::create(
                &mut conn,
                NewVideoComment {
                    video_id: rec.id,
                    author_id: comment.author_id.get(),
                    text: comment.text.as_str().to_string(),
                    created_at: comment.created_at,
                },
            )?,
        };

        Ok(affected)
    }

    fn update_comment(
        &self,
        kind: RecommendationKind,
        id: CommentId,
        author_id: UserId,
        text: &CommentText,
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let affected = match kind {
            RecommendationKind::Website => {
                website::update(&mut conn, id.get(), author_id.get(), text.as_str())?
            }
            RecommendationKind::Book => {
                book::update(&mut conn, id.get(), author_id.get(), text.as_str())?
            }
            RecommendationKind::Video => {
                video::update(&mut conn, id.get(), author_id.get(), text.as_str())?
            }
        };

        Ok(affected)
    }

    fn delete_comment(
        &self,
        kind: RecommendationKind,
        id: CommentId,
        author_id: UserId,
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let affected = match kind {
            RecommendationKind::Website => {
                website::delete(&mut conn, id.get(), author_id.get())?
            }
            RecommendationKind::Book => book::delete(&mut conn, id.get(), author_id.get())?,
            RecommendationKind::Video => video::delete(&mut conn, id.get(), author_id.get())?,
        };

        Ok(affected)
    }
}
