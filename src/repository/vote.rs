use crate::domain::recommendation::RecommendationRef;
use crate::domain::types::{RecommendationKind, UserId, VoteDirection};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, VoteReader, VoteWriter};

fn direction_score(direction: &str) -> i64 {
    if direction == VoteDirection::Up.as_str() {
        1
    } else {
        -1
    }
}

/// Per-kind queries against one vote table.
///
/// The toggle runs in a transaction: removing the same-direction row means
/// the user is retracting, otherwise the opposite row is cleared and the new
/// one inserted. `insert_or_ignore_into` absorbs a concurrent duplicate, the
/// composite primary key is the storage backstop.
macro_rules! vote_queries {
    ($kind:ident, $table:ident, $rec_col:ident, $model:ident) => {
        pub(crate) mod $kind {
            use std::collections::HashMap;

            use diesel::prelude::*;

            use crate::db::DbConnection;
            use crate::domain::types::VoteDirection;
            use crate::models::vote::$model;
            use crate::schema::$table;

            pub(crate) fn totals(
                conn: &mut DbConnection,
                ids: &[i32],
            ) -> QueryResult<HashMap<i32, i64>> {
                let rows = $table::table
                    .filter($table::$rec_col.eq_any(ids))
                    .select(($table::$rec_col, $table::direction))
                    .load::<(i32, String)>(conn)?;

                let mut totals = HashMap::new();
                for (id, direction) in rows {
                    *totals.entry(id).or_insert(0) += super::direction_score(&direction);
                }
                Ok(totals)
            }

            pub(crate) fn total(conn: &mut DbConnection, rec_id: i32) -> QueryResult<i64> {
                let directions = $table::table
                    .filter($table::$rec_col.eq(rec_id))
                    .select($table::direction)
                    .load::<String>(conn)?;

                Ok(directions
                    .iter()
                    .map(|direction| super::direction_score(direction))
                    .sum())
            }

            pub(crate) fn user_direction(
                conn: &mut DbConnection,
                rec_id: i32,
                user_id: i32,
            ) -> QueryResult<Option<String>> {
                $table::table
                    .filter($table::$rec_col.eq(rec_id))
                    .filter($table::user_id.eq(user_id))
                    .select($table::direction)
                    .first::<String>(conn)
                    .optional()
            }

            pub(crate) fn toggle(
                conn: &mut DbConnection,
                rec_id: i32,
                user_id: i32,
                direction: VoteDirection,
            ) -> QueryResult<i64> {
                conn.transaction(|conn| {
                    let retracted = diesel::delete(
                        $table::table
                            .filter($table::$rec_col.eq(rec_id))
                            .filter($table::user_id.eq(user_id))
                            .filter($table::direction.eq(direction.as_str())),
                    )
                    .execute(conn)?;

                    if retracted == 0 {
                        diesel::delete(
                            $table::table
                                .filter($table::$rec_col.eq(rec_id))
                                .filter($table::user_id.eq(user_id))
                                .filter($table::direction.eq(direction.opposite().as_str())),
                        )
                        .execute(conn)?;

                        let vote = $model {
                            $rec_col: rec_id,
                            user_id,
                            direction: direction.as_str().to_string(),
                            created_at: chrono::Utc::now().naive_utc(),
                        };
                        diesel::insert_or_ignore_into($table::table)
                            .values(vote)
                            .execute(conn)?;
                    }

                    total(conn, rec_id)
                })
            }
        }
    };
}

vote_queries!(website, website_votes, website_id, WebsiteVote);
vote_queries!(book, book_votes, book_id, BookVote);
vote_queries!(video, video_votes, video_id, VideoVote);

impl VoteReader for DieselRepository {
    fn total_votes(&self, rec: RecommendationRef) -> RepositoryResult<i64> {
        let mut conn = self.conn()?;

        let total = match rec.kind {
            RecommendationKind::Website => website::total(&mut conn, rec.id)?,
            RecommendationKind::Book => book::total(&mut conn, rec.id)?,
            RecommendationKind::Video => video::total(&mut conn, rec.id)?,
        };

        Ok(total)
    }

    fn user_vote(
        &self,
        rec: RecommendationRef,
        user_id: UserId,
    ) -> RepositoryResult<Option<VoteDirection>> {
        let mut conn = self.conn()?;

        let direction = match rec.kind {
            RecommendationKind::Website => {
                website::user_direction(&mut conn, rec.id, user_id.get())?
            }
            RecommendationKind::Book => book::user_direction(&mut conn, rec.id, user_id.get())?,
            RecommendationKind::Video => video::user_direction(&mut conn, rec.id, user_id.get())?,
        };

        let direction = direction.map(VoteDirection::try_from).transpose()?;
        Ok(direction)
    }
}

impl VoteWriter for DieselRepository {
    fn toggle_vote(
        &self,
        rec: RecommendationRef,
        user_id: UserId,
        direction: VoteDirection,
    ) -> RepositoryResult<i64> {
        let mut conn = self.conn()?;

        let total = match rec.kind {
            RecommendationKind::Website => {
                website::toggle(&mut conn, rec.id, user_id.get(), direction)?
            }
            RecommendationKind::Book => book::toggle(&mut conn, rec.id, user_id.get(), direction)?,
            RecommendationKind::Video => {
                video::toggle(&mut conn, rec.id, user_id.get(), direction)?
            }
        };

        Ok(total)
    }
}
