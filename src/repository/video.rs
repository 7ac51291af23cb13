use diesel::prelude::*;

use crate::domain::recommendation::{NewVideo, Scored, Video};
use crate::domain::types::{TypeConstraintError, VideoId};
use crate::models::video::{NewVideo as DbNewVideo, Video as DbVideo};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    DieselRepository, RecommendationListQuery, VideoReader, VideoWriter, sort_by_votes,
    sort_newest_first, vote,
};

impl VideoReader for DieselRepository {
    fn list_videos(
        &self,
        query: &RecommendationListQuery,
    ) -> RepositoryResult<Vec<Scored<Video>>> {
        use crate::schema::videos;

        let mut conn = self.conn()?;

        let mut items = videos::table
            .filter(videos::subcategory_id.eq(query.subcategory_id.get()))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if query.search.is_none() {
            if let Some((start, end)) = query.filter.window(query.now) {
                items = items
                    .filter(videos::created_at.ge(start))
                    .filter(videos::created_at.lt(end));
            }
        }

        let rows = items.load::<DbVideo>(&mut conn)?;

        let rows: Vec<DbVideo> = match &query.search {
            Some(term) => {
                let needle = term.to_lowercase();
                rows.into_iter()
                    .filter(|row| {
                        row.title.to_lowercase().contains(&needle)
                            || row.description.to_lowercase().contains(&needle)
                    })
                    .collect()
            }
            None => rows,
        };

        let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
        let totals = vote::video::totals(&mut conn, &ids)?;

        let mut scored = rows
            .into_iter()
            .map(|row| {
                let total_votes = totals.get(&row.id).copied().unwrap_or(0);
                Ok(Scored {
                    item: row.try_into()?,
                    total_votes,
                })
            })
            .collect::<Result<Vec<Scored<Video>>, TypeConstraintError>>()?;

        if query.search.is_none() && query.filter.ranks_by_votes() {
            sort_by_votes(&mut scored, |video| (video.created_at, video.id.get()));
        } else {
            sort_newest_first(&mut scored, |video| (video.created_at, video.id.get()));
        }

        Ok(scored)
    }

    fn get_video_by_id(&self, id: VideoId) -> RepositoryResult<Option<Video>> {
        use crate::schema::videos;

        let mut conn = self.conn()?;

        let video = videos::table
            .filter(videos::id.eq(id.get()))
            .first::<DbVideo>(&mut conn)
            .optional()?;

        let video = video.map(TryInto::try_into).transpose()?;
        Ok(video)
    }
}

impl VideoWriter for DieselRepository {
    fn create_video(&self, video: &NewVideo) -> RepositoryResult<usize> {
        use crate::schema::videos;

        let mut conn = self.conn()?;
        let db_video: DbNewVideo = video.clone().into();

        let affected = diesel::insert_into(videos::table)
            .values(db_video)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
