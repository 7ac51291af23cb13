use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::recommendation::{NewVideo as DomainNewVideo, Video as DomainVideo};
use crate::domain::types::{ImageUrl, Title, TypeConstraintError, VideoUrl, YoutubeId};

/// Diesel model representing the `videos` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::videos)]
pub struct Video {
    pub id: i32,
    pub category_id: i32,
    pub subcategory_id: i32,
    pub recommended_by: i32,
    pub youtube_id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: Option<String>,
    pub published_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Video`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::videos)]
pub struct NewVideo {
    pub category_id: i32,
    pub subcategory_id: i32,
    pub recommended_by: i32,
    pub youtube_id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: Option<String>,
    pub published_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Video> for DomainVideo {
    type Error = TypeConstraintError;

    fn try_from(video: Video) -> Result<Self, Self::Error> {
        Ok(Self {
            id: video.id.try_into()?,
            category_id: video.category_id.try_into()?,
            subcategory_id: video.subcategory_id.try_into()?,
            recommended_by: video.recommended_by.try_into()?,
            youtube_id: YoutubeId::new(video.youtube_id)?,
            title: Title::new(video.title)?,
            description: video.description,
            url: VideoUrl::new(video.url)?,
            image_url: video.image_url.map(ImageUrl::new).transpose()?,
            published_at: video.published_at,
            created_at: video.created_at,
        })
    }
}

impl From<DomainNewVideo> for NewVideo {
    fn from(video: DomainNewVideo) -> Self {
        Self {
            category_id: video.category_id.get(),
            subcategory_id: video.subcategory_id.get(),
            recommended_by: video.recommended_by.get(),
            youtube_id: video.youtube_id.into_inner(),
            title: video.title.into_inner(),
            description: video.description,
            url: video.url.into_inner(),
            image_url: video.image_url.map(ImageUrl::into_inner),
            published_at: video.published_at,
            created_at: video.created_at,
        }
    }
}
