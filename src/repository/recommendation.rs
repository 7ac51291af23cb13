use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::recommendation::{NaturalKey, RecommendationRef, RecommendationSummary};
use crate::domain::types::{
    CategoryId, ImageUrl, RecommendationKind, Slug, SubcategoryId, Title, TypeConstraintError,
    UserId,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, RecommendationReader, RecommendationWriter};

/// Projection shared by the three kinds when flattened into a summary:
/// id, recommender, title, image, creation time plus the owning
/// category/subcategory slugs.
type SummaryRow = (i32, i32, String, Option<String>, NaiveDateTime, String, String);

fn to_summary(
    kind: RecommendationKind,
    row: SummaryRow,
) -> Result<RecommendationSummary, TypeConstraintError> {
    let (id, recommended_by, title, image_url, created_at, category_slug, subcategory_slug) = row;
    Ok(RecommendationSummary {
        kind,
        id,
        recommended_by: UserId::new(recommended_by)?,
        title: Title::new(title)?,
        category_slug: Slug::new(category_slug)?,
        subcategory_slug: Slug::new(subcategory_slug)?,
        image_url: image_url.map(ImageUrl::new).transpose()?,
        created_at,
    })
}

impl RecommendationReader for DieselRepository {
    fn natural_key_exists(
        &self,
        category_id: CategoryId,
        subcategory_id: SubcategoryId,
        key: &NaturalKey,
    ) -> RepositoryResult<bool> {
        use crate::schema::{books, videos, websites};

        let mut conn = self.conn()?;

        let count = match key {
            NaturalKey::Url(url) => websites::table
                .filter(websites::category_id.eq(category_id.get()))
                .filter(websites::subcategory_id.eq(subcategory_id.get()))
                .filter(websites::url.eq(url.as_str()))
                .count()
                .get_result::<i64>(&mut conn)?,
            NaturalKey::Isbn(isbn) => books::table
                .filter(books::category_id.eq(category_id.get()))
                .filter(books::subcategory_id.eq(subcategory_id.get()))
                .filter(books::isbn.eq(isbn.as_str()))
                .count()
                .get_result::<i64>(&mut conn)?,
            NaturalKey::Video(youtube_id) => videos::table
                .filter(videos::category_id.eq(category_id.get()))
                .filter(videos::subcategory_id.eq(subcategory_id.get()))
                .filter(videos::youtube_id.eq(youtube_id.as_str()))
                .count()
                .get_result::<i64>(&mut conn)?,
        };

        Ok(count > 0)
    }

    fn get_recommendation_summary(
        &self,
        rec: RecommendationRef,
    ) -> RepositoryResult<Option<RecommendationSummary>> {
        use crate::schema::{books, categories, subcategories, videos, websites};

        let mut conn = self.conn()?;

        let row = match rec.kind {
            RecommendationKind::Website => websites::table
                .inner_join(categories::table)
                .inner_join(subcategories::table)
                .filter(websites::id.eq(rec.id))
                .select((
                    websites::id,
                    websites::recommended_by,
                    websites::title,
                    websites::image_url,
                    websites::created_at,
                    categories::slug,
                    subcategories::slug,
                ))
                .first::<SummaryRow>(&mut conn)
                .optional()?,
            RecommendationKind::Book => books::table
                .inner_join(categories::table)
                .inner_join(subcategories::table)
                .filter(books::id.eq(rec.id))
                .select((
                    books::id,
                    books::recommended_by,
                    books::title,
                    books::image_url,
                    books::created_at,
                    categories::slug,
                    subcategories::slug,
                ))
                .first::<SummaryRow>(&mut conn)
                .optional()?,
            RecommendationKind::Video => videos::table
                .inner_join(categories::table)
                .inner_join(subcategories::table)
                .filter(videos::id.eq(rec.id))
                .select((
                    videos::id,
                    videos::recommended_by,
                    videos::title,
                    videos::image_url,
                    videos::created_at,
                    categories::slug,
                    subcategories::slug,
                ))
                .first::<SummaryRow>(&mut conn)
                .optional()?,
        };

        let summary = row.map(|row| to_summary(rec.kind, row)).transpose()?;
        Ok(summary)
    }

    fn list_recommendations_by_user(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<RecommendationSummary>> {
        use crate::schema::{books, categories, subcategories, videos, websites};

        let mut conn = self.conn()?;

        let websites = websites::table
            .inner_join(categories::table)
            .inner_join(subcategories::table)
            .filter(websites::recommended_by.eq(user_id.get()))
            .select((
                websites::id,
                websites::recommended_by,
                websites::title,
                websites::image_url,
                websites::created_at,
                categories::slug,
                subcategories::slug,
            ))
            .load::<SummaryRow>(&mut conn)?;

        let books = books::table
            .inner_join(categories::table)
            .inner_join(subcategories::table)
            .filter(books::recommended_by.eq(user_id.get()))
            .select((
                books::id,
                books::recommended_by,
                books::title,
                books::image_url,
                books::created_at,
                categories::slug,
                subcategories::slug,
            ))
            .load::<SummaryRow>(&mut conn)?;

        let videos = videos::table
            .inner_join(categories::table)
            .inner_join(subcategories::table)
            .filter(videos::recommended_by.eq(user_id.get()))
            .select((
                videos::id,
                videos::recommended_by,
                videos::title,
                videos::image_url,
                videos::created_at,
                categories::slug,
                subcategories::slug,
            ))
            .load::<SummaryRow>(&mut conn)?;

        merge_summaries(websites, books, videos)
    }

    fn list_bookmarks_by_user(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<RecommendationSummary>> {
        use crate::schema::{
            book_bookmarks, books, categories, subcategories, video_bookmarks, videos,
            website_bookmarks, websites,
        };

        let mut conn = self.conn()?;

        let websites = websites::table
            .inner_join(categories::table)
            .inner_join(subcategories::table)
            .filter(
                websites::id.eq_any(
                    website_bookmarks::table
                        .filter(website_bookmarks::user_id.eq(user_id.get()))
                        .select(website_bookmarks::website_id),
                ),
            )
            .select((
                websites::id,
                websites::recommended_by,
                websites::title,
                websites::image_url,
                websites::created_at,
                categories::slug,
                subcategories::slug,
            ))
            .load::<SummaryRow>(&mut conn)?;

        let books = books::table
            .inner_join(categories::table)
            .inner_join(subcategories::table)
            .filter(
                books::id.eq_any(
                    book_bookmarks::table
                        .filter(book_bookmarks::user_id.eq(user_id.get()))
                        .select(book_bookmarks::book_id),
                ),
            )
            .select((
                books::id,
                books::recommended_by,
                books::title,
                books::image_url,
                books::created_at,
                categories::slug,
                subcategories::slug,
            ))
            .load::<SummaryRow>(&mut conn)?;

        let videos = videos::table
            .inner_join(categories::table)
            .inner_join(subcategories::table)
            .filter(
                videos::id.eq_any(
                    video_bookmarks::table
                        .filter(video_bookmarks::user_id.eq(user_id.get()))
                        .select(video_bookmarks::video_id),
                ),
            )
            .select((
                videos::id,
                videos::recommended_by,
                videos::title,
                videos::image_url,
                videos::created_at,
                categories::slug,
                subcategories::slug,
            ))
            .load::<SummaryRow>(&mut conn)?;

        merge_summaries(websites, books, videos)
    }
}

/// Merge per-kind rows into one list, newest first.
fn merge_summaries(
    websites: Vec<SummaryRow>,
    books: Vec<SummaryRow>,
    videos: Vec<SummaryRow>,
) -> RepositoryResult<Vec<RecommendationSummary>> {
    let mut summaries = Vec::with_capacity(websites.len() + books.len() + videos.len());
    for row in websites {
        summaries.push(to_summary(RecommendationKind::Website, row)?);
    }
    for row in books {
        summaries.push(to_summary(RecommendationKind::Book, row)?);
    }
    for row in videos {
        summaries.push(to_summary(RecommendationKind::Video, row)?);
    }

    summaries.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
    Ok(summaries)
}

impl RecommendationWriter for DieselRepository {
    fn delete_recommendation(
        &self,
        rec: RecommendationRef,
        recommended_by: UserId,
    ) -> RepositoryResult<usize> {
        use crate::schema::{books, videos, websites};

        let mut conn = self.conn()?;

        // Votes, bookmarks and comments go with the row via ON DELETE
        // CASCADE; foreign keys are enabled on every pooled connection.
        let affected = match rec.kind {
            RecommendationKind::Website => diesel::delete(
                websites::table
                    .filter(websites::id.eq(rec.id))
                    .filter(websites::recommended_by.eq(recommended_by.get())),
            )
            .execute(&mut conn)?,
            RecommendationKind::Book => diesel::delete(
                books::table
                    .filter(books::id.eq(rec.id))
                    .filter(books::recommended_by.eq(recommended_by.get())),
            )
            .execute(&mut conn)?,
            RecommendationKind::Video => diesel::delete(
                videos::table
                    .filter(videos::id.eq(rec.id))
                    .filter(videos::recommended_by.eq(recommended_by.get())),
            )
            .execute(&mut conn)?,
        };

        Ok(affected)
    }
}
