use chrono::NaiveDateTime;

use crate::domain::category::Category;
use crate::domain::recommendation::{Book, Scored, TimeFilter, Video, Website};
use crate::domain::subcategory::Subcategory;
use crate::repository::{
    BookReader, CategoryReader, RecommendationListQuery, SubcategoryReader, VideoReader,
    WebsiteReader,
};

use super::{ServiceError, ServiceResult};

/// Everything the subcategory page renders: the board itself, the effective
/// view parameters and the three scored listings.
#[derive(Debug)]
pub struct SubcategoryListing {
    pub category: Category,
    pub subcategory: Subcategory,
    pub filter: TimeFilter,
    pub search: Option<String>,
    pub websites: Vec<Scored<Website>>,
    pub books: Vec<Scored<Book>>,
    pub videos: Vec<Scored<Video>>,
}

/// Core business logic for rendering the index page.
///
/// Fetches every category for the landing grid. Repository errors are
/// translated into `ServiceError` so that the HTTP route can remain a thin
/// wrapper.
pub fn show_index<R>(repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader,
{
    match repo.list_categories() {
        Ok(categories) => Ok(categories),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Core business logic for rendering a category page: the category itself
/// plus its subcategories.
pub fn show_category<R>(
    category_slug: &str,
    repo: &R,
) -> ServiceResult<(Category, Vec<Subcategory>)>
where
    R: CategoryReader + SubcategoryReader,
{
    let category = match repo.get_category_by_slug(category_slug) {
        Ok(Some(category)) => category,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    };

    match repo.list_subcategories(category.id) {
        Ok(subcategories) => Ok((category, subcategories)),
        Err(e) => {
            log::error!("Failed to list subcategories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Core business logic for rendering a subcategory listing.
///
/// `filter` and `search` arrive as raw query parameters. An active search
/// keyword replaces ranking: results match by title or description and come
/// back newest first. `now` anchors the calendar windows.
pub fn show_subcategory<R>(
    category_slug: &str,
    subcategory_slug: &str,
    filter: Option<&str>,
    search: Option<&str>,
    now: NaiveDateTime,
    repo: &R,
) -> ServiceResult<SubcategoryListing>
where
    R: CategoryReader + SubcategoryReader + WebsiteReader + BookReader + VideoReader,
{
    let (category, subcategory) = super::resolve_board(category_slug, subcategory_slug, repo)?;

    let filter = TimeFilter::from_param(filter);
    let mut query = RecommendationListQuery::new(subcategory.id)
        .filter(filter)
        .at(now);
    if let Some(search) = search {
        query = query.search(search);
    }

    let websites = match repo.list_websites(&query) {
        Ok(websites) => websites,
        Err(e) => {
            log::error!("Failed to list websites: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let books = match repo.list_books(&query) {
        Ok(books) => books,
        Err(e) => {
            log::error!("Failed to list books: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let videos = match repo.list_videos(&query) {
        Ok(videos) => videos,
        Err(e) => {
            log::error!("Failed to list videos: {e}");
            return Err(ServiceError::Internal);
        }
    };

    Ok(SubcategoryListing {
        category,
        subcategory,
        filter,
        search: query.search,
        websites,
        books,
        videos,
    })
}
