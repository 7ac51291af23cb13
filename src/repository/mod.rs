use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, NewCategory};
use crate::domain::comment::{Comment, NewComment};
use crate::domain::recommendation::{
    Book, NaturalKey, NewBook, NewVideo, NewWebsite, RecommendationRef, RecommendationSummary,
    Scored, TimeFilter, Video, Website,
};
use crate::domain::subcategory::{NewSubcategory, Subcategory};
use crate::domain::types::{
    BookId, CategoryId, CommentId, CommentText, RecommendationKind, SubcategoryId, UserId, VideoId,
    VoteDirection, WebsiteId,
};
use crate::domain::user::{NewUser, User};
use crate::repository::errors::RepositoryResult;

pub mod book;
pub mod bookmark;
pub mod category;
pub mod comment;
pub mod errors;
pub mod recommendation;
pub mod subcategory;
#[cfg(test)]
pub mod test;
pub mod user;
pub mod video;
pub mod vote;
pub mod website;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters for one subcategory listing of a single kind.
///
/// `now` anchors the calendar windows so callers (and tests) control the
/// reference clock instead of the repository sampling it mid-query.
#[derive(Debug, Clone)]
pub struct RecommendationListQuery {
    pub subcategory_id: SubcategoryId,
    pub filter: TimeFilter,
    /// Non-empty keyword; replaces ranking when present.
    pub search: Option<String>,
    pub now: NaiveDateTime,
}

impl RecommendationListQuery {
    pub fn new(subcategory_id: SubcategoryId) -> Self {
        Self {
            subcategory_id,
            filter: TimeFilter::default(),
            search: None,
            now: chrono::Utc::now().naive_utc(),
        }
    }

    pub fn filter(mut self, filter: TimeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the search keyword; empty or whitespace-only input means
    /// "no search" rather than "match nothing".
    pub fn search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        let trimmed = search.trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Pins the reference time used for calendar windows.
    pub fn at(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }
}

/// Read-only operations for user accounts.
pub trait UserReader {
    /// Retrieve a user by its identifier.
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    /// Retrieve a user by its unique username.
    fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
}

/// Write operations for user accounts.
pub trait UserWriter {
    /// Persist a new user. Returns the number of inserted rows.
    fn create_user(&self, user: &NewUser) -> RepositoryResult<usize>;
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List all categories, alphabetically.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its unique slug.
    fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category. Returns the number of inserted rows.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<usize>;
}

/// Read-only operations for subcategory entities.
pub trait SubcategoryReader {
    /// List the subcategories of a category, alphabetically.
    fn list_subcategories(&self, category_id: CategoryId) -> RepositoryResult<Vec<Subcategory>>;
    /// Retrieve a subcategory by its slug within a category.
    fn get_subcategory_by_slug(
        &self,
        category_id: CategoryId,
        slug: &str,
    ) -> RepositoryResult<Option<Subcategory>>;
}

/// Write operations for subcategory entities.
pub trait SubcategoryWriter {
    /// Persist a new subcategory. Returns the number of inserted rows.
    fn create_subcategory(&self, subcategory: &NewSubcategory) -> RepositoryResult<usize>;
}

/// Read-only operations for website recommendations.
pub trait WebsiteReader {
    /// List websites in a subcategory with their vote totals, ordered per the
    /// query's filter/search.
    fn list_websites(
        &self,
        query: &RecommendationListQuery,
    ) -> RepositoryResult<Vec<Scored<Website>>>;
    /// Retrieve a website by its identifier.
    fn get_website_by_id(&self, id: WebsiteId) -> RepositoryResult<Option<Website>>;
}

/// Write operations for website recommendations.
pub trait WebsiteWriter {
    /// Persist a new website recommendation. Returns the number of inserted
    /// rows.
    fn create_website(&self, website: &NewWebsite) -> RepositoryResult<usize>;
}

/// Read-only operations for book recommendations.
pub trait BookReader {
    /// List books in a subcategory with their vote totals, ordered per the
    /// query's filter/search.
    fn list_books(&self, query: &RecommendationListQuery) -> RepositoryResult<Vec<Scored<Book>>>;
    /// Retrieve a book by its identifier.
    fn get_book_by_id(&self, id: BookId) -> RepositoryResult<Option<Book>>;
}

/// Write operations for book recommendations.
pub trait BookWriter {
    /// Persist a new book recommendation. Returns the number of inserted
    /// rows.
    fn create_book(&self, book: &NewBook) -> RepositoryResult<usize>;
}

/// Read-only operations for video recommendations.
pub trait VideoReader {
    /// List videos in a subcategory with their vote totals, ordered per the
    /// query's filter/search.
    fn list_videos(&self, query: &RecommendationListQuery)
    -> RepositoryResult<Vec<Scored<Video>>>;
    /// Retrieve a video by its identifier.
    fn get_video_by_id(&self, id: VideoId) -> RepositoryResult<Option<Video>>;
}

/// Write operations for video recommendations.
pub trait VideoWriter {
    /// Persist a new video recommendation. Returns the number of inserted
    /// rows.
    fn create_video(&self, video: &NewVideo) -> RepositoryResult<usize>;
}

/// Cross-kind read operations over recommendations.
pub trait RecommendationReader {
    /// Whether a natural key is already taken within a (category,
    /// subcategory) pair.
    fn natural_key_exists(
        &self,
        category_id: CategoryId,
        subcategory_id: SubcategoryId,
        key: &NaturalKey,
    ) -> RepositoryResult<bool>;
    /// Flattened view of one recommendation, any kind.
    fn get_recommendation_summary(
        &self,
        rec: RecommendationRef,
    ) -> RepositoryResult<Option<RecommendationSummary>>;
    /// Everything a user submitted, all kinds merged, newest first.
    fn list_recommendations_by_user(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<RecommendationSummary>>;
    /// Everything a user bookmarked, all kinds merged, newest first.
    fn list_bookmarks_by_user(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<RecommendationSummary>>;
}

/// Cross-kind write operations over recommendations.
pub trait RecommendationWriter {
    /// Delete a recommendation together with its votes, bookmarks and
    /// comments. Scoped to the recommending user; returns the number of
    /// deleted recommendations (0 when missing or owned by someone else).
    fn delete_recommendation(
        &self,
        rec: RecommendationRef,
        recommended_by: UserId,
    ) -> RepositoryResult<usize>;
}

/// Read-only operations over vote memberships.
pub trait VoteReader {
    /// Derived vote total (upvotes minus downvotes).
    fn total_votes(&self, rec: RecommendationRef) -> RepositoryResult<i64>;
    /// The acting user's current vote, if any.
    fn user_vote(
        &self,
        rec: RecommendationRef,
        user_id: UserId,
    ) -> RepositoryResult<Option<VoteDirection>>;
}

/// Vote toggle state machine.
pub trait VoteWriter {
    /// Toggles `direction` for the user on one recommendation: removes the
    /// same-direction vote, switches an opposite one, adds when absent.
    /// Returns the new vote total.
    fn toggle_vote(
        &self,
        rec: RecommendationRef,
        user_id: UserId,
        direction: VoteDirection,
    ) -> RepositoryResult<i64>;
}

/// Read-only operations over bookmark memberships.
pub trait BookmarkReader {
    /// Whether the user currently bookmarks the recommendation.
    fn is_bookmarked(&self, rec: RecommendationRef, user_id: UserId) -> RepositoryResult<bool>;
}

/// Bookmark toggle.
pub trait BookmarkWriter {
    /// Adds the bookmark when absent, removes it when present. Returns
    /// whether the recommendation is bookmarked afterwards.
    fn toggle_bookmark(&self, rec: RecommendationRef, user_id: UserId) -> RepositoryResult<bool>;
}

/// Read-only operations for comments.
pub trait CommentReader {
    /// Comments on one recommendation, newest first.
    fn list_comments(&self, rec: RecommendationRef) -> RepositoryResult<Vec<Comment>>;
    /// Retrieve a comment by kind and identifier.
    fn get_comment_by_id(
        &self,
        kind: RecommendationKind,
        id: CommentId,
    ) -> RepositoryResult<Option<Comment>>;
}

/// Write operations for comments.
pub trait CommentWriter {
    /// Persist a new comment.
    fn create_comment(&self, comment: &NewComment) -> RepositoryResult<usize>;
    /// Update a comment's text, scoped to its author. Returns affected rows
    /// (0 when missing or owned by someone else).
    fn update_comment(
        &self,
        kind: RecommendationKind,
        id: CommentId,
        author_id: UserId,
        text: &CommentText,
    ) -> RepositoryResult<usize>;
    /// Delete a comment, scoped to its author. Returns affected rows (0 when
    /// missing or owned by someone else).
    fn delete_comment(
        &self,
        kind: RecommendationKind,
        id: CommentId,
        author_id: UserId,
    ) -> RepositoryResult<usize>;
}

/// Descending creation-time order with id as the final tiebreak.
pub(crate) fn sort_newest_first<T>(
    items: &mut [Scored<T>],
    key: impl Fn(&T) -> (NaiveDateTime, i32),
) {
    items.sort_by(|a, b| key(&b.item).cmp(&key(&a.item)));
}

/// Descending vote total, then descending creation time, then descending id.
pub(crate) fn sort_by_votes<T>(items: &mut [Scored<T>], key: impl Fn(&T) -> (NaiveDateTime, i32)) {
    items.sort_by(|a, b| (b.total_votes, key(&b.item)).cmp(&(a.total_votes, key(&a.item))));
}
