//! The three recommendation kinds and the listing vocabulary shared between
//! them.
//!
//! Websites, books and videos differ in their natural key and enrichment
//! metadata but share votes, bookmarks and comments. Cross-kind operations
//! address them through [`RecommendationRef`] instead of repeating per-kind
//! plumbing.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    BookId, CatalogUrl, CategoryId, Description, ImageUrl, Isbn, RecommendationKind, Slug,
    SubcategoryId, Title, UserId, VideoId, VideoUrl, WebsiteId, WebsiteUrl, YoutubeId,
};

/// A recommended website.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Website {
    pub id: WebsiteId,
    pub category_id: CategoryId,
    pub subcategory_id: SubcategoryId,
    pub recommended_by: UserId,
    pub title: Title,
    pub description: Description,
    /// Natural key, lowercased.
    pub url: WebsiteUrl,
    pub image_url: Option<ImageUrl>,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`Website`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewWebsite {
    pub category_id: CategoryId,
    pub subcategory_id: SubcategoryId,
    pub recommended_by: UserId,
    pub title: Title,
    pub description: Description,
    pub url: WebsiteUrl,
    pub image_url: Option<ImageUrl>,
    pub created_at: NaiveDateTime,
}

/// A recommended book, enriched from the catalog lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub category_id: CategoryId,
    pub subcategory_id: SubcategoryId,
    pub recommended_by: UserId,
    /// Natural key.
    pub isbn: Isbn,
    pub title: Title,
    pub author: String,
    pub description: String,
    pub url: Option<CatalogUrl>,
    pub image_url: Option<ImageUrl>,
    pub publish_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`Book`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBook {
    pub category_id: CategoryId,
    pub subcategory_id: SubcategoryId,
    pub recommended_by: UserId,
    pub isbn: Isbn,
    pub title: Title,
    pub author: String,
    pub description: String,
    pub url: Option<CatalogUrl>,
    pub image_url: Option<ImageUrl>,
    pub publish_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

/// A recommended video, enriched from the video platform lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: VideoId,
    pub category_id: CategoryId,
    pub subcategory_id: SubcategoryId,
    pub recommended_by: UserId,
    /// Natural key extracted from the submitted URL.
    pub youtube_id: YoutubeId,
    pub title: Title,
    pub description: String,
    /// URL exactly as submitted.
    pub url: VideoUrl,
    pub image_url: Option<ImageUrl>,
    pub published_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`Video`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewVideo {
    pub category_id: CategoryId,
    pub subcategory_id: SubcategoryId,
    pub recommended_by: UserId,
    pub youtube_id: YoutubeId,
    pub title: Title,
    pub description: String,
    pub url: VideoUrl,
    pub image_url: Option<ImageUrl>,
    pub published_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

/// Kind-tagged recommendation identifier for the shared vote/bookmark/comment
/// operations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RecommendationRef {
    pub kind: RecommendationKind,
    pub id: i32,
}

impl RecommendationRef {
    pub const fn new(kind: RecommendationKind, id: i32) -> Self {
        Self { kind, id }
    }
}

impl From<WebsiteId> for RecommendationRef {
    fn from(id: WebsiteId) -> Self {
        Self::new(RecommendationKind::Website, id.get())
    }
}

impl From<BookId> for RecommendationRef {
    fn from(id: BookId) -> Self {
        Self::new(RecommendationKind::Book, id.get())
    }
}

impl From<VideoId> for RecommendationRef {
    fn from(id: VideoId) -> Self {
        Self::new(RecommendationKind::Video, id.get())
    }
}

/// Per-kind dedup identifier, normalized and validated by construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NaturalKey {
    Url(WebsiteUrl),
    Isbn(Isbn),
    Video(YoutubeId),
}

impl NaturalKey {
    pub const fn kind(&self) -> RecommendationKind {
        match self {
            Self::Url(_) => RecommendationKind::Website,
            Self::Isbn(_) => RecommendationKind::Book,
            Self::Video(_) => RecommendationKind::Video,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Url(url) => url.as_str(),
            Self::Isbn(isbn) => isbn.as_str(),
            Self::Video(id) => id.as_str(),
        }
    }
}

/// A recommendation row paired with its derived vote total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scored<T> {
    pub item: T,
    pub total_votes: i64,
}

/// Flattened cross-kind view used on profile pages and confirmation pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationSummary {
    pub kind: RecommendationKind,
    pub id: i32,
    pub recommended_by: UserId,
    pub title: Title,
    pub category_slug: Slug,
    pub subcategory_slug: Slug,
    pub image_url: Option<ImageUrl>,
    pub created_at: NaiveDateTime,
}

impl RecommendationSummary {
    /// Ref back to the underlying recommendation.
    pub const fn rec(&self) -> RecommendationRef {
        RecommendationRef::new(self.kind, self.id)
    }
}

/// Listing views a subcategory page can request.
///
/// Unrecognized query values deliberately collapse to the default so stale
/// links keep working.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TimeFilter {
    #[default]
    AllTimeBest,
    BestOfYear,
    BestOfMonth,
    Newest,
}

impl TimeFilter {
    /// Query-parameter spelling of this filter.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllTimeBest => "all-time-best",
            Self::BestOfYear => "best-of-year",
            Self::BestOfMonth => "best-of-month",
            Self::Newest => "newest",
        }
    }

    /// Parses a query parameter, falling back to the default for anything
    /// unrecognized (including absence).
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("all-time-best") => Self::AllTimeBest,
            Some("best-of-year") => Self::BestOfYear,
            Some("best-of-month") => Self::BestOfMonth,
            Some("newest") => Self::Newest,
            _ => Self::default(),
        }
    }

    /// Whether results are ranked by vote total (as opposed to recency).
    pub const fn ranks_by_votes(self) -> bool {
        !matches!(self, Self::Newest)
    }

    /// Half-open `[start, end)` creation window for this filter relative to
    /// `now`, if the filter restricts by time at all.
    pub fn window(self, now: NaiveDateTime) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let range = |start: NaiveDate, end: NaiveDate| {
            (start.and_time(NaiveTime::MIN), end.and_time(NaiveTime::MIN))
        };
        match self {
            Self::AllTimeBest | Self::Newest => None,
            Self::BestOfYear => {
                let start = NaiveDate::from_ymd_opt(now.year(), 1, 1)?;
                let end = NaiveDate::from_ymd_opt(now.year() + 1, 1, 1)?;
                Some(range(start, end))
            }
            Self::BestOfMonth => {
                let start = now.date().with_day(1)?;
                let end = if now.month() == 12 {
                    NaiveDate::from_ymd_opt(now.year() + 1, 1, 1)?
                } else {
                    NaiveDate::from_ymd_opt(now.year(), now.month() + 1, 1)?
                };
                Some(range(start, end))
            }
        }
    }
}
