//! Metadata lookups performed while creating a recommendation.
//!
//! Each collaborator sits behind a trait so services stay testable without
//! network access; [`HttpEnricher`] is the production implementation.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::types::{CatalogUrl, ImageUrl, Isbn, YoutubeId};
use crate::models::config::ServerConfig;

/// Errors from the required catalog lookups.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The catalog answered but had no entry for the requested key.
    #[error("no catalog entry matched")]
    NoMatch,
}

/// Book metadata resolved from an ISBN.
#[derive(Debug, Clone)]
pub struct BookMetadata {
    pub title: String,
    pub author: String,
    pub description: String,
    pub url: Option<CatalogUrl>,
    pub image_url: Option<ImageUrl>,
    pub publish_date: Option<NaiveDate>,
}

/// Video metadata resolved from a video id.
#[derive(Debug, Clone)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    pub image_url: Option<ImageUrl>,
    pub published_at: Option<NaiveDateTime>,
}

/// Best-effort page preview for website submissions.
pub trait PagePreview {
    /// `og:image` of the submitted page; any failure degrades to `None`.
    async fn og_image(&self, url: &str) -> Option<ImageUrl>;
}

/// Book catalog lookup, required for book submissions.
pub trait BookCatalog {
    async fn lookup_isbn(&self, isbn: &Isbn) -> Result<BookMetadata, LookupError>;
}

/// Video platform lookup, required for video submissions.
pub trait VideoLookup {
    async fn lookup_video(&self, id: &YoutubeId) -> Result<VideoMetadata, LookupError>;
}

/// HTTP-backed implementation of all three lookup seams.
pub struct HttpEnricher {
    client: reqwest::Client,
    books_api_base: String,
    youtube_api_base: String,
    youtube_api_key: String,
}

impl HttpEnricher {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            books_api_base: config.books_api_base.clone(),
            youtube_api_base: config.youtube_api_base.clone(),
            youtube_api_key: config.youtube_api_key.clone(),
        }
    }
}

impl PagePreview for HttpEnricher {
    async fn og_image(&self, url: &str) -> Option<ImageUrl> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .ok()?
            .error_for_status()
            .ok()?;
        let html = response.text().await.ok()?;
        extract_og_image(&html).and_then(|content| ImageUrl::new(content).ok())
    }
}

#[derive(Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Deserialize)]
struct Volume {
    #[serde(rename = "volumeInfo")]
    volume_info: VolumeInfo,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct VolumeInfo {
    title: Option<String>,
    authors: Vec<String>,
    description: Option<String>,
    info_link: Option<String>,
    image_links: Option<ImageLinks>,
    published_date: Option<String>,
}

#[derive(Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

impl BookCatalog for HttpEnricher {
    async fn lookup_isbn(&self, isbn: &Isbn) -> Result<BookMetadata, LookupError> {
        let url = format!("{}/volumes", self.books_api_base);
        let response = self
            .client
            .get(&url)
            .query(&[("q", format!("isbn:{isbn}"))])
            .send()
            .await?
            .error_for_status()?;
        let volumes: VolumesResponse = response.json().await?;
        let info = volumes
            .items
            .into_iter()
            .next()
            .ok_or(LookupError::NoMatch)?
            .volume_info;
        Ok(BookMetadata {
            title: info.title.ok_or(LookupError::NoMatch)?,
            author: info.authors.into_iter().next().unwrap_or_default(),
            description: info.description.unwrap_or_default(),
            url: info.info_link.and_then(|link| CatalogUrl::new(link).ok()),
            image_url: info
                .image_links
                .and_then(|links| links.thumbnail)
                .and_then(|thumbnail| ImageUrl::new(thumbnail).ok()),
            publish_date: info.published_date.as_deref().and_then(parse_publish_date),
        })
    }
}

#[derive(Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Deserialize)]
struct VideoItem {
    snippet: Snippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    #[serde(default)]
    description: String,
    published_at: Option<String>,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Deserialize, Default)]
struct Thumbnails {
    high: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Deserialize)]
struct Thumbnail {
    url: String,
}

impl Thumbnails {
    /// Largest available rendition.
    fn best(self) -> Option<Thumbnail> {
        self.high.or(self.medium).or(self.default)
    }
}

impl VideoLookup for HttpEnricher {
    async fn lookup_video(&self, id: &YoutubeId) -> Result<VideoMetadata, LookupError> {
        let url = format!("{}/videos", self.youtube_api_base);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("id", id.as_str()),
                ("key", &self.youtube_api_key),
            ])
            .send()
            .await?
            .error_for_status()?;
        let videos: VideosResponse = response.json().await?;
        let snippet = videos
            .items
            .into_iter()
            .next()
            .ok_or(LookupError::NoMatch)?
            .snippet;
        Ok(VideoMetadata {
            title: snippet.title,
            description: snippet.description,
            image_url: snippet
                .thumbnails
                .best()
                .and_then(|thumbnail| ImageUrl::new(thumbnail.url).ok()),
            published_at: snippet
                .published_at
                .as_deref()
                .and_then(parse_published_at),
        })
    }
}

/// Catalog publish dates arrive as `YYYY`, `YYYY-MM` or `YYYY-MM-DD`;
/// truncated forms resolve to the first day.
fn parse_publish_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    match raw.len() {
        4 => NaiveDate::from_ymd_opt(raw.parse().ok()?, 1, 1),
        7 => {
            let (year, month) = raw.split_once('-')?;
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        }
        _ => NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok(),
    }
}

fn parse_published_at(raw: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc())
}

/// Pulls the `og:image` content attribute out of a page without a full HTML
/// parse; meta tags are shallow enough for a tag scan.
fn extract_og_image(html: &str) -> Option<String> {
    let mut rest = html;
    while let Some(start) = rest.find("<meta") {
        let tag_rest = &rest[start..];
        let end = tag_rest.find('>')?;
        let tag = &tag_rest[..end];
        if attribute_value(tag, "property") == Some("og:image") {
            return attribute_value(tag, "content").map(str::to_string);
        }
        rest = &tag_rest[end + 1..];
    }
    None
}

fn attribute_value<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let idx = tag.find(name)?;
    let after = tag[idx + name.len()..].trim_start().strip_prefix('=')?;
    let after = after.trim_start();
    let quote = after.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let rest = &after[1..];
    rest.find(quote).map(|end| &rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_og_image_from_meta_tags() {
        let html = r#"<html><head>
            <meta property="og:title" content="A page">
            <meta property="og:image" content="https://cdn.example.com/share.png">
            </head><body></body></html>"#;
        assert_eq!(
            extract_og_image(html).as_deref(),
            Some("https://cdn.example.com/share.png")
        );
    }

    #[test]
    fn handles_attribute_order_and_single_quotes() {
        let html = "<meta content='https://img.example.com/x.jpg' property='og:image'>";
        assert_eq!(
            extract_og_image(html).as_deref(),
            Some("https://img.example.com/x.jpg")
        );
    }

    #[test]
    fn ignores_pages_without_og_image() {
        let html = r#"<html><head><meta name="description" content="x"></head></html>"#;
        assert_eq!(extract_og_image(html), None);
        assert_eq!(extract_og_image("<html><head></head></html>"), None);
    }

    #[test]
    fn skips_og_image_size_variants() {
        let html = r#"
            <meta property="og:image:width" content="400">
            <meta property="og:image" content="https://cdn.example.com/a.png">"#;
        assert_eq!(
            extract_og_image(html).as_deref(),
            Some("https://cdn.example.com/a.png")
        );
    }

    #[test]
    fn resolves_truncated_publish_dates_to_first_day() {
        assert_eq!(
            parse_publish_date("2011"),
            NaiveDate::from_ymd_opt(2011, 1, 1)
        );
        assert_eq!(
            parse_publish_date("2011-03"),
            NaiveDate::from_ymd_opt(2011, 3, 1)
        );
        assert_eq!(
            parse_publish_date("2011-03-15"),
            NaiveDate::from_ymd_opt(2011, 3, 15)
        );
        assert_eq!(parse_publish_date("unknown"), None);
    }

    #[test]
    fn parses_rfc3339_publish_timestamps() {
        let parsed = parse_published_at("2013-05-10T09:00:00Z").unwrap();
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2013, 5, 10)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap()
        );
    }
}
