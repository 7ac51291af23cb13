//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, text values and natural keys are enforced at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use url::Url;
use validator::ValidateUrl;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A string exceeded its maximum length.
    #[error("{0} must be at most {1} characters")]
    TooLong(&'static str, usize),
    /// URL validation failed.
    #[error("{0} must be a valid URL")]
    InvalidUrl(&'static str),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        Self::new_for_field(value, "value")
    }

    /// Same as [`Self::new`] but with field-specific error context.
    pub fn new_for_field<S: Into<String>>(
        value: S,
        field: &'static str,
    ) -> Result<Self, TypeConstraintError> {
        trim_and_require_non_empty(value, field).map(Self)
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Deref for NonEmptyString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for NonEmptyString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for NonEmptyString {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for i32 {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new_for_field(value, $field)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

macro_rules! url_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed URL and validates its format.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = trim_and_require_non_empty(value, $field)?;
                if !trimmed.as_str().validate_url() {
                    return Err(TypeConstraintError::InvalidUrl($field));
                }
                Ok(Self(trimmed))
            }

            /// Borrow the URL as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned URL.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

id_newtype!(UserId, "Unique identifier for a user.", "user_id");
id_newtype!(
    CategoryId,
    "Unique identifier for a category.",
    "category_id"
);
id_newtype!(
    SubcategoryId,
    "Unique identifier for a subcategory.",
    "subcategory_id"
);
id_newtype!(
    WebsiteId,
    "Unique identifier for a website recommendation.",
    "website_id"
);
id_newtype!(
    BookId,
    "Unique identifier for a book recommendation.",
    "book_id"
);
id_newtype!(
    VideoId,
    "Unique identifier for a video recommendation.",
    "video_id"
);
id_newtype!(CommentId, "Unique identifier for a comment.", "comment_id");

non_empty_string_newtype!(
    Username,
    "Account name enforcing non-empty values.",
    "username"
);
non_empty_string_newtype!(
    CategoryName,
    "Category name enforcing non-empty values.",
    "category name"
);
non_empty_string_newtype!(
    SubcategoryName,
    "Subcategory name enforcing non-empty values.",
    "subcategory name"
);
non_empty_string_newtype!(
    Title,
    "Recommendation title enforcing non-empty values.",
    "title"
);
non_empty_string_newtype!(
    Description,
    "Recommendation description enforcing non-empty values.",
    "description"
);

url_string_newtype!(ImageUrl, "Image URL.", "image url");
url_string_newtype!(CatalogUrl, "Book catalog page URL.", "catalog url");
url_string_newtype!(VideoUrl, "Video page URL as submitted.", "video url");

/// Website URL natural key.
///
/// Stored lowercased so the per-subcategory duplicate check is
/// case-insensitive regardless of how the URL was typed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct WebsiteUrl(String);

impl WebsiteUrl {
    /// Trims, validates and lowercases a website URL.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "website url")?;
        if !trimmed.as_str().validate_url() {
            return Err(TypeConstraintError::InvalidUrl("website url"));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// Borrow the URL as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned URL.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for WebsiteUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for WebsiteUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for WebsiteUrl {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for WebsiteUrl {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WebsiteUrl> for String {
    fn from(value: WebsiteUrl) -> Self {
        value.0
    }
}

/// URL-safe identifier derived from a display name.
///
/// Lowercase alphanumeric runs joined by single hyphens; everything else is
/// dropped during derivation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Accepts an already-derived slug, rejecting anything that would not
    /// round-trip through [`Slug::from_name`].
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        let derived = slugify(&value);
        if derived.is_empty() || derived != value {
            return Err(TypeConstraintError::InvalidValue(format!("slug: {value}")));
        }
        Ok(Self(value))
    }

    /// Derives a slug from a display name.
    pub fn from_name(name: &str) -> Result<Self, TypeConstraintError> {
        let derived = slugify(name);
        if derived.is_empty() {
            return Err(TypeConstraintError::EmptyString("slug"));
        }
        Ok(Self(derived))
    }

    /// Borrow the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned slug.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Slug {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for Slug {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Slug {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl PartialEq<&str> for Slug {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<Slug> for &str {
    fn eq(&self, other: &Slug) -> bool {
        *self == other.as_str()
    }
}

fn slugify(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_hyphen = false;
    for ch in value.trim().chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_hyphen = true;
        }
    }
    out
}

/// Comment body bounded to the length the comment forms accept.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CommentText(String);

impl CommentText {
    pub const MAX_LEN: usize = 1000;

    /// Trims the text and enforces the 1..=1000 character bound.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "comment text")?;
        if trimmed.chars().count() > Self::MAX_LEN {
            return Err(TypeConstraintError::TooLong("comment text", Self::MAX_LEN));
        }
        Ok(Self(trimmed))
    }

    /// Borrow the text as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned text.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for CommentText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CommentText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for CommentText {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CommentText {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CommentText> for String {
    fn from(value: CommentText) -> Self {
        value.0
    }
}

/// The three recommendation kinds sharing vote/bookmark/comment behaviour.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Website,
    Book,
    Video,
}

impl RecommendationKind {
    /// String representation used in routes and templates.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::Book => "book",
            Self::Video => "video",
        }
    }
}

impl Display for RecommendationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for RecommendationKind {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "website" => Ok(Self::Website),
            "book" => Ok(Self::Book),
            "video" => Ok(Self::Video),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "recommendation kind: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for RecommendationKind {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<RecommendationKind> for String {
    fn from(value: RecommendationKind) -> Self {
        value.as_str().to_string()
    }
}

/// Direction of a vote membership.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// String representation used in persistence.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// The direction this one excludes.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

impl Display for VoteDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for VoteDirection {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "vote direction: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for VoteDirection {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<VoteDirection> for String {
    fn from(value: VoteDirection) -> Self {
        value.as_str().to_string()
    }
}

/// Errors raised while validating an ISBN natural key.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IsbnError {
    #[error("Invalid ISBN: Wrong length")]
    WrongLength,
    #[error("Invalid ISBN: Only numbers are allowed")]
    NonNumeric,
    #[error("Invalid ISBN: Failed checksum")]
    FailedChecksum,
}

/// Validated ISBN-10 or ISBN-13, stored as entered (check digit `x`
/// normalized to uppercase).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Isbn(String);

impl Isbn {
    /// Validates length, character set and checksum.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, IsbnError> {
        let raw = value.into().trim().to_uppercase();
        let bytes = raw.as_bytes();
        match bytes.len() {
            10 => {
                if bytes[..9].iter().any(|b| !b.is_ascii_digit()) {
                    return Err(IsbnError::NonNumeric);
                }
                if bytes[9] != b'X' && !bytes[9].is_ascii_digit() {
                    return Err(IsbnError::NonNumeric);
                }
                if !isbn10_checksum_ok(bytes) {
                    return Err(IsbnError::FailedChecksum);
                }
            }
            13 => {
                if bytes.iter().any(|b| !b.is_ascii_digit()) {
                    return Err(IsbnError::NonNumeric);
                }
                if !isbn13_checksum_ok(bytes) {
                    return Err(IsbnError::FailedChecksum);
                }
            }
            _ => return Err(IsbnError::WrongLength),
        }
        Ok(Self(raw))
    }

    /// Borrow the ISBN as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned ISBN.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Isbn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Isbn {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for Isbn {
    type Error = IsbnError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Isbn {
    type Error = IsbnError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Isbn> for String {
    fn from(value: Isbn) -> Self {
        value.0
    }
}

fn isbn10_checksum_ok(isbn: &[u8]) -> bool {
    let sum: u32 = isbn
        .iter()
        .enumerate()
        .map(|(i, &b)| {
            let digit = if b == b'X' { 10 } else { u32::from(b - b'0') };
            (10 - i as u32) * digit
        })
        .sum();
    sum % 11 == 0
}

fn isbn13_checksum_ok(isbn: &[u8]) -> bool {
    let sum: u32 = isbn
        .iter()
        .enumerate()
        .map(|(i, &b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 0 { digit } else { digit * 3 }
        })
        .sum();
    sum % 10 == 0
}

/// Errors raised while extracting a YouTube video id from a submitted URL.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VideoUrlError {
    #[error("Please make sure the video you are recommending is from YouTube!")]
    NotYoutube,
    #[error("Please make sure the YouTube link is correct and has the video id included!")]
    MissingVideoId,
    #[error("Please make sure the link includes the correct video ID number!")]
    ShortVideoId,
}

/// YouTube video identifier, the natural key for video recommendations.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct YoutubeId(String);

impl YoutubeId {
    /// Wraps an id already extracted from a URL.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let inner = NonEmptyString::new_for_field(value, "youtube id")?;
        Ok(Self(inner.into_inner()))
    }

    /// Extracts the video id from a submitted URL.
    ///
    /// Recognized shapes: `youtube.com/watch?v={id}`, `youtube.com/embed/{id}`,
    /// `youtube.com/v/{id}` and `youtu.be/{id}` (id length >= 11 for the short
    /// form, which would otherwise accept a bare hostname).
    pub fn from_url(url: &str) -> Result<Self, VideoUrlError> {
        let parsed = Url::parse(url.trim()).map_err(|_| VideoUrlError::NotYoutube)?;
        let host = parsed.host_str().ok_or(VideoUrlError::NotYoutube)?;

        if host.contains("youtube") {
            let id = if parsed.path() == "/watch" {
                parsed
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned())
            } else if parsed.path().starts_with("/embed/") || parsed.path().starts_with("/v/") {
                parsed
                    .path()
                    .split('/')
                    .nth(2)
                    .filter(|segment| !segment.is_empty())
                    .map(str::to_string)
            } else {
                None
            };
            return id.map(Self).ok_or(VideoUrlError::MissingVideoId);
        }

        if host.contains("youtu.be") {
            let id = parsed.path().trim_start_matches('/');
            if id.len() >= 11 {
                return Ok(Self(id.to_string()));
            }
            return Err(VideoUrlError::ShortVideoId);
        }

        Err(VideoUrlError::NotYoutube)
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned id.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for YoutubeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for YoutubeId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<YoutubeId> for String {
    fn from(value: YoutubeId) -> Self {
        value.0
    }
}
