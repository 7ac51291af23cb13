use chrono::Utc;

use crate::auth::AuthenticatedUser;
use crate::domain::category::Category;
use crate::domain::recommendation::{
    NaturalKey, NewBook, NewVideo, RecommendationRef, RecommendationSummary,
};
use crate::domain::subcategory::Subcategory;
use crate::domain::types::Title;
use crate::enrich::{BookCatalog, LookupError, PagePreview, VideoLookup};
use crate::forms::books::NewBookFormPayload;
use crate::forms::videos::NewVideoFormPayload;
use crate::forms::websites::NewWebsiteFormPayload;
use crate::repository::{
    BookWriter, CategoryReader, RecommendationReader, RecommendationWriter, SubcategoryReader,
    UserReader, UserWriter, VideoWriter, WebsiteWriter,
};

use super::{ServiceError, ServiceResult};

const DUPLICATE_WEBSITE: &str = "This website has already been recommended!";
const DUPLICATE_BOOK: &str = "This book has already been recommended!";
const DUPLICATE_VIDEO: &str = "This video has already been recommended!";
const MISSING_BOOK: &str = "The Book does not seem to exist! Please check the ISBN and try again.";
const MISSING_VIDEO: &str = "The Video does not seem to exist! Please check the URL and try again.";

/// Core business logic for rendering a creation form page.
pub fn show_create_form<R>(
    category_slug: &str,
    subcategory_slug: &str,
    repo: &R,
) -> ServiceResult<(Category, Subcategory)>
where
    R: CategoryReader + SubcategoryReader,
{
    super::resolve_board(category_slug, subcategory_slug, repo)
}

/// Core business logic for recommending a website.
///
/// The og:image lookup is best effort; a page without one (or an unreachable
/// page) still saves, with no image.
pub async fn create_website<R, P>(
    payload: NewWebsiteFormPayload,
    category_slug: &str,
    subcategory_slug: &str,
    user: &AuthenticatedUser,
    repo: &R,
    preview: &P,
) -> ServiceResult<bool>
where
    R: UserReader
        + UserWriter
        + CategoryReader
        + SubcategoryReader
        + RecommendationReader
        + WebsiteWriter,
    P: PagePreview,
{
    let member = super::ensure_local_user(user, repo)?;
    let (category, subcategory) = super::resolve_board(category_slug, subcategory_slug, repo)?;

    let key = NaturalKey::Url(payload.url.clone());
    match repo.natural_key_exists(category.id, subcategory.id, &key) {
        Ok(false) => {}
        Ok(true) => return Err(ServiceError::Form(DUPLICATE_WEBSITE.into())),
        Err(e) => {
            log::error!("Failed to check for duplicate website: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let image_url = preview.og_image(payload.url.as_str()).await;

    let website = payload.into_new_website(category.id, subcategory.id, member.id, image_url);
    match repo.create_website(&website) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to create website: {e}");
            Ok(false)
        }
    }
}

/// Core business logic for recommending a book.
///
/// Everything beyond the ISBN comes from the catalog; a lookup that fails or
/// matches nothing blocks creation with a retry message.
pub async fn create_book<R, C>(
    payload: NewBookFormPayload,
    category_slug: &str,
    subcategory_slug: &str,
    user: &AuthenticatedUser,
    repo: &R,
    catalog: &C,
) -> ServiceResult<bool>
where
    R: UserReader
        + UserWriter
        + CategoryReader
        + SubcategoryReader
        + RecommendationReader
        + BookWriter,
    C: BookCatalog,
{
    let member = super::ensure_local_user(user, repo)?;
    let (category, subcategory) = super::resolve_board(category_slug, subcategory_slug, repo)?;

    let key = NaturalKey::Isbn(payload.isbn.clone());
    match repo.natural_key_exists(category.id, subcategory.id, &key) {
        Ok(false) => {}
        Ok(true) => return Err(ServiceError::Form(DUPLICATE_BOOK.into())),
        Err(e) => {
            log::error!("Failed to check for duplicate book: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let metadata = match catalog.lookup_isbn(&payload.isbn).await {
        Ok(metadata) => metadata,
        Err(LookupError::NoMatch) => return Err(ServiceError::Form(MISSING_BOOK.into())),
        Err(e) => {
            log::error!("Book lookup failed: {e}");
            return Err(ServiceError::Form(MISSING_BOOK.into()));
        }
    };
    let title = match Title::new(metadata.title) {
        Ok(title) => title,
        Err(_) => return Err(ServiceError::Form(MISSING_BOOK.into())),
    };

    let book = NewBook {
        category_id: category.id,
        subcategory_id: subcategory.id,
        recommended_by: member.id,
        isbn: payload.isbn,
        title,
        author: metadata.author,
        description: metadata.description,
        url: metadata.url,
        image_url: metadata.image_url,
        publish_date: metadata.publish_date,
        created_at: Utc::now().naive_utc(),
    };
    match repo.create_book(&book) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to create book: {e}");
            Ok(false)
        }
    }
}

/// Core business logic for recommending a video.
///
/// The id extracted from the submitted URL drives the lookup; title,
/// description and thumbnail come from the video platform.
pub async fn create_video<R, V>(
    payload: NewVideoFormPayload,
    category_slug: &str,
    subcategory_slug: &str,
    user: &AuthenticatedUser,
    repo: &R,
    lookup: &V,
) -> ServiceResult<bool>
where
    R: UserReader
        + UserWriter
        + CategoryReader
        + SubcategoryReader
        + RecommendationReader
        + VideoWriter,
    V: VideoLookup,
{
    let member = super::ensure_local_user(user, repo)?;
    let (category, subcategory) = super::resolve_board(category_slug, subcategory_slug, repo)?;

    let key = NaturalKey::Video(payload.youtube_id.clone());
    match repo.natural_key_exists(category.id, subcategory.id, &key) {
        Ok(false) => {}
        Ok(true) => return Err(ServiceError::Form(DUPLICATE_VIDEO.into())),
        Err(e) => {
            log::error!("Failed to check for duplicate video: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let metadata = match lookup.lookup_video(&payload.youtube_id).await {
        Ok(metadata) => metadata,
        Err(LookupError::NoMatch) => return Err(ServiceError::Form(MISSING_VIDEO.into())),
        Err(e) => {
            log::error!("Video lookup failed: {e}");
            return Err(ServiceError::Form(MISSING_VIDEO.into()));
        }
    };
    let title = match Title::new(metadata.title) {
        Ok(title) => title,
        Err(_) => return Err(ServiceError::Form(MISSING_VIDEO.into())),
    };

    let video = NewVideo {
        category_id: category.id,
        subcategory_id: subcategory.id,
        recommended_by: member.id,
        youtube_id: payload.youtube_id,
        title,
        description: metadata.description,
        url: payload.url,
        image_url: metadata.image_url,
        published_at: metadata.published_at,
        created_at: Utc::now().naive_utc(),
    };
    match repo.create_video(&video) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to create video: {e}");
            Ok(false)
        }
    }
}

/// Core business logic for the delete confirmation page.
///
/// Only the member who recommended an item may delete it; anyone else reads
/// it as missing.
pub fn show_delete_recommendation<R>(
    rec: RecommendationRef,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<RecommendationSummary>
where
    R: UserReader + UserWriter + RecommendationReader,
{
    let member = super::ensure_local_user(user, repo)?;

    let summary = match repo.get_recommendation_summary(rec) {
        Ok(Some(summary)) => summary,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get recommendation: {e}");
            return Err(ServiceError::Internal);
        }
    };
    if summary.recommended_by != member.id {
        return Err(ServiceError::NotFound);
    }

    Ok(summary)
}

/// Core business logic for deleting a recommendation after confirmation.
///
/// Returns the summary so the route can redirect back to the listing the
/// item lived on.
pub fn delete_recommendation<R>(
    rec: RecommendationRef,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<(RecommendationSummary, bool)>
where
    R: UserReader + UserWriter + RecommendationReader + RecommendationWriter,
{
    let summary = show_delete_recommendation(rec, user, repo)?;

    match repo.delete_recommendation(rec, summary.recommended_by) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok((summary, true)),
        Err(e) => {
            log::error!("Failed to delete recommendation: {e}");
            Ok((summary, false))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::recommendation::{Book, Website};
    use crate::domain::subcategory::Subcategory;
    use crate::domain::types::{
        BookId, CategoryId, CategoryName, Description, ImageUrl, Isbn, Slug, SubcategoryId,
        SubcategoryName, UserId, Username, VideoId, VideoUrl, VoteDirection, WebsiteId,
        WebsiteUrl, YoutubeId,
    };
    use crate::domain::user::User;
    use crate::enrich::{BookMetadata, VideoMetadata};
    use crate::repository::{BookReader, VideoReader, VoteReader, WebsiteReader};
    use crate::repository::test::TestRepository;
    use chrono::{DateTime, NaiveDate};

    struct StubPreview(Option<ImageUrl>);

    impl PagePreview for StubPreview {
        async fn og_image(&self, _url: &str) -> Option<ImageUrl> {
            self.0.clone()
        }
    }

    struct StubCatalog(Option<BookMetadata>);

    impl BookCatalog for StubCatalog {
        async fn lookup_isbn(&self, _isbn: &Isbn) -> Result<BookMetadata, LookupError> {
            self.0.clone().ok_or(LookupError::NoMatch)
        }
    }

    struct StubLookup(Option<VideoMetadata>);

    impl VideoLookup for StubLookup {
        async fn lookup_video(&self, _id: &YoutubeId) -> Result<VideoMetadata, LookupError> {
            self.0.clone().ok_or(LookupError::NoMatch)
        }
    }

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".into(),
            username: "testuser1".into(),
            email: "test@example.com".into(),
            exp: 0,
        }
    }

    fn sample_member(id: i32, username: &str) -> User {
        User {
            id: UserId::new(id).unwrap(),
            username: Username::new(username).unwrap(),
            email: format!("{username}@example.com"),
            joined_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    fn sample_repo() -> TestRepository {
        let created_at = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        TestRepository::new(
            vec![Category {
                id: CategoryId::new(1).unwrap(),
                name: CategoryName::new("Python").unwrap(),
                slug: Slug::new("python").unwrap(),
                image_url: None,
                created_at,
            }],
            vec![
                Subcategory {
                    id: SubcategoryId::new(1).unwrap(),
                    category_id: CategoryId::new(1).unwrap(),
                    name: SubcategoryName::new("Django").unwrap(),
                    slug: Slug::new("django").unwrap(),
                    image_url: None,
                    created_at,
                },
                Subcategory {
                    id: SubcategoryId::new(2).unwrap(),
                    category_id: CategoryId::new(1).unwrap(),
                    name: SubcategoryName::new("Flask").unwrap(),
                    slug: Slug::new("flask").unwrap(),
                    image_url: None,
                    created_at,
                },
            ],
        )
    }

    fn sample_website(id: i32, recommended_by: i32, url: &str) -> Website {
        Website {
            id: WebsiteId::new(id).unwrap(),
            category_id: CategoryId::new(1).unwrap(),
            subcategory_id: SubcategoryId::new(1).unwrap(),
            recommended_by: UserId::new(recommended_by).unwrap(),
            title: Title::new("Django Docs").unwrap(),
            description: Description::new("The official documentation").unwrap(),
            url: WebsiteUrl::new(url).unwrap(),
            image_url: None,
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    fn sample_book(id: i32, isbn: &str) -> Book {
        Book {
            id: BookId::new(id).unwrap(),
            category_id: CategoryId::new(1).unwrap(),
            subcategory_id: SubcategoryId::new(1).unwrap(),
            recommended_by: UserId::new(1).unwrap(),
            isbn: Isbn::new(isbn).unwrap(),
            title: Title::new("Two Scoops of Django").unwrap(),
            author: "Daniel Roy Greenfeld".into(),
            description: "Best practices".into(),
            url: None,
            image_url: None,
            publish_date: None,
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    fn website_payload(url: &str) -> NewWebsiteFormPayload {
        NewWebsiteFormPayload {
            title: Title::new("Django Docs").unwrap(),
            description: Description::new("The official documentation").unwrap(),
            url: WebsiteUrl::new(url).unwrap(),
        }
    }

    fn book_payload(isbn: &str) -> NewBookFormPayload {
        NewBookFormPayload {
            isbn: Isbn::new(isbn).unwrap(),
        }
    }

    fn video_payload(url: &str) -> NewVideoFormPayload {
        NewVideoFormPayload {
            url: VideoUrl::new(url).unwrap(),
            youtube_id: YoutubeId::from_url(url).unwrap(),
        }
    }

    fn book_metadata() -> BookMetadata {
        BookMetadata {
            title: "Automate the Boring Stuff with Python".into(),
            author: "Al Sweigart".into(),
            description: "Practical programming for total beginners".into(),
            url: None,
            image_url: None,
            publish_date: NaiveDate::from_ymd_opt(2015, 4, 14),
        }
    }

    fn video_metadata() -> VideoMetadata {
        VideoMetadata {
            title: "Django Crash Course".into(),
            description: "From zero to deployed".into(),
            image_url: Some(ImageUrl::new("https://img.example.com/high.jpg").unwrap()),
            published_at: None,
        }
    }

    #[actix_web::test]
    async fn creates_website_with_preview_image() {
        let repo = sample_repo();
        let user = sample_user();
        let preview = StubPreview(Some(ImageUrl::new("https://example.com/og.png").unwrap()));

        let saved = create_website(
            website_payload("https://example.com/guide"),
            "python",
            "django",
            &user,
            &repo,
            &preview,
        )
        .await
        .unwrap();

        assert!(saved);
        let website = repo
            .get_website_by_id(WebsiteId::new(1).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(website.subcategory_id, 1);
        assert_eq!(website.recommended_by, 1);
        assert_eq!(
            website.image_url,
            Some(ImageUrl::new("https://example.com/og.png").unwrap())
        );
    }

    #[actix_web::test]
    async fn missing_preview_image_does_not_block_creation() {
        let repo = sample_repo();
        let user = sample_user();

        let saved = create_website(
            website_payload("https://example.com/guide"),
            "python",
            "django",
            &user,
            &repo,
            &StubPreview(None),
        )
        .await
        .unwrap();

        assert!(saved);
        let website = repo
            .get_website_by_id(WebsiteId::new(1).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(website.image_url, None);
    }

    #[actix_web::test]
    async fn duplicate_website_is_rejected() {
        let repo = sample_repo()
            .with_users(vec![sample_member(1, "testuser1")])
            .with_websites(vec![sample_website(1, 1, "http://example.com/django")]);
        let user = sample_user();

        let err = create_website(
            website_payload("http://EXAMPLE.com/Django"),
            "python",
            "django",
            &user,
            &repo,
            &StubPreview(None),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err,
            ServiceError::Form("This website has already been recommended!".into())
        );
    }

    #[actix_web::test]
    async fn same_website_is_allowed_on_another_board() {
        let repo = sample_repo()
            .with_users(vec![sample_member(1, "testuser1")])
            .with_websites(vec![sample_website(1, 1, "http://example.com/django")]);
        let user = sample_user();

        let saved = create_website(
            website_payload("http://example.com/django"),
            "python",
            "flask",
            &user,
            &repo,
            &StubPreview(None),
        )
        .await
        .unwrap();

        assert!(saved);
    }

    #[actix_web::test]
    async fn creates_book_from_catalog_metadata() {
        let repo = sample_repo();
        let user = sample_user();
        let catalog = StubCatalog(Some(book_metadata()));

        let saved = create_book(
            book_payload("1593275994"),
            "python",
            "django",
            &user,
            &repo,
            &catalog,
        )
        .await
        .unwrap();

        assert!(saved);
        let book = repo
            .get_book_by_id(BookId::new(1).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(book.title.as_str(), "Automate the Boring Stuff with Python");
        assert_eq!(book.author, "Al Sweigart");
        assert_eq!(book.publish_date, NaiveDate::from_ymd_opt(2015, 4, 14));
    }

    #[actix_web::test]
    async fn unmatched_isbn_blocks_creation() {
        let repo = sample_repo();
        let user = sample_user();

        let err = create_book(
            book_payload("1593275994"),
            "python",
            "django",
            &user,
            &repo,
            &StubCatalog(None),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err,
            ServiceError::Form(
                "The Book does not seem to exist! Please check the ISBN and try again.".into()
            )
        );
    }

    #[actix_web::test]
    async fn duplicate_book_is_rejected() {
        let repo = sample_repo()
            .with_users(vec![sample_member(1, "testuser1")])
            .with_books(vec![sample_book(1, "1593276036")]);
        let user = sample_user();

        let err = create_book(
            book_payload("1593276036"),
            "python",
            "django",
            &user,
            &repo,
            &StubCatalog(Some(book_metadata())),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err,
            ServiceError::Form("This book has already been recommended!".into())
        );
    }

    #[actix_web::test]
    async fn creates_video_from_lookup_metadata() {
        let repo = sample_repo();
        let user = sample_user();
        let lookup = StubLookup(Some(video_metadata()));

        let saved = create_video(
            video_payload("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            "python",
            "django",
            &user,
            &repo,
            &lookup,
        )
        .await
        .unwrap();

        assert!(saved);
        let video = repo
            .get_video_by_id(VideoId::new(1).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(video.youtube_id.as_str(), "dQw4w9WgXcQ");
        assert_eq!(video.title.as_str(), "Django Crash Course");
        assert_eq!(
            video.url.as_str(),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }

    #[actix_web::test]
    async fn unmatched_video_blocks_creation() {
        let repo = sample_repo();
        let user = sample_user();

        let err = create_video(
            video_payload("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            "python",
            "django",
            &user,
            &repo,
            &StubLookup(None),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err,
            ServiceError::Form(
                "The Video does not seem to exist! Please check the URL and try again.".into()
            )
        );
    }

    #[test]
    fn delete_requires_the_recommending_member() {
        let repo = sample_repo()
            .with_users(vec![sample_member(5, "other")])
            .with_websites(vec![sample_website(1, 5, "http://example.com/django")]);
        let user = sample_user();
        let rec = RecommendationRef::from(WebsiteId::new(1).unwrap());

        let err = show_delete_recommendation(rec, &user, &repo).unwrap_err();

        assert!(matches!(err, ServiceError::NotFound));
    }

    #[test]
    fn deletes_own_recommendation_and_its_engagement() {
        let rec = RecommendationRef::from(WebsiteId::new(1).unwrap());
        let repo = sample_repo()
            .with_users(vec![
                sample_member(1, "testuser1"),
                sample_member(2, "other"),
            ])
            .with_websites(vec![sample_website(1, 1, "http://example.com/django")])
            .with_votes(vec![(rec, UserId::new(2).unwrap(), VoteDirection::Up)]);
        let user = sample_user();

        let summary = show_delete_recommendation(rec, &user, &repo).unwrap();
        assert_eq!(summary.title.as_str(), "Django Docs");

        let (summary, deleted) = delete_recommendation(rec, &user, &repo).unwrap();

        assert!(deleted);
        assert_eq!(summary.category_slug, "python");
        assert!(
            repo.get_website_by_id(WebsiteId::new(1).unwrap())
                .unwrap()
                .is_none()
        );
        assert_eq!(repo.total_votes(rec).unwrap(), 0);
    }

    #[test]
    fn deleting_missing_recommendation_is_not_found() {
        let repo = sample_repo();
        let user = sample_user();
        let rec = RecommendationRef::from(WebsiteId::new(9).unwrap());

        let err = delete_recommendation(rec, &user, &repo).unwrap_err();

        assert!(matches!(err, ServiceError::NotFound));
    }
}
