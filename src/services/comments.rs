use crate::auth::AuthenticatedUser;
use crate::domain::category::Category;
use crate::domain::comment::{Comment, NewComment};
use crate::domain::recommendation::{
    Book, RecommendationRef, RecommendationSummary, Video, Website,
};
use crate::domain::subcategory::Subcategory;
use crate::domain::types::{BookId, CommentId, RecommendationKind, VideoId, WebsiteId};
use crate::forms::comments::CommentFormPayload;
use crate::repository::{
    BookReader, CategoryReader, CommentReader, CommentWriter, RecommendationReader,
    SubcategoryReader, UserReader, UserWriter, VideoReader, WebsiteReader,
};

use super::{ServiceError, ServiceResult};

/// A recommendation detail page: the item in its board plus its comments,
/// newest first.
#[derive(Debug)]
pub struct CommentPage<T> {
    pub category: Category,
    pub subcategory: Subcategory,
    pub recommendation: T,
    pub comments: Vec<Comment>,
}

/// Core business logic for rendering a website's comment page.
pub fn show_website_comments<R>(
    website_id: WebsiteId,
    category_slug: &str,
    subcategory_slug: &str,
    repo: &R,
) -> ServiceResult<CommentPage<Website>>
where
    R: CategoryReader + SubcategoryReader + WebsiteReader + CommentReader,
{
    let (category, subcategory) = super::resolve_board(category_slug, subcategory_slug, repo)?;

    let website = match repo.get_website_by_id(website_id) {
        Ok(Some(website)) => website,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get website: {e}");
            return Err(ServiceError::Internal);
        }
    };
    if website.subcategory_id != subcategory.id {
        return Err(ServiceError::NotFound);
    }

    let comments = list_comments(website_id.into(), repo)?;

    Ok(CommentPage {
        category,
        subcategory,
        recommendation: website,
        comments,
    })
}

/// Core business logic for rendering a book's comment page.
pub fn show_book_comments<R>(
    book_id: BookId,
    category_slug: &str,
    subcategory_slug: &str,
    repo: &R,
) -> ServiceResult<CommentPage<Book>>
where
    R: CategoryReader + SubcategoryReader + BookReader + CommentReader,
{
    let (category, subcategory) = super::resolve_board(category_slug, subcategory_slug, repo)?;

    let book = match repo.get_book_by_id(book_id) {
        Ok(Some(book)) => book,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get book: {e}");
            return Err(ServiceError::Internal);
        }
    };
    if book.subcategory_id != subcategory.id {
        return Err(ServiceError::NotFound);
    }

    let comments = list_comments(book_id.into(), repo)?;

    Ok(CommentPage {
        category,
        subcategory,
        recommendation: book,
        comments,
    })
}

/// Core business logic for rendering a video's comment page.
pub fn show_video_comments<R>(
    video_id: VideoId,
    category_slug: &str,
    subcategory_slug: &str,
    repo: &R,
) -> ServiceResult<CommentPage<Video>>
where
    R: CategoryReader + SubcategoryReader + VideoReader + CommentReader,
{
    let (category, subcategory) = super::resolve_board(category_slug, subcategory_slug, repo)?;

    let video = match repo.get_video_by_id(video_id) {
        Ok(Some(video)) => video,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get video: {e}");
            return Err(ServiceError::Internal);
        }
    };
    if video.subcategory_id != subcategory.id {
        return Err(ServiceError::NotFound);
    }

    let comments = list_comments(video_id.into(), repo)?;

    Ok(CommentPage {
        category,
        subcategory,
        recommendation: video,
        comments,
    })
}

fn list_comments<R>(rec: RecommendationRef, repo: &R) -> ServiceResult<Vec<Comment>>
where
    R: CommentReader,
{
    match repo.list_comments(rec) {
        Ok(comments) => Ok(comments),
        Err(e) => {
            log::error!("Failed to list comments: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Core business logic for posting a comment under a recommendation.
pub fn create_comment<R>(
    payload: CommentFormPayload,
    rec: RecommendationRef,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<bool>
where
    R: UserReader + UserWriter + RecommendationReader + CommentWriter,
{
    let member = super::ensure_local_user(user, repo)?;

    match repo.get_recommendation_summary(rec) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get recommendation: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let comment = NewComment::new(rec, member.id, payload.text);
    match repo.create_comment(&comment) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to create comment: {e}");
            Ok(false)
        }
    }
}

/// Fetches a comment for its author, reading anyone else's as missing.
fn owned_comment<R>(
    kind: RecommendationKind,
    comment_id: CommentId,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<(Comment, RecommendationSummary)>
where
    R: UserReader + UserWriter + RecommendationReader + CommentReader,
{
    let member = super::ensure_local_user(user, repo)?;

    let comment = match repo.get_comment_by_id(kind, comment_id) {
        Ok(Some(comment)) => comment,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get comment: {e}");
            return Err(ServiceError::Internal);
        }
    };
    if comment.author_id != member.id {
        return Err(ServiceError::NotFound);
    }

    let summary = match repo.get_recommendation_summary(comment.recommendation) {
        Ok(Some(summary)) => summary,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get recommendation: {e}");
            return Err(ServiceError::Internal);
        }
    };

    Ok((comment, summary))
}

/// Core business logic for rendering the comment edit form.
pub fn show_edit_comment<R>(
    kind: RecommendationKind,
    comment_id: CommentId,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<(Comment, RecommendationSummary)>
where
    R: UserReader + UserWriter + RecommendationReader + CommentReader,
{
    owned_comment(kind, comment_id, user, repo)
}

/// Core business logic for saving an edited comment.
///
/// Returns the comment's recommendation so the route can redirect back to
/// its comment page.
pub fn update_comment<R>(
    payload: CommentFormPayload,
    kind: RecommendationKind,
    comment_id: CommentId,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<(RecommendationSummary, bool)>
where
    R: UserReader + UserWriter + RecommendationReader + CommentReader + CommentWriter,
{
    let (comment, summary) = owned_comment(kind, comment_id, user, repo)?;

    match repo.update_comment(kind, comment_id, comment.author_id, &payload.text) {
        Ok(_) => Ok((summary, true)),
        Err(e) => {
            log::error!("Failed to update comment: {e}");
            Ok((summary, false))
        }
    }
}

/// Core business logic for rendering the comment delete confirmation page.
pub fn show_delete_comment<R>(
    kind: RecommendationKind,
    comment_id: CommentId,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<(Comment, RecommendationSummary)>
where
    R: UserReader + UserWriter + RecommendationReader + CommentReader,
{
    owned_comment(kind, comment_id, user, repo)
}

/// Core business logic for deleting a comment after confirmation.
pub fn delete_comment<R>(
    kind: RecommendationKind,
    comment_id: CommentId,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<(RecommendationSummary, bool)>
where
    R: UserReader + UserWriter + RecommendationReader + CommentReader + CommentWriter,
{
    let (comment, summary) = owned_comment(kind, comment_id, user, repo)?;

    match repo.delete_comment(kind, comment_id, comment.author_id) {
        Ok(_) => Ok((summary, true)),
        Err(e) => {
            log::error!("Failed to delete comment: {e}");
            Ok((summary, false))
        }
    }
}
