use crate::domain::recommendation::RecommendationSummary;
use crate::domain::user::User;
use crate::repository::{RecommendationReader, UserReader};

use super::{ServiceError, ServiceResult};

/// A member's public profile: their recommendations across all kinds plus
/// everything they bookmarked, both newest first.
#[derive(Debug)]
pub struct ProfilePage {
    pub member: User,
    pub recommendations: Vec<RecommendationSummary>,
    pub bookmarks: Vec<RecommendationSummary>,
}

/// Core business logic for rendering a member's profile page.
pub fn show_profile<R>(username: &str, repo: &R) -> ServiceResult<ProfilePage>
where
    R: UserReader + RecommendationReader,
{
    let member = match repo.get_user_by_username(username) {
        Ok(Some(member)) => member,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get user: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let recommendations = match repo.list_recommendations_by_user(member.id) {
        Ok(recommendations) => recommendations,
        Err(e) => {
            log::error!("Failed to list recommendations: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let bookmarks = match repo.list_bookmarks_by_user(member.id) {
        Ok(bookmarks) => bookmarks,
        Err(e) => {
            log::error!("Failed to list bookmarks: {e}");
            return Err(ServiceError::Internal);
        }
    };

    Ok(ProfilePage {
        member,
        recommendations,
        bookmarks,
    })
}
