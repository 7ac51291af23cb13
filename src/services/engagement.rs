use crate::auth::AuthenticatedUser;
use crate::domain::recommendation::RecommendationRef;
use crate::domain::types::VoteDirection;
use crate::repository::{
    BookmarkWriter, RecommendationReader, UserReader, UserWriter, VoteWriter,
};

use super::{ServiceError, ServiceResult};

/// Core business logic for casting a vote from a listing page.
///
/// Repeating a vote retracts it; voting the other way replaces it. Returns
/// the recommendation's new vote total.
pub fn toggle_vote<R>(
    rec: RecommendationRef,
    direction: VoteDirection,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<i64>
where
    R: UserReader + UserWriter + RecommendationReader + VoteWriter,
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

    match repo.toggle_vote(rec, member.id, direction) {
        Ok(total) => Ok(total),
        Err(e) => {
            log::error!("Failed to toggle vote: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Core business logic for saving a recommendation to the user's profile.
///
/// Returns `true` when the bookmark is now set, `false` when the toggle
/// removed it.
pub fn toggle_bookmark<R>(
    rec: RecommendationRef,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<bool>
where
    R: UserReader + UserWriter + RecommendationReader + BookmarkWriter,
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

    match repo.toggle_bookmark(rec, member.id) {
        Ok(saved) => Ok(saved),
        Err(e) => {
            log::error!("Failed to toggle bookmark: {e}");
            Err(ServiceError::Internal)
        }
    }
}
