use crate::auth::AuthenticatedUser;
use crate::domain::category::Category;
use crate::domain::recommendation::{RecommendationRef, RecommendationSummary};
use crate::domain::subcategory::Subcategory;
use crate::domain::types::Username;
use crate::domain::user::{NewUser, User};
use crate::repository::{
    CategoryReader, RecommendationReader, SubcategoryReader, UserReader, UserWriter,
};

pub use errors::{ServiceError, ServiceResult};

pub mod comments;
pub mod engagement;
pub mod errors;
pub mod main;
pub mod profile;
pub mod recommendations;
pub mod reports;

/// Resolves a `/{category}/{subcategory}/` slug pair to its entities.
pub(crate) fn resolve_board<R>(
    category_slug: &str,
    subcategory_slug: &str,
    repo: &R,
) -> ServiceResult<(Category, Subcategory)>
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

    let subcategory = match repo.get_subcategory_by_slug(category.id, subcategory_slug) {
        Ok(Some(subcategory)) => subcategory,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get subcategory: {e}");
            return Err(ServiceError::Internal);
        }
    };

    Ok((category, subcategory))
}

/// Loads a recommendation summary and checks it belongs at the addressed
/// board. A mismatched path reads as missing, the same as an unknown id.
pub(crate) fn locate_recommendation<R>(
    rec: RecommendationRef,
    category_slug: &str,
    subcategory_slug: &str,
    repo: &R,
) -> ServiceResult<RecommendationSummary>
where
    R: RecommendationReader,
{
    let summary = match repo.get_recommendation_summary(rec) {
        Ok(Some(summary)) => summary,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get recommendation: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if summary.category_slug.as_str() != category_slug
        || summary.subcategory_slug.as_str() != subcategory_slug
    {
        return Err(ServiceError::NotFound);
    }

    Ok(summary)
}

/// Returns the local account row for the session identity, provisioning it on
/// first sight. Accounts live at the external accounts service; the local
/// table only mirrors members who have interacted here.
pub(crate) fn ensure_local_user<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<User>
where
    R: UserReader + UserWriter,
{
    match repo.get_user_by_username(&user.username) {
        Ok(Some(local)) => return Ok(local),
        Ok(None) => {}
        Err(e) => {
            log::error!("Failed to get user {}: {e}", user.username);
            return Err(ServiceError::Internal);
        }
    }

    let username = Username::new(&user.username).map_err(|e| {
        log::error!("Invalid username in session identity: {e}");
        ServiceError::Internal
    })?;

    if let Err(e) = repo.create_user(&NewUser::new(username, user.email.clone())) {
        log::error!("Failed to provision user {}: {e}", user.username);
        return Err(ServiceError::Internal);
    }

    match repo.get_user_by_username(&user.username) {
        Ok(Some(local)) => Ok(local),
        Ok(None) => {
            log::error!("User {} missing after provisioning", user.username);
            Err(ServiceError::Internal)
        }
        Err(e) => {
            log::error!("Failed to get user {}: {e}", user.username);
            Err(ServiceError::Internal)
        }
    }
}
