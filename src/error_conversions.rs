//! Error conversion glue between the domain, form, repository and service
//! layers.
//!
//! The domain layer must not depend on service/repository error types, so the
//! conversions live here instead of next to the types they connect.

use crate::domain::types::TypeConstraintError;
use crate::forms::books::NewBookFormError;
use crate::forms::comments::CommentFormError;
use crate::forms::engagement::TargetFormError;
use crate::forms::videos::NewVideoFormError;
use crate::forms::websites::NewWebsiteFormError;
use crate::repository::errors::RepositoryError;
use crate::services::errors::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::Validation(val.to_string())
    }
}

impl From<NewWebsiteFormError> for ServiceError {
    fn from(val: NewWebsiteFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<NewBookFormError> for ServiceError {
    fn from(val: NewBookFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<NewVideoFormError> for ServiceError {
    fn from(val: NewVideoFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<CommentFormError> for ServiceError {
    fn from(val: CommentFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<TargetFormError> for ServiceError {
    fn from(val: TargetFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
