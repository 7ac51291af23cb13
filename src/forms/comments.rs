use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{CommentText, TypeConstraintError};

/// Shared by the comment creation and edit forms.
#[derive(Clone, Deserialize, Serialize, Validate)]
pub struct CommentForm {
    #[validate(length(min = 1, max = 1000))]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentFormPayload {
    pub text: CommentText,
}

#[derive(Debug, Error)]
pub enum CommentFormError {
    #[error("Comment form validation failed: {0}")]
    Validation(String),
    #[error("Comment form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CommentFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CommentFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CommentForm> for CommentFormPayload {
    type Error = CommentFormError;

    fn try_from(value: CommentForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            text: CommentText::new(value.text)?,
        })
    }
}
