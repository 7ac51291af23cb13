use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{Isbn, IsbnError};

#[derive(Clone, Deserialize, Serialize, Validate)]
pub struct NewBookForm {
    #[validate(length(min = 1, max = 17))]
    pub isbn: String,
}

/// Checksum-valid ISBN ready for the catalog lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBookFormPayload {
    pub isbn: Isbn,
}

#[derive(Debug, Error)]
pub enum NewBookFormError {
    #[error("Book form validation failed: {0}")]
    Validation(String),
    /// Carries the user-facing checksum/length/digit message.
    #[error("{0}")]
    Isbn(#[from] IsbnError),
}

impl From<ValidationErrors> for NewBookFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl TryFrom<NewBookForm> for NewBookFormPayload {
    type Error = NewBookFormError;

    fn try_from(value: NewBookForm) -> Result<Self, Self::Error> {
        value.validate()?;

        // Hyphens and spaces are presentation; the checksum runs on digits.
        let compact: String = value
            .isbn
            .chars()
            .filter(|c| !matches!(c, '-' | ' '))
            .collect();

        Ok(Self {
            isbn: Isbn::new(compact)?,
        })
    }
}
