use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{BookId, TypeConstraintError, VideoId, WebsiteId};

/// Vote and bookmark requests carry only the target's id; the field name
/// matches what the subcategory page posts.
#[derive(Debug, Error)]
pub enum TargetFormError {
    #[error("Target form validation failed: {0}")]
    Validation(String),
    #[error("Target form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for TargetFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for TargetFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

macro_rules! target_form {
    ($form:ident, $field:ident, $id:ident) => {
        #[derive(Deserialize, Validate)]
        pub struct $form {
            #[validate(range(min = 1))]
            pub $field: i32,
        }

        impl TryFrom<$form> for $id {
            type Error = TargetFormError;

            fn try_from(value: $form) -> Result<Self, Self::Error> {
                value.validate()?;
                Ok($id::new(value.$field)?)
            }
        }
    };
}

target_form!(WebsiteTargetForm, websiteid, WebsiteId);
target_form!(BookTargetForm, bookid, BookId);
target_form!(VideoTargetForm, videoid, VideoId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_typed_id() {
        let form = WebsiteTargetForm { websiteid: 3 };
        let id: WebsiteId = form.try_into().unwrap();
        assert_eq!(id.get(), 3);
    }

    #[test]
    fn rejects_non_positive_id() {
        let form = BookTargetForm { bookid: 0 };
        let id: Result<BookId, _> = form.try_into();
        assert!(id.is_err());
    }
}
