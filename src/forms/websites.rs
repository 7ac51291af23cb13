use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::recommendation::NewWebsite;
use crate::domain::types::{
    CategoryId, Description, ImageUrl, SubcategoryId, Title, TypeConstraintError, UserId,
    WebsiteUrl,
};

#[derive(Clone, Deserialize, Serialize, Validate)]
pub struct NewWebsiteForm {
    #[validate(length(min = 1, max = 128))]
    pub title: String,
    #[validate(length(min = 1, max = 300))]
    pub description: String,
    #[validate(length(min = 1, max = 200))]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWebsiteFormPayload {
    pub title: Title,
    pub description: Description,
    /// Lowercased on construction; the natural key is case-insensitive.
    pub url: WebsiteUrl,
}

impl NewWebsiteFormPayload {
    pub fn into_new_website(
        self,
        category_id: CategoryId,
        subcategory_id: SubcategoryId,
        recommended_by: UserId,
        image_url: Option<ImageUrl>,
    ) -> NewWebsite {
        NewWebsite {
            category_id,
            subcategory_id,
            recommended_by,
            title: self.title,
            description: self.description,
            url: self.url,
            image_url,
            created_at: Utc::now().naive_utc(),
        }
    }
}

#[derive(Debug, Error)]
pub enum NewWebsiteFormError {
    #[error("Website form validation failed: {0}")]
    Validation(String),
    #[error("Website form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for NewWebsiteFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for NewWebsiteFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<NewWebsiteForm> for NewWebsiteFormPayload {
    type Error = NewWebsiteFormError;

    fn try_from(value: NewWebsiteForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            title: Title::new(value.title)?,
            description: Description::new(value.description)?,
            url: WebsiteUrl::new(super::assume_http(&value.url))?,
        })
    }
}
