use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName, ImageUrl, Slug, TypeConstraintError};

/// Top-level board grouping subcategories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub slug: Slug,
    pub image_url: Option<ImageUrl>,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub slug: Slug,
    pub image_url: Option<ImageUrl>,
    pub created_at: NaiveDateTime,
}

impl NewCategory {
    /// Builds an insertable category, deriving the slug from the name.
    pub fn new(
        name: CategoryName,
        image_url: Option<ImageUrl>,
    ) -> Result<Self, TypeConstraintError> {
        let slug = Slug::from_name(name.as_str())?;
        Ok(Self {
            name,
            slug,
            image_url,
            created_at: chrono::Utc::now().naive_utc(),
        })
    }
}
