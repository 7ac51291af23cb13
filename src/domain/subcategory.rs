use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryId, ImageUrl, Slug, SubcategoryId, SubcategoryName, TypeConstraintError,
};

/// A board within a category; recommendations attach here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub category_id: CategoryId,
    pub name: SubcategoryName,
    pub slug: Slug,
    pub image_url: Option<ImageUrl>,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`Subcategory`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSubcategory {
    pub category_id: CategoryId,
    pub name: SubcategoryName,
    pub slug: Slug,
    pub image_url: Option<ImageUrl>,
    pub created_at: NaiveDateTime,
}

impl NewSubcategory {
    /// Builds an insertable subcategory, deriving the slug from the name.
    pub fn new(
        category_id: CategoryId,
        name: SubcategoryName,
        image_url: Option<ImageUrl>,
    ) -> Result<Self, TypeConstraintError> {
        let slug = Slug::from_name(name.as_str())?;
        Ok(Self {
            category_id,
            name,
            slug,
            image_url,
            created_at: chrono::Utc::now().naive_utc(),
        })
    }
}
