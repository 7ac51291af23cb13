use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::subcategory::{
    NewSubcategory as DomainNewSubcategory, Subcategory as DomainSubcategory,
};
use crate::domain::types::{ImageUrl, Slug, SubcategoryName, TypeConstraintError};

/// Diesel model representing the `subcategories` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::subcategories)]
pub struct Subcategory {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Subcategory`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::subcategories)]
pub struct NewSubcategory {
    pub category_id: i32,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Subcategory> for DomainSubcategory {
    type Error = TypeConstraintError;

    fn try_from(subcategory: Subcategory) -> Result<Self, Self::Error> {
        Ok(Self {
            id: subcategory.id.try_into()?,
            category_id: subcategory.category_id.try_into()?,
            name: SubcategoryName::new(subcategory.name)?,
            slug: Slug::new(subcategory.slug)?,
            image_url: subcategory.image_url.map(ImageUrl::new).transpose()?,
            created_at: subcategory.created_at,
        })
    }
}

impl From<DomainNewSubcategory> for NewSubcategory {
    fn from(subcategory: DomainNewSubcategory) -> Self {
        Self {
            category_id: subcategory.category_id.get(),
            name: subcategory.name.into_inner(),
            slug: subcategory.slug.into_inner(),
            image_url: subcategory.image_url.map(ImageUrl::into_inner),
            created_at: subcategory.created_at,
        }
    }
}
