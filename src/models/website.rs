use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::recommendation::{NewWebsite as DomainNewWebsite, Website as DomainWebsite};
use crate::domain::types::{Description, ImageUrl, Title, TypeConstraintError, WebsiteUrl};

/// Diesel model representing the `websites` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::websites)]
pub struct Website {
    pub id: i32,
    pub category_id: i32,
    pub subcategory_id: i32,
    pub recommended_by: i32,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Website`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::websites)]
pub struct NewWebsite {
    pub category_id: i32,
    pub subcategory_id: i32,
    pub recommended_by: i32,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Website> for DomainWebsite {
    type Error = TypeConstraintError;

    fn try_from(website: Website) -> Result<Self, Self::Error> {
        Ok(Self {
            id: website.id.try_into()?,
            category_id: website.category_id.try_into()?,
            subcategory_id: website.subcategory_id.try_into()?,
            recommended_by: website.recommended_by.try_into()?,
            title: Title::new(website.title)?,
            description: Description::new(website.description)?,
            url: WebsiteUrl::new(website.url)?,
            image_url: website.image_url.map(ImageUrl::new).transpose()?,
            created_at: website.created_at,
        })
    }
}

impl From<DomainNewWebsite> for NewWebsite {
    fn from(website: DomainNewWebsite) -> Self {
        Self {
            category_id: website.category_id.get(),
            subcategory_id: website.subcategory_id.get(),
            recommended_by: website.recommended_by.get(),
            title: website.title.into_inner(),
            description: website.description.into_inner(),
            url: website.url.into_inner(),
            image_url: website.image_url.map(ImageUrl::into_inner),
            created_at: website.created_at,
        }
    }
}
