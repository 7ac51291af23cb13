use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::recommendation::{Book as DomainBook, NewBook as DomainNewBook};
use crate::domain::types::{CatalogUrl, ImageUrl, Isbn, Title, TypeConstraintError};

/// Diesel model representing the `books` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::books)]
pub struct Book {
    pub id: i32,
    pub category_id: i32,
    pub subcategory_id: i32,
    pub recommended_by: i32,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub publish_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Book`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::books)]
pub struct NewBook {
    pub category_id: i32,
    pub subcategory_id: i32,
    pub recommended_by: i32,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub publish_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Book> for DomainBook {
    type Error = TypeConstraintError;

    fn try_from(book: Book) -> Result<Self, Self::Error> {
        Ok(Self {
            id: book.id.try_into()?,
            category_id: book.category_id.try_into()?,
            subcategory_id: book.subcategory_id.try_into()?,
            recommended_by: book.recommended_by.try_into()?,
            isbn: Isbn::new(book.isbn)
                .map_err(|err| TypeConstraintError::InvalidValue(err.to_string()))?,
            title: Title::new(book.title)?,
            author: book.author,
            description: book.description,
            url: book.url.map(CatalogUrl::new).transpose()?,
            image_url: book.image_url.map(ImageUrl::new).transpose()?,
            publish_date: book.publish_date,
            created_at: book.created_at,
        })
    }
}

impl From<DomainNewBook> for NewBook {
    fn from(book: DomainNewBook) -> Self {
        Self {
            category_id: book.category_id.get(),
            subcategory_id: book.subcategory_id.get(),
            recommended_by: book.recommended_by.get(),
            isbn: book.isbn.into_inner(),
            title: book.title.into_inner(),
            author: book.author,
            description: book.description,
            url: book.url.map(CatalogUrl::into_inner),
            image_url: book.image_url.map(ImageUrl::into_inner),
            publish_date: book.publish_date,
            created_at: book.created_at,
        }
    }
}
