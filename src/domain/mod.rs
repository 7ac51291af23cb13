//! Pure domain entities and value objects, free of persistence concerns.

pub mod category;
pub mod comment;
pub mod recommendation;
pub mod subcategory;
pub mod types;
pub mod user;
