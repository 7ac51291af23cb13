//! Diesel row models and their conversions to and from domain entities.

pub mod book;
pub mod bookmark;
pub mod category;
pub mod comment;
pub mod config;
pub mod subcategory;
pub mod user;
pub mod video;
pub mod vote;
pub mod website;
