use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use chrono::Utc;
use serde::Deserialize;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template};
use crate::services::ServiceError;
use crate::services::main::{
    show_category as show_category_service, show_index as show_index_service,
    show_subcategory as show_subcategory_service,
};

/// Query parameters the subcategory listing understands. Both come from
/// plain GET forms, so missing and empty are equivalent.
#[derive(Deserialize)]
pub struct ListingQueryParams {
    pub time_filter: Option<String>,
    pub search_box: Option<String>,
}

#[get("/")]
pub async fn index(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_index_service(repo.get_ref()) {
        Ok(categories) => {
            let mut context = base_context(
                &flash_messages,
                user.as_ref(),
                "index",
                &server_config.login_url,
            );
            context.insert("categories", &categories);
            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render index page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/category/{category_slug}/")]
pub async fn show_category(
    params: web::Path<String>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let category_slug = params.into_inner();

    match show_category_service(&category_slug, repo.get_ref()) {
        Ok((category, subcategories)) => {
            let mut context = base_context(
                &flash_messages,
                user.as_ref(),
                "category",
                &server_config.login_url,
            );
            context.insert("category", &category);
            context.insert("subcategories", &subcategories);
            render_template(&tera, "main/category.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render category page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/category/{category_slug}/{subcategory_slug}/")]
pub async fn show_subcategory(
    params: web::Path<(String, String)>,
    query: web::Query<ListingQueryParams>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (category_slug, subcategory_slug) = params.into_inner();

    match show_subcategory_service(
        &category_slug,
        &subcategory_slug,
        query.time_filter.as_deref(),
        query.search_box.as_deref(),
        Utc::now().naive_utc(),
        repo.get_ref(),
    ) {
        Ok(listing) => {
            let mut context = base_context(
                &flash_messages,
                user.as_ref(),
                "subcategory",
                &server_config.login_url,
            );
            context.insert("category", &listing.category);
            context.insert("subcategory", &listing.subcategory);
            context.insert("time_filter", listing.filter.as_str());
            context.insert("search", &listing.search);
            context.insert("websites", &listing.websites);
            context.insert("books", &listing.books);
            context.insert("videos", &listing.videos);
            render_template(&tera, "main/subcategory.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render subcategory page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
