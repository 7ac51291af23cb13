use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template};
use crate::services::ServiceError;
use crate::services::profile::show_profile as show_profile_service;

#[get("/user/{username}/")]
pub async fn show_profile(
    params: web::Path<String>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let username = params.into_inner();

    match show_profile_service(&username, repo.get_ref()) {
        Ok(page) => {
            let mut context = base_context(
                &flash_messages,
                user.as_ref(),
                "profile",
                &server_config.login_url,
            );
            context.insert("member", &page.member);
            context.insert("recommendations", &page.recommendations);
            context.insert("bookmarks", &page.bookmarks);
            render_template(&tera, "profile/index.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render profile page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
