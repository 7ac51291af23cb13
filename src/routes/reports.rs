use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::domain::recommendation::RecommendationRef;
use crate::domain::types::{BookId, VideoId, WebsiteId};
use crate::mailer::HttpMailer;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::reports::{
    send_report as send_report_service, show_report_form as show_report_form_service,
};

/// The report form submits back to its own URL as a GET, so the message
/// arrives as a query parameter.
#[derive(Deserialize)]
pub struct ReportQueryParams {
    pub message_box: Option<String>,
}

/// Renders the form when no message was submitted yet, otherwise mails the
/// report and returns to the listing.
#[allow(clippy::too_many_arguments)]
async fn report_response(
    rec: RecommendationRef,
    category_slug: &str,
    subcategory_slug: &str,
    template: &str,
    message: Option<&str>,
    user: &AuthenticatedUser,
    flash_messages: &IncomingFlashMessages,
    repo: &DieselRepository,
    mailer: &HttpMailer,
    server_config: &ServerConfig,
    tera: &Tera,
) -> HttpResponse {
    let message = message.map(str::trim);

    if message.is_none() || message == Some("") {
        return match show_report_form_service(rec, category_slug, subcategory_slug, repo) {
            Ok(summary) => {
                let mut context =
                    base_context(flash_messages, Some(user), "reports", &server_config.login_url);
                context.insert("recommendation", &summary);
                if message.is_some() {
                    context.insert("error", "This field is required.");
                }
                render_template(tera, template, &context)
            }
            Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
            Err(err) => {
                log::error!("Failed to render report form: {err}");
                HttpResponse::InternalServerError().finish()
            }
        };
    }

    let message = message.unwrap_or_default();
    match send_report_service(
        rec,
        category_slug,
        subcategory_slug,
        message,
        user,
        repo,
        mailer,
    )
    .await
    {
        Ok((_, true)) => FlashMessage::success("Report sent. Thank you!").send(),
        Ok((_, false)) => FlashMessage::error("Failed to send the report.").send(),
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to send report: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(&format!("/category/{category_slug}/{subcategory_slug}/"))
}

#[get("/category/{category_slug}/{subcategory_slug}/{website_id}/report_website_recommendation/")]
pub async fn report_website(
    params: web::Path<(String, String, i32)>,
    query: web::Query<ReportQueryParams>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    mailer: web::Data<HttpMailer>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (category_slug, subcategory_slug, website_id) = params.into_inner();
    let website_id = match WebsiteId::new(website_id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    report_response(
        RecommendationRef::from(website_id),
        &category_slug,
        &subcategory_slug,
        "reports/report_website_recommendation.html",
        query.message_box.as_deref(),
        &user,
        &flash_messages,
        repo.get_ref(),
        mailer.get_ref(),
        &server_config,
        &tera,
    )
    .await
}

#[get("/category/{category_slug}/{subcategory_slug}/{book_id}/report_book_recommendation/")]
pub async fn report_book(
    params: web::Path<(String, String, i32)>,
    query: web::Query<ReportQueryParams>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    mailer: web::Data<HttpMailer>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (category_slug, subcategory_slug, book_id) = params.into_inner();
    let book_id = match BookId::new(book_id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    report_response(
        RecommendationRef::from(book_id),
        &category_slug,
        &subcategory_slug,
        "reports/report_book_recommendation.html",
        query.message_box.as_deref(),
        &user,
        &flash_messages,
        repo.get_ref(),
        mailer.get_ref(),
        &server_config,
        &tera,
    )
    .await
}

#[get("/category/{category_slug}/{subcategory_slug}/{video_id}/report_video_recommendation/")]
pub async fn report_video(
    params: web::Path<(String, String, i32)>,
    query: web::Query<ReportQueryParams>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    mailer: web::Data<HttpMailer>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (category_slug, subcategory_slug, video_id) = params.into_inner();
    let video_id = match VideoId::new(video_id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    report_response(
        RecommendationRef::from(video_id),
        &category_slug,
        &subcategory_slug,
        "reports/report_video_recommendation.html",
        query.message_box.as_deref(),
        &user,
        &flash_messages,
        repo.get_ref(),
        mailer.get_ref(),
        &server_config,
        &tera,
    )
    .await
}
