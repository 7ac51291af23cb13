use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Serialize;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::domain::category::Category;
use crate::domain::recommendation::{RecommendationRef, RecommendationSummary};
use crate::domain::subcategory::Subcategory;
use crate::domain::types::{BookId, VideoId, WebsiteId};
use crate::enrich::HttpEnricher;
use crate::forms::books::{NewBookForm, NewBookFormPayload};
use crate::forms::videos::{NewVideoForm, NewVideoFormPayload};
use crate::forms::websites::{NewWebsiteForm, NewWebsiteFormPayload};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::recommendations::{
    create_book as create_book_service, create_video as create_video_service,
    create_website as create_website_service,
    delete_recommendation as delete_recommendation_service,
    show_create_form as show_create_form_service,
    show_delete_recommendation as show_delete_recommendation_service,
};
use crate::services::{ServiceError, ServiceResult};

/// Address of the listing a recommendation lives on.
fn subcategory_url(summary: &RecommendationSummary) -> String {
    format!(
        "/category/{}/{}/",
        summary.category_slug, summary.subcategory_slug
    )
}

/// Renders a creation form page. `form` and `error` carry a rejected
/// submission back into the fields.
#[allow(clippy::too_many_arguments)]
fn create_form_response<F: Serialize>(
    result: ServiceResult<(Category, Subcategory)>,
    template: &str,
    form: Option<&F>,
    error: Option<&str>,
    user: &AuthenticatedUser,
    flash_messages: &IncomingFlashMessages,
    server_config: &ServerConfig,
    tera: &Tera,
) -> HttpResponse {
    match result {
        Ok((category, subcategory)) => {
            let mut context = base_context(
                flash_messages,
                Some(user),
                "recommendations",
                &server_config.login_url,
            );
            context.insert("category", &category);
            context.insert("subcategory", &subcategory);
            if let Some(form) = form {
                context.insert("form", form);
            }
            if let Some(error) = error {
                context.insert("error", error);
            }
            render_template(tera, template, &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render creation form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/category/{category_slug}/{subcategory_slug}/new_website/")]
pub async fn show_create_website(
    params: web::Path<(String, String)>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (category_slug, subcategory_slug) = params.into_inner();

    create_form_response::<NewWebsiteForm>(
        show_create_form_service(&category_slug, &subcategory_slug, repo.get_ref()),
        "recommendations/create_website.html",
        None,
        None,
        &user,
        &flash_messages,
        &server_config,
        &tera,
    )
}

#[post("/category/{category_slug}/{subcategory_slug}/new_website/")]
pub async fn create_website(
    params: web::Path<(String, String)>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    enricher: web::Data<HttpEnricher>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<NewWebsiteForm>,
) -> impl Responder {
    let (category_slug, subcategory_slug) = params.into_inner();

    let payload: NewWebsiteFormPayload = match form.clone().try_into() {
        Ok(payload) => payload,
        Err(e) => {
            return create_form_response(
                show_create_form_service(&category_slug, &subcategory_slug, repo.get_ref()),
                "recommendations/create_website.html",
                Some(&form),
                Some(&e.to_string()),
                &user,
                &flash_messages,
                &server_config,
                &tera,
            );
        }
    };

    match create_website_service(
        payload,
        &category_slug,
        &subcategory_slug,
        &user,
        repo.get_ref(),
        enricher.get_ref(),
    )
    .await
    {
        Ok(true) => FlashMessage::success("Website recommended.").send(),
        Ok(false) => FlashMessage::error("Failed to save the recommendation.").send(),
        Err(ServiceError::Form(message)) => {
            return create_form_response(
                show_create_form_service(&category_slug, &subcategory_slug, repo.get_ref()),
                "recommendations/create_website.html",
                Some(&form),
                Some(&message),
                &user,
                &flash_messages,
                &server_config,
                &tera,
            );
        }
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to create website recommendation: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(&format!("/category/{category_slug}/{subcategory_slug}/"))
}

#[get("/category/{category_slug}/{subcategory_slug}/new_book/")]
pub async fn show_create_book(
    params: web::Path<(String, String)>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (category_slug, subcategory_slug) = params.into_inner();

    create_form_response::<NewBookForm>(
        show_create_form_service(&category_slug, &subcategory_slug, repo.get_ref()),
        "recommendations/create_book.html",
        None,
        None,
        &user,
        &flash_messages,
        &server_config,
        &tera,
    )
}

#[post("/category/{category_slug}/{subcategory_slug}/new_book/")]
pub async fn create_book(
    params: web::Path<(String, String)>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    enricher: web::Data<HttpEnricher>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<NewBookForm>,
) -> impl Responder {
    let (category_slug, subcategory_slug) = params.into_inner();

    let payload: NewBookFormPayload = match form.clone().try_into() {
        Ok(payload) => payload,
        Err(e) => {
            return create_form_response(
                show_create_form_service(&category_slug, &subcategory_slug, repo.get_ref()),
                "recommendations/create_book.html",
                Some(&form),
                Some(&e.to_string()),
                &user,
                &flash_messages,
                &server_config,
                &tera,
            );
        }
    };

    match create_book_service(
        payload,
        &category_slug,
        &subcategory_slug,
        &user,
        repo.get_ref(),
        enricher.get_ref(),
    )
    .await
    {
        Ok(true) => FlashMessage::success("Book recommended.").send(),
        Ok(false) => FlashMessage::error("Failed to save the recommendation.").send(),
        Err(ServiceError::Form(message)) => {
            return create_form_response(
                show_create_form_service(&category_slug, &subcategory_slug, repo.get_ref()),
                "recommendations/create_book.html",
                Some(&form),
                Some(&message),
                &user,
                &flash_messages,
                &server_config,
                &tera,
            );
        }
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to create book recommendation: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(&format!("/category/{category_slug}/{subcategory_slug}/"))
}

#[get("/category/{category_slug}/{subcategory_slug}/new_video/")]
pub async fn show_create_video(
    params: web::Path<(String, String)>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (category_slug, subcategory_slug) = params.into_inner();

    create_form_response::<NewVideoForm>(
        show_create_form_service(&category_slug, &subcategory_slug, repo.get_ref()),
        "recommendations/create_video.html",
        None,
        None,
        &user,
        &flash_messages,
        &server_config,
        &tera,
    )
}

#[post("/category/{category_slug}/{subcategory_slug}/new_video/")]
pub async fn create_video(
    params: web::Path<(String, String)>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    enricher: web::Data<HttpEnricher>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<NewVideoForm>,
) -> impl Responder {
    let (category_slug, subcategory_slug) = params.into_inner();

    let payload: NewVideoFormPayload = match form.clone().try_into() {
        Ok(payload) => payload,
        Err(e) => {
            return create_form_response(
                show_create_form_service(&category_slug, &subcategory_slug, repo.get_ref()),
                "recommendations/create_video.html",
                Some(&form),
                Some(&e.to_string()),
                &user,
                &flash_messages,
                &server_config,
                &tera,
            );
        }
    };

    match create_video_service(
        payload,
        &category_slug,
        &subcategory_slug,
        &user,
        repo.get_ref(),
        enricher.get_ref(),
    )
    .await
    {
        Ok(true) => FlashMessage::success("Video recommended.").send(),
        Ok(false) => FlashMessage::error("Failed to save the recommendation.").send(),
        Err(ServiceError::Form(message)) => {
            return create_form_response(
                show_create_form_service(&category_slug, &subcategory_slug, repo.get_ref()),
                "recommendations/create_video.html",
                Some(&form),
                Some(&message),
                &user,
                &flash_messages,
                &server_config,
                &tera,
            );
        }
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to create video recommendation: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(&format!("/category/{category_slug}/{subcategory_slug}/"))
}

#[get("/delete_website/{website_id}/")]
pub async fn show_delete_website(
    params: web::Path<i32>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let website_id = match WebsiteId::new(params.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    match show_delete_recommendation_service(
        RecommendationRef::from(website_id),
        &user,
        repo.get_ref(),
    ) {
        Ok(summary) => {
            let mut context = base_context(
                &flash_messages,
                Some(&user),
                "recommendations",
                &server_config.login_url,
            );
            context.insert("recommendation", &summary);
            render_template(&tera, "recommendations/delete_website.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render delete confirmation: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/delete_website/{website_id}/")]
pub async fn delete_website(
    params: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let website_id = match WebsiteId::new(params.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    match delete_recommendation_service(RecommendationRef::from(website_id), &user, repo.get_ref())
    {
        Ok((summary, true)) => {
            FlashMessage::success("Recommendation deleted.").send();
            redirect(&subcategory_url(&summary))
        }
        Ok((summary, false)) => {
            FlashMessage::error("Failed to delete the recommendation.").send();
            redirect(&subcategory_url(&summary))
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to delete website recommendation: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/delete_book/{book_id}/")]
pub async fn show_delete_book(
    params: web::Path<i32>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let book_id = match BookId::new(params.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    match show_delete_recommendation_service(RecommendationRef::from(book_id), &user, repo.get_ref())
    {
        Ok(summary) => {
            let mut context = base_context(
                &flash_messages,
                Some(&user),
                "recommendations",
                &server_config.login_url,
            );
            context.insert("recommendation", &summary);
            render_template(&tera, "recommendations/delete_book.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render delete confirmation: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/delete_book/{book_id}/")]
pub async fn delete_book(
    params: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let book_id = match BookId::new(params.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    match delete_recommendation_service(RecommendationRef::from(book_id), &user, repo.get_ref()) {
        Ok((summary, true)) => {
            FlashMessage::success("Recommendation deleted.").send();
            redirect(&subcategory_url(&summary))
        }
        Ok((summary, false)) => {
            FlashMessage::error("Failed to delete the recommendation.").send();
            redirect(&subcategory_url(&summary))
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to delete book recommendation: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/delete_video/{video_id}/")]
pub async fn show_delete_video(
    params: web::Path<i32>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let video_id = match VideoId::new(params.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    match show_delete_recommendation_service(
        RecommendationRef::from(video_id),
        &user,
        repo.get_ref(),
    ) {
        Ok(summary) => {
            let mut context = base_context(
                &flash_messages,
                Some(&user),
                "recommendations",
                &server_config.login_url,
            );
            context.insert("recommendation", &summary);
            render_template(&tera, "recommendations/delete_video.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render delete confirmation: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/delete_video/{video_id}/")]
pub async fn delete_video(
    params: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let video_id = match VideoId::new(params.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    match delete_recommendation_service(RecommendationRef::from(video_id), &user, repo.get_ref()) {
        Ok((summary, true)) => {
            FlashMessage::success("Recommendation deleted.").send();
            redirect(&subcategory_url(&summary))
        }
        Ok((summary, false)) => {
            FlashMessage::error("Failed to delete the recommendation.").send();
            redirect(&subcategory_url(&summary))
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to delete video recommendation: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
