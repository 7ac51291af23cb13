use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Serialize;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::domain::comment::Comment;
use crate::domain::recommendation::{RecommendationRef, RecommendationSummary};
use crate::domain::types::{BookId, CommentId, RecommendationKind, VideoId, WebsiteId};
use crate::forms::comments::{CommentForm, CommentFormPayload};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::comments::{
    CommentPage, create_comment as create_comment_service,
    delete_comment as delete_comment_service, show_book_comments as show_book_comments_service,
    show_delete_comment as show_delete_comment_service,
    show_edit_comment as show_edit_comment_service,
    show_video_comments as show_video_comments_service,
    show_website_comments as show_website_comments_service,
    update_comment as update_comment_service,
};
use crate::services::{ServiceError, ServiceResult};

/// Address of the comment listing a comment belongs to.
fn comment_page_url(summary: &RecommendationSummary) -> String {
    format!(
        "/category/{}/{}/{}/{}_comment/",
        summary.category_slug, summary.subcategory_slug, summary.id, summary.kind
    )
}

/// Renders a comment listing page. `form_text` and `error` carry a rejected
/// submission back into the comment box.
#[allow(clippy::too_many_arguments)]
fn comment_page_response<T: Serialize>(
    result: ServiceResult<CommentPage<T>>,
    template: &str,
    form_text: Option<&str>,
    error: Option<&str>,
    user: Option<&AuthenticatedUser>,
    flash_messages: &IncomingFlashMessages,
    server_config: &ServerConfig,
    tera: &Tera,
) -> HttpResponse {
    match result {
        Ok(page) => {
            let mut context =
                base_context(flash_messages, user, "comments", &server_config.login_url);
            context.insert("category", &page.category);
            context.insert("subcategory", &page.subcategory);
            context.insert("recommendation", &page.recommendation);
            context.insert("comments", &page.comments);
            context.insert("form_text", &form_text.unwrap_or_default());
            if let Some(error) = error {
                context.insert("error", error);
            }
            render_template(tera, template, &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render comment page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Renders an edit or delete confirmation page for one of the member's own
/// comments.
#[allow(clippy::too_many_arguments)]
fn owned_comment_response(
    result: ServiceResult<(Comment, RecommendationSummary)>,
    template: &str,
    form_text: Option<&str>,
    error: Option<&str>,
    user: &AuthenticatedUser,
    flash_messages: &IncomingFlashMessages,
    server_config: &ServerConfig,
    tera: &Tera,
) -> HttpResponse {
    match result {
        Ok((comment, summary)) => {
            let mut context =
                base_context(flash_messages, Some(user), "comments", &server_config.login_url);
            context.insert("recommendation", &summary);
            context.insert("form_text", form_text.unwrap_or_else(|| comment.text.as_str()));
            context.insert("comment", &comment);
            if let Some(error) = error {
                context.insert("error", error);
            }
            render_template(tera, template, &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render comment form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/category/{category_slug}/{subcategory_slug}/{website_id}/website_comment/")]
pub async fn show_website_comments(
    params: web::Path<(String, String, i32)>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (category_slug, subcategory_slug, website_id) = params.into_inner();
    let website_id = match WebsiteId::new(website_id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    comment_page_response(
        show_website_comments_service(
            website_id,
            &category_slug,
            &subcategory_slug,
            repo.get_ref(),
        ),
        "comments/website_comment.html",
        None,
        None,
        user.as_ref(),
        &flash_messages,
        &server_config,
        &tera,
    )
}

#[post("/category/{category_slug}/{subcategory_slug}/{website_id}/website_comment/")]
pub async fn add_website_comment(
    params: web::Path<(String, String, i32)>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<CommentForm>,
) -> impl Responder {
    let (category_slug, subcategory_slug, website_id) = params.into_inner();
    let website_id = match WebsiteId::new(website_id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    let payload: CommentFormPayload = match form.clone().try_into() {
        Ok(payload) => payload,
        Err(e) => {
            return comment_page_response(
                show_website_comments_service(
                    website_id,
                    &category_slug,
                    &subcategory_slug,
                    repo.get_ref(),
                ),
                "comments/website_comment.html",
                Some(&form.text),
                Some(&e.to_string()),
                Some(&user),
                &flash_messages,
                &server_config,
                &tera,
            );
        }
    };

    match create_comment_service(
        payload,
        RecommendationRef::from(website_id),
        &user,
        repo.get_ref(),
    ) {
        Ok(true) => {}
        Ok(false) => FlashMessage::error("Failed to post the comment.").send(),
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to post website comment: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(&format!(
        "/category/{category_slug}/{subcategory_slug}/{id}/website_comment/",
        id = website_id.get()
    ))
}

#[get("/category/{category_slug}/{subcategory_slug}/{book_id}/book_comment/")]
pub async fn show_book_comments(
    params: web::Path<(String, String, i32)>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (category_slug, subcategory_slug, book_id) = params.into_inner();
    let book_id = match BookId::new(book_id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    comment_page_response(
        show_book_comments_service(book_id, &category_slug, &subcategory_slug, repo.get_ref()),
        "comments/book_comment.html",
        None,
        None,
        user.as_ref(),
        &flash_messages,
        &server_config,
        &tera,
    )
}

#[post("/category/{category_slug}/{subcategory_slug}/{book_id}/book_comment/")]
pub async fn add_book_comment(
    params: web::Path<(String, String, i32)>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<CommentForm>,
) -> impl Responder {
    let (category_slug, subcategory_slug, book_id) = params.into_inner();
    let book_id = match BookId::new(book_id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    let payload: CommentFormPayload = match form.clone().try_into() {
        Ok(payload) => payload,
        Err(e) => {
            return comment_page_response(
                show_book_comments_service(
                    book_id,
                    &category_slug,
                    &subcategory_slug,
                    repo.get_ref(),
                ),
                "comments/book_comment.html",
                Some(&form.text),
                Some(&e.to_string()),
                Some(&user),
                &flash_messages,
                &server_config,
                &tera,
            );
        }
    };

    match create_comment_service(
        payload,
        RecommendationRef::from(book_id),
        &user,
        repo.get_ref(),
    ) {
        Ok(true) => {}
        Ok(false) => FlashMessage::error("Failed to post the comment.").send(),
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to post book comment: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(&format!(
        "/category/{category_slug}/{subcategory_slug}/{id}/book_comment/",
        id = book_id.get()
    ))
}

#[get("/category/{category_slug}/{subcategory_slug}/{video_id}/video_comment/")]
pub async fn show_video_comments(
    params: web::Path<(String, String, i32)>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (category_slug, subcategory_slug, video_id) = params.into_inner();
    let video_id = match VideoId::new(video_id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    comment_page_response(
        show_video_comments_service(video_id, &category_slug, &subcategory_slug, repo.get_ref()),
        "comments/video_comment.html",
        None,
        None,
        user.as_ref(),
        &flash_messages,
        &server_config,
        &tera,
    )
}

#[post("/category/{category_slug}/{subcategory_slug}/{video_id}/video_comment/")]
pub async fn add_video_comment(
    params: web::Path<(String, String, i32)>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<CommentForm>,
) -> impl Responder {
    let (category_slug, subcategory_slug, video_id) = params.into_inner();
    let video_id = match VideoId::new(video_id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    let payload: CommentFormPayload = match form.clone().try_into() {
        Ok(payload) => payload,
        Err(e) => {
            return comment_page_response(
                show_video_comments_service(
                    video_id,
                    &category_slug,
                    &subcategory_slug,
                    repo.get_ref(),
                ),
                "comments/video_comment.html",
                Some(&form.text),
                Some(&e.to_string()),
                Some(&user),
                &flash_messages,
                &server_config,
                &tera,
            );
        }
    };

    match create_comment_service(
        payload,
        RecommendationRef::from(video_id),
        &user,
        repo.get_ref(),
    ) {
        Ok(true) => {}
        Ok(false) => FlashMessage::error("Failed to post the comment.").send(),
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to post video comment: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(&format!(
        "/category/{category_slug}/{subcategory_slug}/{id}/video_comment/",
        id = video_id.get()
    ))
}

#[get("/edit_website_comment/{comment_id}/")]
pub async fn show_edit_website_comment(
    params: web::Path<i32>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let comment_id = match CommentId::new(params.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    owned_comment_response(
        show_edit_comment_service(
            RecommendationKind::Website,
            comment_id,
            &user,
            repo.get_ref(),
        ),
        "comments/edit_website_comment.html",
        None,
        None,
        &user,
        &flash_messages,
        &server_config,
        &tera,
    )
}

#[post("/edit_website_comment/{comment_id}/")]
pub async fn update_website_comment(
    params: web::Path<i32>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<CommentForm>,
) -> impl Responder {
    let comment_id = match CommentId::new(params.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    let payload: CommentFormPayload = match form.clone().try_into() {
        Ok(payload) => payload,
        Err(e) => {
            return owned_comment_response(
                show_edit_comment_service(
                    RecommendationKind::Website,
                    comment_id,
                    &user,
                    repo.get_ref(),
                ),
                "comments/edit_website_comment.html",
                Some(&form.text),
                Some(&e.to_string()),
                &user,
                &flash_messages,
                &server_config,
                &tera,
            );
        }
    };

    match update_comment_service(
        payload,
        RecommendationKind::Website,
        comment_id,
        &user,
        repo.get_ref(),
    ) {
        Ok((summary, true)) => {
            FlashMessage::success("Comment updated.").send();
            redirect(&comment_page_url(&summary))
        }
        Ok((summary, false)) => {
            FlashMessage::error("Failed to update the comment.").send();
            redirect(&comment_page_url(&summary))
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to update website comment: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/delete_website_comment/{comment_id}/")]
pub async fn show_delete_website_comment(
    params: web::Path<i32>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let comment_id = match CommentId::new(params.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    owned_comment_response(
        show_delete_comment_service(
            RecommendationKind::Website,
            comment_id,
            &user,
            repo.get_ref(),
        ),
        "comments/delete_website_comment.html",
        None,
        None,
        &user,
        &flash_messages,
        &server_config,
        &tera,
    )
}

#[post("/delete_website_comment/{comment_id}/")]
pub async fn delete_website_comment(
    params: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let comment_id = match CommentId::new(params.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    match delete_comment_service(
        RecommendationKind::Website,
        comment_id,
        &user,
        repo.get_ref(),
    ) {
        Ok((summary, true)) => {
            FlashMessage::success("Comment deleted.").send();
            redirect(&comment_page_url(&summary))
        }
        Ok((summary, false)) => {
            FlashMessage::error("Failed to delete the comment.").send();
            redirect(&comment_page_url(&summary))
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to delete website comment: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/edit_book_comment/{comment_id}/")]
pub async fn show_edit_book_comment(
    params: web::Path<i32>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let comment_id = match CommentId::new(params.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    owned_comment_response(
        show_edit_comment_service(RecommendationKind::Book, comment_id, &user, repo.get_ref()),
        "comments/edit_book_comment.html",
        None,
        None,
        &user,
        &flash_messages,
        &server_config,
        &tera,
    )
}

#[post("/edit_book_comment/{comment_id}/")]
pub async fn update_book_comment(
    params: web::Path<i32>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<CommentForm>,
) -> impl Responder {
    let comment_id = match CommentId::new(params.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    let payload: CommentFormPayload = match form.clone().try_into() {
        Ok(payload) => payload,
        Err(e) => {
            return owned_comment_response(
                show_edit_comment_service(
                    RecommendationKind::Book,
                    comment_id,
                    &user,
                    repo.get_ref(),
                ),
                "comments/edit_book_comment.html",
                Some(&form.text),
                Some(&e.to_string()),
                &user,
                &flash_messages,
                &server_config,
                &tera,
            );
        }
    };

    match update_comment_service(
        payload,
        RecommendationKind::Book,
        comment_id,
        &user,
        repo.get_ref(),
    ) {
        Ok((summary, true)) => {
            FlashMessage::success("Comment updated.").send();
            redirect(&comment_page_url(&summary))
        }
        Ok((summary, false)) => {
            FlashMessage::error("Failed to update the comment.").send();
            redirect(&comment_page_url(&summary))
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to update book comment: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/delete_book_comment/{comment_id}/")]
pub async fn show_delete_book_comment(
    params: web::Path<i32>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let comment_id = match CommentId::new(params.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    owned_comment_response(
        show_delete_comment_service(RecommendationKind::Book, comment_id, &user, repo.get_ref()),
        "comments/delete_book_comment.html",
        None,
        None,
        &user,
        &flash_messages,
        &server_config,
        &tera,
    )
}

#[post("/delete_book_comment/{comment_id}/")]
pub async fn delete_book_comment(
    params: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let comment_id = match CommentId::new(params.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    match delete_comment_service(RecommendationKind::Book, comment_id, &user, repo.get_ref()) {
        Ok((summary, true)) => {
            FlashMessage::success("Comment deleted.").send();
            redirect(&comment_page_url(&summary))
        }
        Ok((summary, false)) => {
            FlashMessage::error("Failed to delete the comment.").send();
            redirect(&comment_page_url(&summary))
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to delete book comment: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/edit_video_comment/{comment_id}/")]
pub async fn show_edit_video_comment(
    params: web::Path<i32>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let comment_id = match CommentId::new(params.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    owned_comment_response(
        show_edit_comment_service(RecommendationKind::Video, comment_id, &user, repo.get_ref()),
        "comments/edit_video_comment.html",
        None,
        None,
        &user,
        &flash_messages,
        &server_config,
        &tera,
    )
}

#[post("/edit_video_comment/{comment_id}/")]
pub async fn update_video_comment(
    params: web::Path<i32>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<CommentForm>,
) -> impl Responder {
    let comment_id = match CommentId::new(params.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    let payload: CommentFormPayload = match form.clone().try_into() {
        Ok(payload) => payload,
        Err(e) => {
            return owned_comment_response(
                show_edit_comment_service(
                    RecommendationKind::Video,
                    comment_id,
                    &user,
                    repo.get_ref(),
                ),
                "comments/edit_video_comment.html",
                Some(&form.text),
                Some(&e.to_string()),
                &user,
                &flash_messages,
                &server_config,
                &tera,
            );
        }
    };

    match update_comment_service(
        payload,
        RecommendationKind::Video,
        comment_id,
        &user,
        repo.get_ref(),
    ) {
        Ok((summary, true)) => {
            FlashMessage::success("Comment updated.").send();
            redirect(&comment_page_url(&summary))
        }
        Ok((summary, false)) => {
            FlashMessage::error("Failed to update the comment.").send();
            redirect(&comment_page_url(&summary))
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to update video comment: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/delete_video_comment/{comment_id}/")]
pub async fn show_delete_video_comment(
    params: web::Path<i32>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let comment_id = match CommentId::new(params.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    owned_comment_response(
        show_delete_comment_service(RecommendationKind::Video, comment_id, &user, repo.get_ref()),
        "comments/delete_video_comment.html",
        None,
        None,
        &user,
        &flash_messages,
        &server_config,
        &tera,
    )
}

#[post("/delete_video_comment/{comment_id}/")]
pub async fn delete_video_comment(
    params: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let comment_id = match CommentId::new(params.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    match delete_comment_service(RecommendationKind::Video, comment_id, &user, repo.get_ref()) {
        Ok((summary, true)) => {
            FlashMessage::success("Comment deleted.").send();
            redirect(&comment_page_url(&summary))
        }
        Ok((summary, false)) => {
            FlashMessage::error("Failed to delete the comment.").send();
            redirect(&comment_page_url(&summary))
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to delete video comment: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
