use actix_web::{HttpRequest, HttpResponse, Responder, get, post, routes, web};

use crate::auth::AuthenticatedUser;
use crate::domain::recommendation::RecommendationRef;
use crate::domain::types::{BookId, VideoId, VoteDirection, WebsiteId};
use crate::forms::engagement::{
    BookTargetForm, TargetFormError, VideoTargetForm, WebsiteTargetForm,
};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::engagement::{
    toggle_bookmark as toggle_bookmark_service, toggle_vote as toggle_vote_service,
};

/// The listing page posts votes and bookmarks through XHR; anything else
/// hitting these URLs is not a page we can answer.
fn is_xhr(request: &HttpRequest) -> bool {
    request
        .headers()
        .get("X-Requested-With")
        .and_then(|v| v.to_str().ok())
        == Some("XMLHttpRequest")
}

/// Runs a vote toggle and answers with the new total, which the page script
/// writes straight into the counter element.
fn vote(
    request: &HttpRequest,
    target: Result<RecommendationRef, TargetFormError>,
    direction: VoteDirection,
    user: &AuthenticatedUser,
    repo: &DieselRepository,
) -> HttpResponse {
    if !is_xhr(request) {
        return HttpResponse::BadRequest().finish();
    }

    let rec = match target {
        Ok(rec) => rec,
        Err(e) => {
            log::error!("Invalid vote target: {e}");
            return HttpResponse::BadRequest().finish();
        }
    };

    match toggle_vote_service(rec, direction, user, repo) {
        Ok(total) => HttpResponse::Ok().body(total.to_string()),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to toggle vote: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Runs a bookmark toggle. The page script only flips the star icon, so
/// success is an empty 204.
fn bookmark(
    request: &HttpRequest,
    target: Result<RecommendationRef, TargetFormError>,
    user: &AuthenticatedUser,
    repo: &DieselRepository,
) -> HttpResponse {
    if !is_xhr(request) {
        return HttpResponse::BadRequest().finish();
    }

    let rec = match target {
        Ok(rec) => rec,
        Err(e) => {
            log::error!("Invalid bookmark target: {e}");
            return HttpResponse::BadRequest().finish();
        }
    };

    match toggle_bookmark_service(rec, user, repo) {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to toggle bookmark: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/upvote_website/")]
pub async fn upvote_website(
    request: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<WebsiteTargetForm>,
) -> impl Responder {
    vote(
        &request,
        WebsiteId::try_from(form).map(RecommendationRef::from),
        VoteDirection::Up,
        &user,
        repo.get_ref(),
    )
}

#[post("/downvote_website/")]
pub async fn downvote_website(
    request: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<WebsiteTargetForm>,
) -> impl Responder {
    vote(
        &request,
        WebsiteId::try_from(form).map(RecommendationRef::from),
        VoteDirection::Down,
        &user,
        repo.get_ref(),
    )
}

#[post("/bookmark_website/")]
pub async fn bookmark_website(
    request: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<WebsiteTargetForm>,
) -> impl Responder {
    bookmark(
        &request,
        WebsiteId::try_from(form).map(RecommendationRef::from),
        &user,
        repo.get_ref(),
    )
}

#[post("/upvote_book/")]
pub async fn upvote_book(
    request: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<BookTargetForm>,
) -> impl Responder {
    vote(
        &request,
        BookId::try_from(form).map(RecommendationRef::from),
        VoteDirection::Up,
        &user,
        repo.get_ref(),
    )
}

#[post("/downvote_book/")]
pub async fn downvote_book(
    request: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<BookTargetForm>,
) -> impl Responder {
    vote(
        &request,
        BookId::try_from(form).map(RecommendationRef::from),
        VoteDirection::Down,
        &user,
        repo.get_ref(),
    )
}

#[post("/bookmark_book/")]
pub async fn bookmark_book(
    request: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<BookTargetForm>,
) -> impl Responder {
    bookmark(
        &request,
        BookId::try_from(form).map(RecommendationRef::from),
        &user,
        repo.get_ref(),
    )
}

#[post("/upvote_video/")]
pub async fn upvote_video(
    request: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<VideoTargetForm>,
) -> impl Responder {
    vote(
        &request,
        VideoId::try_from(form).map(RecommendationRef::from),
        VoteDirection::Up,
        &user,
        repo.get_ref(),
    )
}

#[post("/downvote_video/")]
pub async fn downvote_video(
    request: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<VideoTargetForm>,
) -> impl Responder {
    vote(
        &request,
        VideoId::try_from(form).map(RecommendationRef::from),
        VoteDirection::Down,
        &user,
        repo.get_ref(),
    )
}

#[post("/bookmark_video/")]
pub async fn bookmark_video(
    request: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<VideoTargetForm>,
) -> impl Responder {
    bookmark(
        &request,
        VideoId::try_from(form).map(RecommendationRef::from),
        &user,
        repo.get_ref(),
    )
}

/// These URLs only accept posts. A signed-in GET is answered with 405; an
/// anonymous one still goes through the login redirect first.
#[routes]
#[get("/upvote_website/")]
#[get("/downvote_website/")]
#[get("/bookmark_website/")]
#[get("/upvote_book/")]
#[get("/downvote_book/")]
#[get("/bookmark_book/")]
#[get("/upvote_video/")]
#[get("/downvote_video/")]
#[get("/bookmark_video/")]
pub async fn engagement_get(_user: AuthenticatedUser) -> impl Responder {
    HttpResponse::MethodNotAllowed().finish()
}
