//! Session identity decoding for request handlers.
//!
//! Authentication itself lives in the external accounts service; it sets the
//! identity cookie holding a JWT signed with the shared secret. Handlers that
//! mutate state take [`AuthenticatedUser`] as an extractor, public pages take
//! `Option<AuthenticatedUser>`.

use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{Error, FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use crate::models::config::ServerConfig;

/// JWT claims minted by the accounts service on login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Account id at the accounts service.
    pub sub: String,
    pub username: String,
    pub email: String,
    pub exp: usize,
}

/// Rejection that sends the browser to the login page with the originally
/// requested path preserved in `next`.
#[derive(Debug, ThisError)]
#[error("authentication required")]
pub struct AuthRedirect {
    login_url: String,
    next: String,
}

impl AuthRedirect {
    fn new(login_url: &str, next: &str) -> Self {
        Self {
            login_url: login_url.to_string(),
            next: next.to_string(),
        }
    }
}

impl ResponseError for AuthRedirect {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::Found()
            .insert_header((
                header::LOCATION,
                format!("{}?next={}", self.login_url, self.next),
            ))
            .finish()
    }
}

fn decode_identity(req: &HttpRequest, payload: &mut Payload) -> Result<AuthenticatedUser, Error> {
    let config = req
        .app_data::<web::Data<ServerConfig>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("server config missing"))?;
    let reject = || AuthRedirect::new(&config.login_url, req.path());

    let identity = Identity::from_request(req, payload)
        .into_inner()
        .map_err(|_| reject())?;
    let token = identity.id().map_err(|_| reject())?;
    let decoded = decode::<AuthenticatedUser>(
        &token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|_| reject())?;
    Ok(decoded.claims)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        ready(decode_identity(req, payload))
    }
}
