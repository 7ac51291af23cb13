use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use tera::Tera;

use noobhub::db::establish_connection_pool;
use noobhub::enrich::HttpEnricher;
use noobhub::mailer::HttpMailer;
use noobhub::models::config::ServerConfig;
use noobhub::repository::DieselRepository;
use noobhub::routes::comments::{
    add_book_comment, add_video_comment, add_website_comment, delete_book_comment,
    delete_video_comment, delete_website_comment, show_book_comments, show_delete_book_comment,
    show_delete_video_comment, show_delete_website_comment, show_edit_book_comment,
    show_edit_video_comment, show_edit_website_comment, show_video_comments,
    show_website_comments, update_book_comment, update_video_comment, update_website_comment,
};
use noobhub::routes::engagement::{
    bookmark_book, bookmark_video, bookmark_website, downvote_book, downvote_video,
    downvote_website, engagement_get, upvote_book, upvote_video, upvote_website,
};
use noobhub::routes::main::{index, show_category, show_subcategory};
use noobhub::routes::profile::show_profile;
use noobhub::routes::recommendations::{
    create_book, create_video, create_website, delete_book, delete_video, delete_website,
    show_create_book, show_create_video, show_create_website, show_delete_book,
    show_delete_video, show_delete_website,
};
use noobhub::routes::reports::{report_book, report_video, report_website};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Failed to load configuration: {err}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(err) => {
            log::error!("Failed to create database pool: {err}");
            std::process::exit(1);
        }
    };

    let tera = match Tera::new("templates/**/*.html") {
        Ok(tera) => tera,
        Err(err) => {
            log::error!("Failed to parse templates: {err}");
            std::process::exit(1);
        }
    };

    // Key::derive_from stretches the configured secret to cookie-key length.
    let secret_key = Key::derive_from(config.secret.as_bytes());
    let bind_address = (config.host.clone(), config.port);

    let repo = web::Data::new(DieselRepository::new(pool));
    let enricher = web::Data::new(HttpEnricher::new(&config));
    let mailer = web::Data::new(HttpMailer::new(&config));
    let tera = web::Data::new(tera);
    let config = web::Data::new(config);

    log::info!(
        "Starting noobhub server at http://{}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        let message_store = CookieMessageStore::builder(secret_key.clone()).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();
        let session_middleware =
            SessionMiddleware::new(CookieSessionStore::default(), secret_key.clone());

        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(session_middleware)
            .wrap(message_framework)
            .wrap(Logger::default())
            .app_data(repo.clone())
            .app_data(enricher.clone())
            .app_data(mailer.clone())
            .app_data(tera.clone())
            .app_data(config.clone())
            .service(index)
            .service(show_category)
            .service(show_subcategory)
            .service(show_profile)
            .service(show_create_website)
            .service(create_website)
            .service(show_create_book)
            .service(create_book)
            .service(show_create_video)
            .service(create_video)
            .service(show_delete_website)
            .service(delete_website)
            .service(show_delete_book)
            .service(delete_book)
            .service(show_delete_video)
            .service(delete_video)
            .service(show_website_comments)
            .service(add_website_comment)
            .service(show_book_comments)
            .service(add_book_comment)
            .service(show_video_comments)
            .service(add_video_comment)
            .service(show_edit_website_comment)
            .service(update_website_comment)
            .service(show_delete_website_comment)
            .service(delete_website_comment)
            .service(show_edit_book_comment)
            .service(update_book_comment)
            .service(show_delete_book_comment)
            .service(delete_book_comment)
            .service(show_edit_video_comment)
            .service(update_video_comment)
            .service(show_delete_video_comment)
            .service(delete_video_comment)
            .service(report_website)
            .service(report_book)
            .service(report_video)
            .service(upvote_website)
            .service(downvote_website)
            .service(bookmark_website)
            .service(upvote_book)
            .service(downvote_book)
            .service(bookmark_book)
            .service(upvote_video)
            .service(downvote_video)
            .service(bookmark_video)
            .service(engagement_get)
            .service(Files::new("/static", "./static"))
    })
    .bind(bind_address)?
    .run()
    .await
}
