//! HTTP inbound adapter exposing the forum REST endpoints.

pub mod answers;
pub mod auth;
pub mod dto;
pub mod error;
pub mod health;
pub mod questions;
pub mod schemas;
pub mod state;
pub mod token_config;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

use validation::malformed_body_error;

/// Register extractor error handlers, the `/api` scope and health probes.
///
/// Callers supply [`state::HttpState`], [`crate::domain::SessionAuthenticator`]
/// and [`health::HealthState`] as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| malformed_body_error(err).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| malformed_body_error(err).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| malformed_body_error(err).into()),
    )
    .service(
        web::scope("/api")
            .service(users::register)
            .service(users::login)
            .service(questions::list_questions)
            .service(questions::create_question)
            .service(questions::get_question)
            .service(questions::vote_question)
            .service(questions::create_answer)
            .service(answers::vote_answer)
            .service(answers::create_comment)
            .service(answers::list_comments),
    )
    .service(health::ready)
    .service(health::live);
}
