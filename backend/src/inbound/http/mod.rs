//! HTTP inbound adapter exposing REST endpoints.

pub mod admin;
pub mod auth;
pub mod error;
pub mod health;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` endpoint on `cfg`.
///
/// The caller owns the scope and its session middleware. JSON bodies are
/// decoded with [`error::json_config`].
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use clinic_backend::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .service(auth::login)
        .service(auth::logout)
        .service(admin::list_doctors)
        .service(admin::get_doctor)
        .service(admin::create_doctor)
        .service(admin::list_bookings)
        .service(admin::summary);
}
