//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use chrono::Utc;
use mockable::DefaultClock;

use crate::domain::Role;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{MemoryDirectory, SeedAccount};

pub const ADMIN_EMAIL: &str = "admin@clinic.test";
pub const DOCTOR_EMAIL: &str = "ann@clinic.test";
pub const PASSWORD: &str = "correct-horse";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Directory holding one admin and one cardiologist, both using [`PASSWORD`].
pub fn seeded_directory() -> MemoryDirectory {
    let directory = MemoryDirectory::new();
    let accounts = [
        SeedAccount {
            email: ADMIN_EMAIL.into(),
            password: PASSWORD.into(),
            role: Role::Admin,
            name: "Clinic Admin".into(),
            specialization: None,
        },
        SeedAccount {
            email: DOCTOR_EMAIL.into(),
            password: PASSWORD.into(),
            role: Role::Doctor,
            name: "Ann Lee".into(),
            specialization: Some("Cardiology".into()),
        },
    ];
    for account in &accounts {
        directory
            .seed_account(account, Utc::now())
            .expect("seed test account");
    }
    directory
}

/// HTTP state wired to the real services over `directory`.
pub fn memory_state(directory: &MemoryDirectory) -> HttpState {
    HttpState::with_services(
        directory.identity.clone(),
        directory.profiles.clone(),
        directory.bookings.clone(),
        Arc::new(DefaultClock),
    )
}

/// Session cookie set by `res`.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}
