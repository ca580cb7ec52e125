//! Live-server harness and shared world for the clinic HTTP scenarios.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` ensures the server
//! is stopped even if a test panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Key, SameSite, time::Duration as CookieDuration};
use actix_web::dev::ServerHandle;
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
use awc::Client;
use chrono::Utc;
use clinic_backend::Trace;
use clinic_backend::domain::{Booking, DoctorRef, ProfileRecord, Role, TRACE_ID_HEADER};
use clinic_backend::inbound::http::configure_api;
use clinic_backend::inbound::http::state::HttpState;
use clinic_backend::outbound::memory::{MemoryDirectory, SeedAccount};
use mockable::DefaultClock;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

pub(crate) const PASSWORD: &str = "correct-horse";

pub(crate) struct ClinicWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) directory: MemoryDirectory,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_trace_id: Option<String>,
    pub(crate) session_cookie: Option<String>,
    pub(crate) profiles_before: Option<usize>,
}

pub(crate) type SharedWorld = Rc<RefCell<ClinicWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(self.world.clone());
    }
}

pub(crate) fn shutdown(world: SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it, so we hold the
    // borrow while calling `block_on`. The future must not touch the world.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

fn test_session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(PersistentSession::default().session_ttl(CookieDuration::hours(2)))
        .build()
}

async fn spawn_clinic_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let key = Key::generate();
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let http_data = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        let api = web::scope("/api/v1")
            .wrap(test_session_middleware(key.clone()))
            .configure(configure_api);

        App::new()
            .app_data(http_data.clone())
            .wrap(Trace)
            .service(api)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

fn create_runtime_and_local() -> (Runtime, LocalSet) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    (runtime, local)
}

fn account(email: &str, role: Role, name: &str, specialization: Option<&str>) -> SeedAccount {
    SeedAccount {
        email: email.to_owned(),
        password: PASSWORD.to_owned(),
        role,
        name: name.to_owned(),
        specialization: specialization.map(str::to_owned),
    }
}

/// Accounts every scenario starts with.
///
/// - `admin@clinic.test`, `ann@clinic.test` (Cardiology),
///   `raj@clinic.test` (Neurology) and `pat@clinic.test` (patient) have
///   complete profiles.
/// - `ghost@clinic.test` can sign in but has no profile.
/// - `blank@clinic.test` has a profile without a role.
/// - `nurse@clinic.test` has a role outside the dispatch table.
fn seeded_directory() -> MemoryDirectory {
    let directory = MemoryDirectory::new();
    let accounts = [
        account("admin@clinic.test", Role::Admin, "Clinic Admin", None),
        account("ann@clinic.test", Role::Doctor, "Ann Lee", Some("Cardiology")),
        account("raj@clinic.test", Role::Doctor, "Raj Patel", Some("Neurology")),
        account("pat@clinic.test", Role::Patient, "Pat Doe", None),
    ];
    for seed in &accounts {
        directory
            .seed_account(seed, Utc::now())
            .expect("seed account");
    }

    directory
        .identity
        .register("ghost@clinic.test", PASSWORD)
        .expect("register ghost");

    let blank = directory
        .identity
        .register("blank@clinic.test", PASSWORD)
        .expect("register blank");
    let mut record = ProfileRecord::new(blank);
    record.email = Some("blank@clinic.test".to_owned());
    directory.profiles.upsert(record);

    let nurse = directory
        .identity
        .register("nurse@clinic.test", PASSWORD)
        .expect("register nurse");
    let mut record = ProfileRecord::new(nurse);
    record.email = Some("nurse@clinic.test".to_owned());
    record.role = Some("nurse".to_owned());
    directory.profiles.upsert(record);

    directory.bookings.insert(Booking {
        id: "b-1".to_owned(),
        patient_name: "Pat Doe".to_owned(),
        doctor: Some(DoctorRef {
            name: "Ann Lee".to_owned(),
        }),
        date: "2024-11-02".to_owned(),
        time: "10:30".to_owned(),
    });
    directory.bookings.insert(Booking {
        id: "b-2".to_owned(),
        patient_name: "Sam Roe".to_owned(),
        doctor: None,
        date: "2024-11-03".to_owned(),
        time: "09:15".to_owned(),
    });
    directory
}

pub(crate) fn world() -> WorldFixture {
    let (runtime, local) = create_runtime_and_local();
    let directory = seeded_directory();
    let http_state = HttpState::with_services(
        directory.identity.clone(),
        directory.profiles.clone(),
        directory.bookings.clone(),
        Arc::new(DefaultClock),
    );

    let (base_url, server) = local
        .block_on(&runtime, async { spawn_clinic_server(http_state).await })
        .expect("server should start");

    let world = Rc::new(RefCell::new(ClinicWorld {
        runtime,
        local,
        base_url,
        server,
        directory,
        last_status: None,
        last_body: None,
        last_trace_id: None,
        session_cookie: None,
        profiles_before: None,
    }));

    WorldFixture { world }
}

/// Request to replay against the running server.
pub(crate) struct RequestSpec<'a> {
    pub(crate) method: Method,
    pub(crate) path: &'a str,
    pub(crate) payload: Option<Value>,
    pub(crate) label: &'a str,
}

fn cookie_pair(world: &SharedWorld) -> Option<String> {
    world
        .borrow()
        .session_cookie
        .as_deref()
        .and_then(|raw| raw.split(';').next())
        .map(str::to_owned)
}

/// Send `request`, attaching the stored session cookie when there is one, and
/// record the status, trace id, body, and any new session cookie.
pub(crate) fn perform_json_request(world: &SharedWorld, request: RequestSpec<'_>) {
    let RequestSpec {
        method,
        path,
        payload,
        label,
    } = request;
    let cookie = cookie_pair(world);
    let (status, trace_id, set_cookie, body) = with_world_async(world, |base_url| async move {
        let mut request = Client::default().request(method, format!("{base_url}{path}"));
        if let Some(cookie) = cookie {
            request = request.insert_header((header::COOKIE, cookie));
        }
        let mut response = match payload {
            Some(payload) => request.send_json(&payload).await.expect(label),
            None => request.send().await.expect(label),
        };
        let status = response.status().as_u16();
        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_owned());
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_owned());
        let bytes = response.body().await.expect(label);
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect(label)
        };
        (status, trace_id, set_cookie, body)
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_trace_id = trace_id;
    ctx.last_body = Some(body);
    if set_cookie.is_some() {
        ctx.session_cookie = set_cookie;
    }
}

/// Post credentials to the login endpoint.
pub(crate) fn sign_in(world: &SharedWorld, email: &str, password: &str) {
    perform_json_request(
        world,
        RequestSpec {
            method: Method::POST,
            path: "/api/v1/login",
            payload: Some(serde_json::json!({ "email": email, "password": password })),
            label: "login request",
        },
    );
}

/// Number of profiles currently stored.
pub(crate) fn stored_profile_count(world: &SharedWorld) -> usize {
    world.borrow().directory.profiles.len()
}
