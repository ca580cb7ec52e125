//! Build the HTTP state for the configured backend.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;
use tracing::{info, warn};

use clinic_backend::domain::{Booking, DoctorRef, Role, TEMPORARY_PASSWORD};
use clinic_backend::inbound::http::state::HttpState;
use clinic_backend::outbound::firebase::{FirestoreClient, IdentityToolkitClient};
use clinic_backend::outbound::memory::{MemoryDirectory, SeedAccount, SeedError};
use clinic_backend::settings::{BackendKind, ClinicSettings, FirebaseSettings, SettingsError};

/// Failures while wiring adapters at startup.
#[derive(Debug, Error)]
pub enum StateBuildError {
    /// Settings were missing or malformed.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// A seed account could not be created.
    #[error(transparent)]
    Seed(#[from] SeedError),
    /// An HTTP client could not be constructed.
    #[error("failed to build {client} client: {message}")]
    Client {
        client: &'static str,
        message: String,
    },
}

/// Wire the domain services over the configured backend.
///
/// # Errors
///
/// Returns [`StateBuildError`] when settings are invalid, seeding fails, or
/// a REST client cannot be built.
pub fn build_http_state(
    settings: &ClinicSettings,
    clock: Arc<dyn Clock>,
) -> Result<HttpState, StateBuildError> {
    match settings.backend()? {
        BackendKind::Memory => build_memory_state(settings, clock),
        BackendKind::Firebase => build_firebase_state(&settings.firebase()?, settings, clock),
    }
}

fn build_memory_state(
    settings: &ClinicSettings,
    clock: Arc<dyn Clock>,
) -> Result<HttpState, StateBuildError> {
    let directory = MemoryDirectory::new();
    match settings.bootstrap_admin() {
        Some(admin) => {
            directory.seed_account(&admin, clock.utc())?;
        }
        None => warn!("no bootstrap admin configured; the memory backend starts without accounts"),
    }
    if settings.demo_data {
        seed_demo_data(&directory, clock.as_ref())?;
    }
    info!(
        backend = "memory",
        profiles = directory.profiles.len(),
        "adapters wired"
    );
    Ok(HttpState::with_services(
        directory.identity,
        directory.profiles,
        directory.bookings,
        clock,
    ))
}

fn build_firebase_state(
    firebase: &FirebaseSettings,
    settings: &ClinicSettings,
    clock: Arc<dyn Clock>,
) -> Result<HttpState, StateBuildError> {
    let timeout = settings.request_timeout();
    let identity = IdentityToolkitClient::new(
        firebase.identity_endpoint.clone(),
        firebase.api_key.clone(),
        timeout,
    )
    .map_err(|err| StateBuildError::Client {
        client: "identity toolkit",
        message: err.to_string(),
    })?;
    let firestore = FirestoreClient::new(&firebase.firestore_endpoint, &firebase.project_id, timeout)
        .map_err(|err| StateBuildError::Client {
            client: "firestore",
            message: err.to_string(),
        })?
        .with_api_key(Some(firebase.api_key.clone()))
        .with_access_token(firebase.access_token.clone());
    let firestore = Arc::new(firestore);
    info!(
        backend = "firebase",
        project = %firebase.project_id,
        "adapters wired"
    );
    Ok(HttpState::with_services(
        Arc::new(identity),
        firestore.clone(),
        firestore,
        clock,
    ))
}

fn seed_demo_data(directory: &MemoryDirectory, clock: &dyn Clock) -> Result<(), StateBuildError> {
    let doctors = [
        ("Ann Lee", "ann.lee@clinic.test", "Cardiology"),
        ("Ben Okafor", "ben.okafor@clinic.test", "Neurology"),
        ("Chloe Martin", "chloe.martin@clinic.test", "Pediatrics"),
    ];
    for (name, email, specialization) in doctors {
        directory.seed_account(
            &SeedAccount {
                email: email.to_owned(),
                password: TEMPORARY_PASSWORD.to_owned(),
                role: Role::Doctor,
                name: name.to_owned(),
                specialization: Some(specialization.to_owned()),
            },
            clock.utc(),
        )?;
    }
    let bookings = [
        ("demo-1", "Pat Doe", Some("Ann Lee"), "2024-11-02", "10:30"),
        ("demo-2", "Sam Roe", Some("Ben Okafor"), "2024-11-02", "14:00"),
        ("demo-3", "Alex Poe", None, "2024-11-03", "09:15"),
    ];
    for (id, patient, doctor, date, time) in bookings {
        directory.bookings.insert(Booking {
            id: id.to_owned(),
            patient_name: patient.to_owned(),
            doctor: doctor.map(|name| DoctorRef {
                name: name.to_owned(),
            }),
            date: date.to_owned(),
            time: time.to_owned(),
        });
    }
    info!(doctors = doctors.len(), bookings = bookings.len(), "demo data seeded");
    Ok(())
}
