//! Application settings loaded via OrthoConfig.
//!
//! Values layer CLI flags over `CLINIC_*` environment variables over an
//! optional config file. Every field is optional; accessors supply defaults
//! and validate the values the server needs.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::Role;
use crate::outbound::firebase::{DEFAULT_FIRESTORE_ENDPOINT, DEFAULT_IDENTITY_ENDPOINT};
use crate::outbound::memory::SeedAccount;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const BOOTSTRAP_ADMIN_NAME: &str = "Clinic Admin";

/// Errors raised while validating settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// A value could not be parsed.
    #[error("invalid value for {field}='{value}': {reason}")]
    Invalid {
        field: &'static str,
        value: String,
        reason: String,
    },
    /// The Firebase backend was selected without a required value.
    #[error("the firebase backend requires {field}")]
    MissingFirebase { field: &'static str },
}

impl SettingsError {
    fn invalid(field: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::Invalid {
            field,
            value: value.to_owned(),
            reason: reason.to_string(),
        }
    }
}

/// Which adapter family backs the ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Process-local stores; state is lost on restart.
    Memory,
    /// Identity Toolkit and Firestore over REST.
    Firebase,
}

/// Resolved Firebase connection values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirebaseSettings {
    pub api_key: String,
    pub project_id: String,
    pub access_token: Option<String>,
    pub identity_endpoint: Url,
    pub firestore_endpoint: Url,
}

/// Configuration values for the clinic server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CLINIC")]
pub struct ClinicSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// `memory` or `firebase`.
    pub backend: Option<String>,
    /// Web API key for Identity Toolkit and Firestore.
    pub firebase_api_key: Option<String>,
    /// Firebase project id.
    pub firebase_project_id: Option<String>,
    /// OAuth bearer token for Firestore, when rules require one.
    pub firebase_access_token: Option<String>,
    /// Identity Toolkit origin override, e.g. an emulator.
    pub identity_endpoint: Option<String>,
    /// Firestore origin override, e.g. an emulator.
    pub firestore_endpoint: Option<String>,
    /// Outbound request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Admin account created at startup by the memory backend.
    pub admin_email: Option<String>,
    /// Password for the bootstrap admin.
    pub admin_password: Option<String>,
    /// Seed demo doctors and bookings into the memory backend.
    #[ortho_config(default = false)]
    pub demo_data: bool,
}

impl ClinicSettings {
    /// Socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] when the value is not an address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim()
            .parse()
            .map_err(|err| SettingsError::invalid("bind_addr", raw, err))
    }

    /// Selected backend, `memory` unless configured otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] for unknown backend names.
    pub fn backend(&self) -> Result<BackendKind, SettingsError> {
        let Some(raw) = self.backend.as_deref() else {
            return Ok(BackendKind::Memory);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(BackendKind::Memory),
            "firebase" => Ok(BackendKind::Firebase),
            _ => Err(SettingsError::invalid(
                "backend",
                raw,
                "expected memory|firebase",
            )),
        }
    }

    /// Timeout applied to every outbound request.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Firebase connection values.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingFirebase`] without an API key or
    /// project id, and [`SettingsError::Invalid`] for unparsable endpoints.
    pub fn firebase(&self) -> Result<FirebaseSettings, SettingsError> {
        let api_key = required(self.firebase_api_key.as_deref(), "firebase_api_key")?;
        let project_id = required(self.firebase_project_id.as_deref(), "firebase_project_id")?;
        Ok(FirebaseSettings {
            api_key,
            project_id,
            access_token: self
                .firebase_access_token
                .as_deref()
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_owned),
            identity_endpoint: endpoint(
                "identity_endpoint",
                self.identity_endpoint.as_deref(),
                DEFAULT_IDENTITY_ENDPOINT,
            )?,
            firestore_endpoint: endpoint(
                "firestore_endpoint",
                self.firestore_endpoint.as_deref(),
                DEFAULT_FIRESTORE_ENDPOINT,
            )?,
        })
    }

    /// Admin account to seed, when both email and password are set.
    #[must_use]
    pub fn bootstrap_admin(&self) -> Option<SeedAccount> {
        let email = self.admin_email.as_deref()?.trim();
        let password = self.admin_password.as_deref()?;
        if email.is_empty() || password.is_empty() {
            return None;
        }
        Some(SeedAccount {
            email: email.to_owned(),
            password: password.to_owned(),
            role: Role::Admin,
            name: BOOTSTRAP_ADMIN_NAME.to_owned(),
            specialization: None,
        })
    }
}

fn required(value: Option<&str>, field: &'static str) -> Result<String, SettingsError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .ok_or(SettingsError::MissingFirebase { field })
}

fn endpoint(field: &'static str, value: Option<&str>, default: &str) -> Result<Url, SettingsError> {
    let raw = value.unwrap_or(default);
    Url::parse(raw.trim()).map_err(|err| SettingsError::invalid(field, raw, err))
}
