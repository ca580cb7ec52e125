//! Clinic booking backend.
//!
//! Login dispatch by profile role, the admin doctor roster, and doctor
//! provisioning, exposed over actix-web and backed by either process-local
//! stores or Firebase REST APIs.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
