//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every HTTP endpoint from the inbound layer along with
//! the request and response schemas and the session cookie security scheme.
//! Swagger UI serves it in debug builds and `cargo run --bin openapi-dump`
//! prints it for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Booking, ChartSeries, Destination, DoctorRef, Error, ErrorCode, Role, RosterEntry,
};
use crate::inbound::http::admin::{
    BookingRow, DoctorRequest, ProvisionedDoctorResponse, SummaryResponse,
};
use crate::inbound::http::auth::{LoginRequest, LoginResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Clinic backend API",
        description = "Session dispatch, doctor roster, and provisioning endpoints for the clinic admin dashboard."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::admin::list_doctors,
        crate::inbound::http::admin::get_doctor,
        crate::inbound::http::admin::create_doctor,
        crate::inbound::http::admin::list_bookings,
        crate::inbound::http::admin::summary,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        Destination,
        RosterEntry,
        Booking,
        DoctorRef,
        ChartSeries,
        LoginRequest,
        LoginResponse,
        DoctorRequest,
        ProvisionedDoctorResponse,
        BookingRow,
        SummaryResponse,
    )),
    tags(
        (name = "session", description = "Login and logout"),
        (name = "admin", description = "Admin dashboard: roster, provisioning, bookings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
