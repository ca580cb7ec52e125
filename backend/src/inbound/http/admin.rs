//! Admin dashboard endpoints.
//!
//! ```text
//! GET  /api/v1/admin/doctors?search=ann&specialty=Cardio
//! GET  /api/v1/admin/doctors/{id}
//! POST /api/v1/admin/doctors {"name":"Ann Lee","specialization":"Cardiology",...}
//! GET  /api/v1/admin/bookings
//! GET  /api/v1/admin/summary
//! ```
//!
//! Every handler checks the session role before touching a port.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Booking, ChartSeries, DashboardSummary, DoctorDraft, DraftValidationError, Error, IdentityId,
    RosterEntry, RosterFilter,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Roster filter parameters. Blank values are ignored.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RosterParams {
    /// Case-insensitive substring of the doctor's name or email.
    pub search: Option<String>,
    /// Case-sensitive substring of the specialization.
    pub specialty: Option<String>,
}

/// New doctor form.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRequest {
    pub name: String,
    pub specialization: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub qualification: String,
}

impl TryFrom<DoctorRequest> for DoctorDraft {
    type Error = DraftValidationError;

    fn try_from(value: DoctorRequest) -> Result<Self, Self::Error> {
        Self::try_new(
            &value.name,
            &value.specialization,
            &value.email,
            &value.phone,
            &value.qualification,
        )
    }
}

/// A provisioned doctor plus the password to hand over.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionedDoctorResponse {
    pub doctor: RosterEntry,
    #[schema(example = "password@1")]
    pub temporary_password: String,
}

/// Booking row as the dashboard lists it.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRow {
    pub id: String,
    pub patient_name: String,
    /// Doctor name, or `Unknown`.
    pub doctor_name: String,
    pub date: String,
    pub time: String,
}

impl From<Booking> for BookingRow {
    fn from(value: Booking) -> Self {
        let doctor_name = value.doctor_label().to_owned();
        Self {
            id: value.id,
            patient_name: value.patient_name,
            doctor_name,
            date: value.date,
            time: value.time,
        }
    }
}

/// Dashboard totals with a ready-made chart.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub doctors: usize,
    pub bookings: usize,
    pub chart: ChartSeries,
}

impl From<DashboardSummary> for SummaryResponse {
    fn from(value: DashboardSummary) -> Self {
        Self {
            doctors: value.doctors,
            bookings: value.bookings,
            chart: value.chart(),
        }
    }
}

fn map_draft_error(err: DraftValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": err.field(), "code": "missing_field" }))
}

/// List doctors, optionally filtered.
#[utoipa::path(
    get,
    path = "/api/v1/admin/doctors",
    params(RosterParams),
    responses(
        (status = 200, description = "Doctors", body = [RosterEntry]),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 503, description = "Profile store unavailable", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listDoctors"
)]
#[get("/admin/doctors")]
pub async fn list_doctors(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<RosterParams>,
) -> ApiResult<web::Json<Vec<RosterEntry>>> {
    session.require_admin()?;
    let RosterParams { search, specialty } = params.into_inner();
    let filter = RosterFilter::new(search, specialty);
    let doctors = state.roster.list_doctors(&filter).await?;
    Ok(web::Json(doctors))
}

/// One doctor's details.
#[utoipa::path(
    get,
    path = "/api/v1/admin/doctors/{id}",
    params(("id" = String, Path, description = "Doctor identity")),
    responses(
        (status = 200, description = "Doctor", body = RosterEntry),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 404, description = "Doctor not found", body = Error),
        (status = 503, description = "Profile store unavailable", body = Error)
    ),
    tags = ["admin"],
    operation_id = "getDoctor"
)]
#[get("/admin/doctors/{id}")]
pub async fn get_doctor(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<RosterEntry>> {
    session.require_admin()?;
    let raw = path.into_inner();
    let id = IdentityId::new(raw.as_str())
        .map_err(|_| Error::not_found(format!("doctor {raw} not found")))?;
    let doctor = state.roster.find_doctor(&id).await?;
    Ok(web::Json(doctor))
}

/// Create a doctor account with the fixed temporary password.
#[utoipa::path(
    post,
    path = "/api/v1/admin/doctors",
    request_body = DoctorRequest,
    responses(
        (status = 201, description = "Doctor created", body = ProvisionedDoctorResponse),
        (status = 400, description = "Required fields missing", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 503, description = "Provisioning failed", body = Error)
    ),
    tags = ["admin"],
    operation_id = "createDoctor"
)]
#[post("/admin/doctors")]
pub async fn create_doctor(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<DoctorRequest>,
) -> ApiResult<HttpResponse> {
    let admin = session.require_admin()?;
    let draft = DoctorDraft::try_from(payload.into_inner()).map_err(map_draft_error)?;
    let provisioned = state.provisioning.provision(draft).await?;
    info!(
        admin = %admin.identity,
        doctor = %provisioned.doctor.id,
        "doctor provisioned"
    );
    Ok(HttpResponse::Created().json(ProvisionedDoctorResponse {
        doctor: provisioned.doctor,
        temporary_password: provisioned.temporary_password.to_owned(),
    }))
}

/// List every booking.
#[utoipa::path(
    get,
    path = "/api/v1/admin/bookings",
    responses(
        (status = 200, description = "Bookings", body = [BookingRow]),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 503, description = "Booking store unavailable", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listBookings"
)]
#[get("/admin/bookings")]
pub async fn list_bookings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<BookingRow>>> {
    session.require_admin()?;
    let bookings = state.roster.list_bookings().await?;
    Ok(web::Json(bookings.into_iter().map(BookingRow::from).collect()))
}

/// Doctor and booking totals.
#[utoipa::path(
    get,
    path = "/api/v1/admin/summary",
    responses(
        (status = 200, description = "Totals", body = SummaryResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["admin"],
    operation_id = "getSummary"
)]
#[get("/admin/summary")]
pub async fn summary(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<SummaryResponse>> {
    session.require_admin()?;
    let totals = state.roster.summary().await?;
    Ok(web::Json(SummaryResponse::from(totals)))
}
