//! Appointment bookings, read-only from this service's point of view.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Label used when a booking has no doctor attached.
pub const UNKNOWN_DOCTOR: &str = "Unknown";

/// Doctor reference embedded in a booking document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRef {
    /// Doctor's display name.
    pub name: String,
}

/// One appointment booking.
///
/// Date and time are kept in the textual form the booking client wrote them
/// in; this service never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Booking document id.
    pub id: String,
    /// Patient's display name.
    #[serde(default)]
    pub patient_name: String,
    /// Doctor the booking is with, when recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<DoctorRef>,
    /// Appointment date, e.g. `2024-11-02`.
    #[serde(default)]
    pub date: String,
    /// Appointment time, e.g. `10:30`.
    #[serde(default)]
    pub time: String,
}

impl Booking {
    /// Doctor name for display, or [`UNKNOWN_DOCTOR`].
    ///
    /// # Examples
    /// ```
    /// use clinic_backend::domain::{Booking, DoctorRef};
    ///
    /// let mut booking = Booking {
    ///     id: "b1".into(),
    ///     patient_name: "Pat".into(),
    ///     doctor: None,
    ///     date: "2024-11-02".into(),
    ///     time: "10:30".into(),
    /// };
    /// assert_eq!(booking.doctor_label(), "Unknown");
    /// booking.doctor = Some(DoctorRef { name: "Ann Lee".into() });
    /// assert_eq!(booking.doctor_label(), "Ann Lee");
    /// ```
    #[must_use]
    pub fn doctor_label(&self) -> &str {
        self.doctor
            .as_ref()
            .map_or(UNKNOWN_DOCTOR, |doctor| doctor.name.as_str())
    }
}
