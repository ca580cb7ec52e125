//! Dashboard counts and the bar-chart series built from them.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const CHART_TITLE: &str = "Analytics Overview";
const SERIES_LABEL: &str = "Total Count";
const DOCTORS_LABEL: &str = "Doctors";
const BOOKINGS_LABEL: &str = "Bookings";

/// Single-series bar chart payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    /// Chart heading.
    pub title: String,
    /// Category labels, one per bar.
    pub labels: Vec<String>,
    /// Legend label for the single series.
    pub series_label: String,
    /// Bar heights, aligned with `labels`.
    pub values: Vec<usize>,
}

/// Totals shown on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Number of doctors on the roster.
    pub doctors: usize,
    /// Number of bookings.
    pub bookings: usize,
}

impl DashboardSummary {
    /// Summary of the given counts.
    #[must_use]
    pub const fn new(doctors: usize, bookings: usize) -> Self {
        Self { doctors, bookings }
    }

    /// Bar chart with one bar per count.
    ///
    /// # Examples
    /// ```
    /// use clinic_backend::domain::DashboardSummary;
    ///
    /// let chart = DashboardSummary::new(3, 8).chart();
    /// assert_eq!(chart.labels, ["Doctors", "Bookings"]);
    /// assert_eq!(chart.values, [3, 8]);
    /// ```
    #[must_use]
    pub fn chart(&self) -> ChartSeries {
        ChartSeries {
            title: CHART_TITLE.to_owned(),
            labels: vec![DOCTORS_LABEL.to_owned(), BOOKINGS_LABEL.to_owned()],
            series_label: SERIES_LABEL.to_owned(),
            values: vec![self.doctors, self.bookings],
        }
    }
}
