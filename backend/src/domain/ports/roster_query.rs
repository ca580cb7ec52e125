//! Driving port for the admin dashboard's read side.

use async_trait::async_trait;

use crate::domain::{Booking, DashboardSummary, Error, IdentityId, RosterEntry, RosterFilter};

/// Roster, booking, and summary queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterQuery: Send + Sync {
    /// Doctors matching `filter`, in store order.
    async fn list_doctors(&self, filter: &RosterFilter) -> Result<Vec<RosterEntry>, Error>;

    /// One doctor by identity; `not_found` when absent or not a doctor.
    async fn find_doctor(&self, id: &IdentityId) -> Result<RosterEntry, Error>;

    /// Every booking.
    async fn list_bookings(&self) -> Result<Vec<Booking>, Error>;

    /// Doctor and booking totals.
    async fn summary(&self) -> Result<DashboardSummary, Error>;
}
