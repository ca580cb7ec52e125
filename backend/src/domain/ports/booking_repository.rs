//! Driven port for the `appointments` collection.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::Booking;

define_port_error! {
    /// Failures raised by booking storage adapters.
    pub enum BookingRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "booking store connection failed: {message}",
        /// The store answered with an error or an undecodable document.
        Query { message: String } => "booking store query failed: {message}",
    }
}

/// Read access to appointment bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Fetch every booking.
    async fn list(&self) -> Result<Vec<Booking>, BookingRepositoryError>;
}
