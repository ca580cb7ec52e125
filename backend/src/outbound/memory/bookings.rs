//! Read-only booking store.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::Booking;
use crate::domain::ports::{BookingRepository, BookingRepositoryError};

/// Bookings held in memory, listed in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryBookingStore {
    bookings: RwLock<Vec<Booking>>,
}

impl InMemoryBookingStore {
    /// Store pre-populated with `bookings`.
    #[must_use]
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self {
            bookings: RwLock::new(bookings),
        }
    }

    /// Append one booking; used to seed development data.
    pub fn insert(&self, booking: Booking) {
        self.bookings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(booking);
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingStore {
    async fn list(&self) -> Result<Vec<Booking>, BookingRepositoryError> {
        Ok(self
            .bookings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}
