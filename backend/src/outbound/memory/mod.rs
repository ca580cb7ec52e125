//! Process-local adapters for development and tests.
//!
//! State lives behind `std::sync` locks that are held only for the duration
//! of a single lookup or write, never across an `.await`.

mod bookings;
mod identity;
mod profiles;
mod seed;

pub use bookings::InMemoryBookingStore;
pub use identity::{InMemoryIdentityProvider, MAX_FAILED_SIGN_INS, MIN_PASSWORD_LENGTH};
pub use profiles::InMemoryProfileStore;
pub use seed::{MemoryDirectory, SeedAccount, SeedError};
