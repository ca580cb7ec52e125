//! Admin dashboard queries over profiles and bookings.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{
    BookingRepository, BookingRepositoryError, ProfileRepository, ProfileRepositoryError,
    RosterQuery,
};
use crate::domain::{Booking, DashboardSummary, Error, IdentityId, RosterEntry, RosterFilter};

const DOCTORS_UNAVAILABLE: &str = "Failed to fetch doctors";
const BOOKINGS_UNAVAILABLE: &str = "Failed to fetch bookings";

/// Roster query service implementing [`RosterQuery`].
#[derive(Clone)]
pub struct RosterService<P, B> {
    profiles: Arc<P>,
    bookings: Arc<B>,
}

impl<P, B> RosterService<P, B> {
    /// Create a new service with the given repositories.
    pub fn new(profiles: Arc<P>, bookings: Arc<B>) -> Self {
        Self { profiles, bookings }
    }
}

impl<P, B> RosterService<P, B>
where
    P: ProfileRepository,
    B: BookingRepository,
{
    fn map_profile_error(err: &ProfileRepositoryError) -> Error {
        error!(error = %err, "roster fetch failed");
        Error::service_unavailable(DOCTORS_UNAVAILABLE)
    }

    fn map_booking_error(err: &BookingRepositoryError) -> Error {
        error!(error = %err, "booking fetch failed");
        Error::service_unavailable(BOOKINGS_UNAVAILABLE)
    }

    async fn roster(&self) -> Result<Vec<RosterEntry>, Error> {
        let records = self
            .profiles
            .list()
            .await
            .map_err(|err| Self::map_profile_error(&err))?;
        Ok(records
            .into_iter()
            .filter_map(RosterEntry::from_record)
            .collect())
    }
}

#[async_trait]
impl<P, B> RosterQuery for RosterService<P, B>
where
    P: ProfileRepository,
    B: BookingRepository,
{
    async fn list_doctors(&self, filter: &RosterFilter) -> Result<Vec<RosterEntry>, Error> {
        let roster = self.roster().await?;
        if filter.is_empty() {
            return Ok(roster);
        }
        let matched = filter.apply(&roster);
        debug!(total = roster.len(), matched = matched.len(), "roster filtered");
        Ok(matched)
    }

    async fn find_doctor(&self, id: &IdentityId) -> Result<RosterEntry, Error> {
        let record = self
            .profiles
            .find(id)
            .await
            .map_err(|err| Self::map_profile_error(&err))?;
        record
            .and_then(RosterEntry::from_record)
            .ok_or_else(|| Error::not_found(format!("doctor {id} not found")))
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, Error> {
        self.bookings
            .list()
            .await
            .map_err(|err| Self::map_booking_error(&err))
    }

    async fn summary(&self) -> Result<DashboardSummary, Error> {
        let doctors = self.roster().await?.len();
        let bookings = self.list_bookings().await?.len();
        Ok(DashboardSummary::new(doctors, bookings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockBookingRepository, MockProfileRepository};
    use crate::domain::{ErrorCode, ProfileRecord};
    use rstest::rstest;

    fn record(id: &str, role: &str, name: &str, email: &str) -> ProfileRecord {
        let mut record = ProfileRecord::new(IdentityId::new(id).expect("fixture id"));
        record.role = Some(role.to_owned());
        record.name = Some(name.to_owned());
        record.email = Some(email.to_owned());
        record
    }

    fn booking(id: &str) -> Booking {
        Booking {
            id: id.to_owned(),
            patient_name: "Pat".to_owned(),
            doctor: None,
            date: "2024-11-02".to_owned(),
            time: "10:30".to_owned(),
        }
    }

    fn mixed_profiles() -> Vec<ProfileRecord> {
        vec![
            record("d1", "doctor", "A", "a@x"),
            record("p1", "patient", "Alice", "alice@x"),
            record("d2", "Doctor", "B", "b@x"),
            record("a1", "admin", "Root", "root@x"),
        ]
    }

    fn service(
        profiles: MockProfileRepository,
        bookings: MockBookingRepository,
    ) -> RosterService<MockProfileRepository, MockBookingRepository> {
        RosterService::new(Arc::new(profiles), Arc::new(bookings))
    }

    #[rstest]
    #[case(RosterFilter::default(), &["d1", "d2"])]
    #[case(RosterFilter::new(Some("a".into()), None), &["d1"])]
    #[case(RosterFilter::new(Some("B@X".into()), None), &["d2"])]
    #[case(RosterFilter::new(Some("zzz".into()), None), &[])]
    #[tokio::test]
    async fn list_doctors_keeps_only_matching_doctors(
        #[case] filter: RosterFilter,
        #[case] expected: &[&str],
    ) {
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_list()
            .times(1)
            .returning(|| Ok(mixed_profiles()));

        let doctors = service(profiles, MockBookingRepository::new())
            .list_doctors(&filter)
            .await
            .expect("roster");

        let ids: Vec<&str> = doctors.iter().map(|entry| entry.id.as_ref()).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn list_doctors_reports_fetch_failure() {
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_list()
            .times(1)
            .returning(|| Err(ProfileRepositoryError::query("permission denied")));

        let err = service(profiles, MockBookingRepository::new())
            .list_doctors(&RosterFilter::default())
            .await
            .expect_err("fetch failure");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
        assert_eq!(err.message(), DOCTORS_UNAVAILABLE);
    }

    #[rstest]
    #[case(Some(record("d1", "doctor", "A", "a@x")), true)]
    #[case(Some(record("p1", "patient", "Alice", "alice@x")), false)]
    #[case(None, false)]
    #[tokio::test]
    async fn find_doctor_only_returns_doctors(
        #[case] stored: Option<ProfileRecord>,
        #[case] found: bool,
    ) {
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find()
            .times(1)
            .return_once(move |_| Ok(stored));

        let id = IdentityId::new("d1").expect("fixture id");
        let result = service(profiles, MockBookingRepository::new())
            .find_doctor(&id)
            .await;

        match result {
            Ok(entry) => {
                assert!(found, "unexpected doctor {entry:?}");
                assert_eq!(entry.status, "active");
            }
            Err(err) => {
                assert!(!found, "expected a doctor, got {err}");
                assert_eq!(err.code(), ErrorCode::NotFound);
            }
        }
    }

    #[tokio::test]
    async fn summary_counts_match_list_lengths() {
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_list()
            .returning(|| Ok(mixed_profiles()));
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_list()
            .returning(|| Ok(vec![booking("b1"), booking("b2"), booking("b3")]));
        let service = service(profiles, bookings);

        let summary = service.summary().await.expect("summary");
        let doctors = service
            .list_doctors(&RosterFilter::default())
            .await
            .expect("roster");
        let listed = service.list_bookings().await.expect("bookings");

        assert_eq!(summary, DashboardSummary::new(doctors.len(), listed.len()));
        assert_eq!(summary.chart().values, [2, 3]);
    }

    #[tokio::test]
    async fn list_bookings_reports_fetch_failure() {
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_list()
            .times(1)
            .returning(|| Err(BookingRepositoryError::connection("reset")));

        let err = service(MockProfileRepository::new(), bookings)
            .list_bookings()
            .await
            .expect_err("fetch failure");

        assert_eq!(err.message(), BOOKINGS_UNAVAILABLE);
    }
}
