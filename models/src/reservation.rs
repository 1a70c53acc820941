use chrono::{NaiveDateTime, TimeDelta, Timelike};
use common::{CreateReservationError, DbConn, Error};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::{reservation, schedule, vehicle};
use crate::{ListingState, PrimitiveSchedule, ReservationState};

/// A renter's booking against a schedule window
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = reservation)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveReservation {
	pub id:          i32,
	pub profile_id:  i32,
	pub schedule_id: i32,
	pub vehicle_id:  i32,
	pub state:       ReservationState,
	pub start_time:  NaiveDateTime,
	pub end_time:    NaiveDateTime,
	pub created_at:  NaiveDateTime,
	pub updated_at:  NaiveDateTime,
}

/// Whether two windows overlap
///
/// Windows are half-open; a window starting exactly where another ends
/// does not conflict with it
#[must_use]
pub fn windows_overlap(
	a_start: NaiveDateTime,
	a_end: NaiveDateTime,
	b_start: NaiveDateTime,
	b_end: NaiveDateTime,
) -> bool {
	a_start < b_end && b_start < a_end
}

/// Whether the inner window lies fully within the outer one
#[must_use]
pub fn window_within(
	outer_start: NaiveDateTime,
	outer_end: NaiveDateTime,
	inner_start: NaiveDateTime,
	inner_end: NaiveDateTime,
) -> bool {
	outer_start <= inner_start && inner_end <= outer_end
}

/// Truncate a datetime to minute precision
#[must_use]
pub fn truncate_seconds(t: NaiveDateTime) -> NaiveDateTime {
	t.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(t)
}

impl PrimitiveReservation {
	/// Get a [`PrimitiveReservation`] given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(r_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let result = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				reservation
					.find(r_id)
					.select(Self::as_select())
					.get_result(conn)
			})
			.await??;

		Ok(result)
	}

	/// Get a listed reservation made by the given profile
	#[instrument(skip(conn))]
	pub async fn get_for_profile(
		r_id: i32,
		p_id: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let result = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				reservation
					.find(r_id)
					.filter(profile_id.eq(p_id))
					.filter(state.eq_any(ReservationState::listed()))
					.select(Self::as_select())
					.get_result(conn)
			})
			.await??;

		Ok(result)
	}

	/// Get every reservation regardless of state, newest first
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let reservations = conn
			.interact(|conn| {
				use self::reservation::dsl::*;

				reservation
					.order(created_at.desc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(reservations)
	}

	/// Get the listed reservations made by a profile, newest first
	#[instrument(skip(conn))]
	pub async fn for_profile(
		p_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let reservations = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				reservation
					.filter(profile_id.eq(p_id))
					.filter(state.eq_any(ReservationState::listed()))
					.order(created_at.desc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(reservations)
	}

	/// Get the listed reservations against a schedule, newest first
	#[instrument(skip(conn))]
	pub async fn for_schedule(
		s_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let reservations = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				reservation
					.filter(schedule_id.eq(s_id))
					.filter(state.eq_any(ReservationState::listed()))
					.order(created_at.desc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(reservations)
	}

	/// Get the listed reservations against any of the given schedules,
	/// newest first
	///
	/// Used for owner dashboards covering every schedule they publish
	#[instrument(skip(conn))]
	pub async fn for_schedules(
		schedule_ids: Vec<i32>,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let reservations = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				reservation
					.filter(schedule_id.eq_any(schedule_ids))
					.filter(state.eq_any(ReservationState::listed()))
					.order(created_at.desc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(reservations)
	}

	/// Cancel the reservation with the given id (renter-initiated)
	///
	/// Admin-removed reservations stay removed
	#[instrument(skip(conn))]
	pub async fn cancel(r_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let cancelled = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				diesel::update(
					reservation
						.find(r_id)
						.filter(state.ne(ReservationState::Removed)),
				)
				.set(state.eq(ReservationState::Cancelled))
				.returning(Self::as_returning())
				.get_result(conn)
			})
			.await??;

		info!("cancelled reservation {r_id}");

		Ok(cancelled)
	}

	/// Remove the reservation with the given id (administrative hard stop)
	#[instrument(skip(conn))]
	pub async fn remove(r_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let removed = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				diesel::update(reservation.find(r_id))
					.set(state.eq(ReservationState::Removed))
					.returning(Self::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("removed reservation {r_id}");

		Ok(removed)
	}

	/// Set the state of the reservation with the given id
	#[instrument(skip(conn))]
	pub async fn set_state(
		r_id: i32,
		new_state: ReservationState,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let updated = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				diesel::update(reservation.find(r_id))
					.set(state.eq(new_state))
					.returning(Self::as_returning())
					.get_result(conn)
			})
			.await??;

		Ok(updated)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = reservation)]
pub struct NewReservation {
	pub profile_id:  i32,
	pub schedule_id: i32,
	pub vehicle_id:  i32,
	pub start_time:  NaiveDateTime,
	pub end_time:    NaiveDateTime,
}

impl NewReservation {
	/// Insert this [`NewReservation`]
	///
	/// The whole booking runs in one transaction holding a lock on the
	/// schedule row, so two competing bookings for the same window cannot
	/// both pass the overlap check
	#[instrument(skip(conn))]
	pub async fn insert(
		self,
		conn: &DbConn,
	) -> Result<PrimitiveReservation, Error> {
		let created = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let mut new = self;
					new.start_time = truncate_seconds(new.start_time);
					new.end_time = truncate_seconds(new.end_time);

					let sched: PrimitiveSchedule = schedule::table
						.find(new.schedule_id)
						.for_update()
						.select(PrimitiveSchedule::as_select())
						.get_result(conn)?;

					new.check_against(&sched)?;

					let owned: i64 = vehicle::table
						.find(new.vehicle_id)
						.filter(vehicle::profile_id.eq(new.profile_id))
						.filter(vehicle::state.ne(ListingState::Removed))
						.count()
						.get_result(conn)?;

					if owned == 0 {
						return Err(
							CreateReservationError::VehicleNotOwned.into()
						);
					}

					let conflicts: i64 = reservation::table
						.filter(reservation::schedule_id.eq(new.schedule_id))
						.filter(
							reservation::state
								.eq_any(ReservationState::live()),
						)
						.filter(reservation::start_time.lt(new.end_time))
						.filter(reservation::end_time.gt(new.start_time))
						.count()
						.get_result(conn)?;

					if conflicts > 0 {
						return Err(CreateReservationError::Overlapping.into());
					}

					let created = diesel::insert_into(reservation::table)
						.values(&new)
						.returning(PrimitiveReservation::as_returning())
						.get_result(conn)?;

					Ok(created)
				})
			})
			.await??;

		info!("created reservation {created:?}");

		Ok(created)
	}

	/// Validate this booking against the schedule it targets
	fn check_against(&self, sched: &PrimitiveSchedule) -> Result<(), Error> {
		if sched.state != ListingState::Active {
			return Err(CreateReservationError::ScheduleNotOpen.into());
		}

		if !window_within(
			sched.start_time,
			sched.end_time,
			self.start_time,
			self.end_time,
		) {
			return Err(CreateReservationError::OutOfBounds {
				start: sched.start_time,
				end:   sched.end_time,
			}
			.into());
		}

		let duration = self.end_time - self.start_time;

		if duration < TimeDelta::hours(1) {
			return Err(CreateReservationError::TooShort.into());
		}

		if let Some(min) = sched.minimum_hours
			&& duration < TimeDelta::hours(min.into())
		{
			return Err(CreateReservationError::BelowMinimum(min).into());
		}

		Ok(())
	}
}

/// Once created, only the vehicle of a reservation may change; every
/// other field carries over from the stored row
#[derive(AsChangeset, Clone, Debug, Deserialize, Serialize)]
#[diesel(table_name = reservation)]
pub struct ReservationUpdate {
	pub vehicle_id: i32,
}

impl ReservationUpdate {
	/// Apply this update to the reservation with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		r_id: i32,
		conn: &DbConn,
	) -> Result<PrimitiveReservation, Error> {
		let updated = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				diesel::update(
					reservation
						.find(r_id)
						.filter(state.ne(ReservationState::Removed)),
				)
				.set(self)
				.returning(PrimitiveReservation::as_returning())
				.get_result(conn)
			})
			.await??;

		Ok(updated)
	}
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDate;

	use super::*;

	fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
		NaiveDate::from_ymd_opt(2025, 1, day)
			.unwrap()
			.and_hms_opt(hour, minute, 0)
			.unwrap()
	}

	#[test]
	fn overlapping_windows_conflict() {
		assert!(windows_overlap(at(1, 10, 0), at(1, 12, 0), at(1, 11, 0), at(1, 13, 0)));
		assert!(windows_overlap(at(1, 10, 0), at(1, 12, 0), at(1, 9, 0), at(1, 11, 0)));
		assert!(windows_overlap(at(1, 10, 0), at(1, 12, 0), at(1, 10, 30), at(1, 11, 30)));
	}

	#[test]
	fn touching_windows_do_not_conflict() {
		assert!(!windows_overlap(at(1, 10, 0), at(1, 12, 0), at(1, 12, 0), at(1, 14, 0)));
		assert!(!windows_overlap(at(1, 12, 0), at(1, 14, 0), at(1, 10, 0), at(1, 12, 0)));
	}

	#[test]
	fn disjoint_windows_do_not_conflict() {
		assert!(!windows_overlap(at(1, 10, 0), at(1, 11, 0), at(2, 10, 0), at(2, 11, 0)));
	}

	#[test]
	fn window_containment() {
		assert!(window_within(at(1, 8, 0), at(1, 20, 0), at(1, 10, 0), at(1, 12, 0)));
		assert!(window_within(at(1, 8, 0), at(1, 20, 0), at(1, 8, 0), at(1, 20, 0)));
		assert!(!window_within(at(1, 8, 0), at(1, 20, 0), at(1, 7, 0), at(1, 12, 0)));
		assert!(!window_within(at(1, 8, 0), at(1, 20, 0), at(1, 10, 0), at(1, 21, 0)));
	}

	#[test]
	fn seconds_are_truncated() {
		let t = NaiveDate::from_ymd_opt(2025, 1, 1)
			.unwrap()
			.and_hms_opt(10, 30, 59)
			.unwrap();

		assert_eq!(
			truncate_seconds(t),
			NaiveDate::from_ymd_opt(2025, 1, 1)
				.unwrap()
				.and_hms_opt(10, 30, 0)
				.unwrap()
		);
	}
}
