use std::collections::HashMap;

use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::NaiveDateTime;
use common::{DbConn, Error};
use diesel::dsl::avg;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::{reservation, review, schedule};
use crate::{ListingState, PageQuery, ReservationState, ReviewState};

/// An owner-published availability window for a spot
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = schedule)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveSchedule {
	pub id:             i32,
	pub profile_id:     i32,
	pub spot_id:        i32,
	pub state:          ListingState,
	pub price_per_hour: BigDecimal,
	pub minimum_hours:  Option<i32>,
	pub charger_price:  Option<BigDecimal>,
	pub description:    Option<String>,
	pub start_time:     NaiveDateTime,
	pub end_time:       NaiveDateTime,
	pub created_at:     NaiveDateTime,
	pub updated_at:     NaiveDateTime,
}

impl PrimitiveSchedule {
	/// Get a [`PrimitiveSchedule`] given its id, in any state
	#[instrument(skip(conn))]
	pub async fn get_by_id(s_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let result = conn
			.interact(move |conn| {
				use self::schedule::dsl::*;

				schedule.find(s_id).select(Self::as_select()).get_result(conn)
			})
			.await??;

		Ok(result)
	}

	/// Get an active schedule owned by the given profile
	#[instrument(skip(conn))]
	pub async fn get_for_owner(
		s_id: i32,
		p_id: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let result = conn
			.interact(move |conn| {
				use self::schedule::dsl::*;

				schedule
					.find(s_id)
					.filter(profile_id.eq(p_id))
					.filter(state.eq(ListingState::Active))
					.select(Self::as_select())
					.get_result(conn)
			})
			.await??;

		Ok(result)
	}

	/// Get every schedule regardless of state, newest first
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let schedules = conn
			.interact(|conn| {
				use self::schedule::dsl::*;

				schedule
					.order(created_at.desc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(schedules)
	}

	/// Get a page of schedules open to searching renters, newest first,
	/// along with the total number of open schedules
	///
	/// Inactive schedules stay visible in search results; only removed
	/// ones disappear
	#[instrument(skip(conn))]
	pub async fn get_open(
		page: PageQuery,
		conn: &DbConn,
	) -> Result<(i64, Vec<Self>), Error> {
		let open = vec![ListingState::Active, ListingState::Inactive];

		let result = conn
			.interact(move |conn| {
				use self::schedule::dsl::*;

				let total = schedule
					.filter(state.eq_any(open.clone()))
					.count()
					.get_result(conn)?;

				let schedules = schedule
					.filter(state.eq_any(open))
					.order(created_at.desc())
					.limit(page.limit())
					.offset(page.offset())
					.select(Self::as_select())
					.get_results(conn)?;

				Ok::<_, diesel::result::Error>((total, schedules))
			})
			.await??;

		Ok(result)
	}

	/// Get the active schedules published by a profile, newest first
	#[instrument(skip(conn))]
	pub async fn for_profile(
		p_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let schedules = conn
			.interact(move |conn| {
				use self::schedule::dsl::*;

				schedule
					.filter(profile_id.eq(p_id))
					.filter(state.eq(ListingState::Active))
					.order(created_at.desc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(schedules)
	}

	/// Get the active schedules published for a spot, newest first
	#[instrument(skip(conn))]
	pub async fn for_spot(s_id: i32, conn: &DbConn) -> Result<Vec<Self>, Error> {
		let schedules = conn
			.interact(move |conn| {
				use self::schedule::dsl::*;

				schedule
					.filter(spot_id.eq(s_id))
					.filter(state.eq(ListingState::Active))
					.order(created_at.desc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(schedules)
	}

	/// Soft-delete the schedule with the given id
	#[instrument(skip(conn))]
	pub async fn archive(s_id: i32, conn: &DbConn) -> Result<(), Error> {
		conn.interact(move |conn| {
			use self::schedule::dsl::*;

			diesel::update(schedule.find(s_id))
				.set(state.eq(ListingState::Removed))
				.execute(conn)
		})
		.await??;

		info!("archived schedule {s_id}");

		Ok(())
	}

	/// The mean ratings over all live reviews of live reservations for a
	/// set of schedules at once
	///
	/// Schedules without reviews are absent from the returned map
	#[instrument(skip(conn))]
	pub async fn average_ratings(
		schedule_ids: Vec<i32>,
		conn: &DbConn,
	) -> Result<HashMap<i32, f32>, Error> {
		let means: Vec<(i32, Option<BigDecimal>)> = conn
			.interact(move |conn| {
				review::table
					.inner_join(reservation::table)
					.filter(reservation::schedule_id.eq_any(schedule_ids))
					.filter(
						reservation::state.eq_any(ReservationState::live()),
					)
					.filter(review::state.ne(ReviewState::Removed))
					.group_by(reservation::schedule_id)
					.select((reservation::schedule_id, avg(review::rating)))
					.get_results(conn)
			})
			.await??;

		let ratings = means
			.into_iter()
			.filter_map(|(s_id, mean)| {
				mean.and_then(|m| m.to_f32()).map(|m| (s_id, m))
			})
			.collect();

		Ok(ratings)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = schedule)]
pub struct NewSchedule {
	pub profile_id:     i32,
	pub spot_id:        i32,
	pub price_per_hour: BigDecimal,
	pub minimum_hours:  Option<i32>,
	pub charger_price:  Option<BigDecimal>,
	pub description:    Option<String>,
	pub start_time:     NaiveDateTime,
	pub end_time:       NaiveDateTime,
}

impl NewSchedule {
	/// Insert this [`NewSchedule`]
	#[instrument(skip(conn))]
	pub async fn insert(
		self,
		conn: &DbConn,
	) -> Result<PrimitiveSchedule, Error> {
		let created = conn
			.interact(|conn| {
				use self::schedule::dsl::*;

				diesel::insert_into(schedule)
					.values(self)
					.returning(PrimitiveSchedule::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created schedule {created:?}");

		Ok(created)
	}
}

#[derive(AsChangeset, Clone, Debug, Default, Deserialize, Serialize)]
#[diesel(table_name = schedule)]
pub struct ScheduleUpdate {
	pub state:          Option<ListingState>,
	pub price_per_hour: Option<BigDecimal>,
	pub minimum_hours:  Option<i32>,
	pub charger_price:  Option<BigDecimal>,
	pub description:    Option<String>,
	pub start_time:     Option<NaiveDateTime>,
	pub end_time:       Option<NaiveDateTime>,
}

impl ScheduleUpdate {
	/// Apply this update to the schedule with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		s_id: i32,
		conn: &DbConn,
	) -> Result<PrimitiveSchedule, Error> {
		let updated = conn
			.interact(move |conn| {
				use self::schedule::dsl::*;

				diesel::update(schedule.find(s_id))
					.set(self)
					.returning(PrimitiveSchedule::as_returning())
					.get_result(conn)
			})
			.await??;

		Ok(updated)
	}
}
