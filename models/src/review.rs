use chrono::NaiveDateTime;
use common::{DbConn, Error, ReviewError};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ReviewState;
use crate::schema::review;

/// A renter's review of a finished reservation
///
/// A reservation carries at most one non-removed review; once removed a
/// review is never reopened
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = review)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveReview {
	pub id:             i32,
	pub profile_id:     i32,
	pub reservation_id: i32,
	pub state:          ReviewState,
	pub rating:         i32,
	pub comment:        Option<String>,
	pub created_at:     NaiveDateTime,
	pub updated_at:     NaiveDateTime,
}

impl PrimitiveReview {
	/// Get a [`PrimitiveReview`] given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(rv_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let result = conn
			.interact(move |conn| {
				use self::review::dsl::*;

				review.find(rv_id).select(Self::as_select()).get_result(conn)
			})
			.await??;

		Ok(result)
	}

	/// Get the live review of a reservation, if any
	#[instrument(skip(conn))]
	pub async fn active_for_reservation(
		r_id: i32,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		let result = conn
			.interact(move |conn| {
				use self::review::dsl::*;

				review
					.filter(reservation_id.eq(r_id))
					.filter(state.ne(ReviewState::Removed))
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??;

		Ok(result)
	}

	/// Get the live reviews of any of the given reservations, newest first
	#[instrument(skip(conn))]
	pub async fn for_reservations(
		reservation_ids: Vec<i32>,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let reviews = conn
			.interact(move |conn| {
				use self::review::dsl::*;

				review
					.filter(reservation_id.eq_any(reservation_ids))
					.filter(state.ne(ReviewState::Removed))
					.order(created_at.desc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(reviews)
	}

	/// Get every review regardless of state, newest first
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let reviews = conn
			.interact(|conn| {
				use self::review::dsl::*;

				review
					.order(created_at.desc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(reviews)
	}

	/// Remove the review with the given id
	///
	/// Removal is final; removed reviews are never reopened
	#[instrument(skip(conn))]
	pub async fn remove(rv_id: i32, conn: &DbConn) -> Result<(), Error> {
		conn.interact(move |conn| {
			use self::review::dsl::*;

			diesel::update(
				review.find(rv_id).filter(state.ne(ReviewState::Removed)),
			)
			.set(state.eq(ReviewState::Removed))
			.execute(conn)
		})
		.await??;

		info!("removed review {rv_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = review)]
pub struct NewReview {
	pub profile_id:     i32,
	pub reservation_id: i32,
	pub rating:         i32,
	pub comment:        Option<String>,
}

impl NewReview {
	/// Insert this [`NewReview`]
	///
	/// The uniqueness check and the insert share one transaction so a
	/// reservation can never end up with two live reviews
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<PrimitiveReview, Error> {
		let created = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let existing: i64 = review::table
						.filter(
							review::reservation_id.eq(self.reservation_id),
						)
						.filter(review::state.ne(ReviewState::Removed))
						.count()
						.get_result(conn)?;

					if existing > 0 {
						return Err(ReviewError::AlreadyReviewed.into());
					}

					let created = diesel::insert_into(review::table)
						.values(&self)
						.returning(PrimitiveReview::as_returning())
						.get_result(conn)?;

					Ok(created)
				})
			})
			.await??;

		info!("created review {created:?}");

		Ok(created)
	}
}

#[derive(AsChangeset, Clone, Debug, Default, Deserialize, Serialize)]
#[diesel(table_name = review)]
pub struct ReviewUpdate {
	pub rating:  Option<i32>,
	pub comment: Option<String>,
}

impl ReviewUpdate {
	/// Apply this update to the review with the given id, marking it
	/// edited
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		rv_id: i32,
		conn: &DbConn,
	) -> Result<PrimitiveReview, Error> {
		let updated = conn
			.interact(move |conn| {
				use self::review::dsl::*;

				diesel::update(
					review.find(rv_id).filter(state.ne(ReviewState::Removed)),
				)
				.set((self, state.eq(ReviewState::Edited)))
				.returning(PrimitiveReview::as_returning())
				.get_result(conn)
			})
			.await??;

		Ok(updated)
	}
}
