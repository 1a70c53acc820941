use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use common::{DbConn, Error};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::PaymentState;
use crate::schema::{payment, profile, reservation, schedule};

/// The single payment backing a reservation
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = payment)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitivePayment {
	pub id:             i32,
	pub profile_id:     i32,
	pub reservation_id: i32,
	pub state:          PaymentState,
	pub amount:         BigDecimal,
	pub method:         String,
	pub created_at:     NaiveDateTime,
	pub updated_at:     NaiveDateTime,
}

impl PrimitivePayment {
	/// Get the live payment backing a reservation, if any
	#[instrument(skip(conn))]
	pub async fn for_reservation(
		r_id: i32,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		let result = conn
			.interact(move |conn| {
				use self::payment::dsl::*;

				payment
					.filter(reservation_id.eq(r_id))
					.filter(state.ne(PaymentState::Removed))
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??;

		Ok(result)
	}

	/// Get the live payments made by a profile, newest first
	#[instrument(skip(conn))]
	pub async fn for_profile(
		payer_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let payments = conn
			.interact(move |conn| {
				use self::payment::dsl::*;

				payment
					.filter(profile_id.eq(payer_id))
					.filter(state.ne(PaymentState::Removed))
					.order(created_at.desc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(payments)
	}

	/// Get every payment regardless of state, newest first
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let payments = conn
			.interact(|conn| {
				use self::payment::dsl::*;

				payment
					.order(created_at.desc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(payments)
	}

	/// Mark a pending payment completed and credit the schedule owner's
	/// balance, atomically
	#[instrument(skip(conn))]
	pub async fn complete(p_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let completed = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let pay: Self = payment::table
						.find(p_id)
						.for_update()
						.select(Self::as_select())
						.get_result(conn)?;

					if pay.state != PaymentState::Pending {
						return Err(Error::ValidationError(
							"only pending payments can be completed"
								.to_string(),
						));
					}

					let owner_id: i32 = reservation::table
						.inner_join(schedule::table)
						.filter(reservation::id.eq(pay.reservation_id))
						.select(schedule::profile_id)
						.get_result(conn)
						.optional()?
						.ok_or_else(|| {
							Error::ReferentialIntegrity(format!(
								"payment {p_id} references reservation {} \
								 which no longer resolves to a schedule",
								pay.reservation_id
							))
						})?;

					diesel::update(profile::table.find(owner_id))
						.set(
							profile::balance
								.eq(profile::balance + pay.amount.clone()),
						)
						.execute(conn)?;

					let completed = diesel::update(payment::table.find(p_id))
						.set(payment::state.eq(PaymentState::Completed))
						.returning(Self::as_returning())
						.get_result(conn)?;

					Ok(completed)
				})
			})
			.await??;

		info!(
			"completed payment {p_id}, credited {} to the schedule owner",
			completed.amount
		);

		Ok(completed)
	}

	/// Set the state of the payment with the given id
	#[instrument(skip(conn))]
	pub async fn set_state(
		p_id: i32,
		new_state: PaymentState,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let updated = conn
			.interact(move |conn| {
				use self::payment::dsl::*;

				diesel::update(payment.find(p_id))
					.set(state.eq(new_state))
					.returning(Self::as_returning())
					.get_result(conn)
			})
			.await??;

		Ok(updated)
	}

	/// Archive the payment with the given id
	///
	/// Archiving never adjusts balances; it denotes administrative
	/// cleanup, not reversal
	#[instrument(skip(conn))]
	pub async fn archive(p_id: i32, conn: &DbConn) -> Result<(), Error> {
		conn.interact(move |conn| {
			use self::payment::dsl::*;

			diesel::update(payment.find(p_id))
				.set(state.eq(PaymentState::Removed))
				.execute(conn)
		})
		.await??;

		info!("archived payment {p_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = payment)]
pub struct NewPayment {
	pub profile_id:     i32,
	pub reservation_id: i32,
	pub amount:         BigDecimal,
	pub method:         String,
}

impl NewPayment {
	/// Insert this [`NewPayment`]
	///
	/// The existence check and the insert share one transaction so a
	/// reservation can never end up with two live payments
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<PrimitivePayment, Error> {
		let created = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let existing: i64 = payment::table
						.filter(
							payment::reservation_id.eq(self.reservation_id),
						)
						.filter(payment::state.ne(PaymentState::Removed))
						.count()
						.get_result(conn)?;

					if existing > 0 {
						return Err(Error::Duplicate(
							"this reservation has already been paid for"
								.to_string(),
						));
					}

					let created = diesel::insert_into(payment::table)
						.values(&self)
						.returning(PrimitivePayment::as_returning())
						.get_result(conn)?;

					Ok(created)
				})
			})
			.await??;

		info!("created payment {created:?}");

		Ok(created)
	}
}
