use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use common::{DbConn, Error, WithdrawalError};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::{profile, withdrawal};
use crate::{PrimitiveProfile, WithdrawalState};

/// A request to withdraw funds from a profile's balance
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = withdrawal)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveWithdrawal {
	pub id:         i32,
	pub profile_id: i32,
	pub state:      WithdrawalState,
	pub amount:     BigDecimal,
	pub method:     String,
	pub account:    String,
	pub created_at: NaiveDateTime,
	pub updated_at: NaiveDateTime,
}

impl PrimitiveWithdrawal {
	/// Get a live withdrawal requested by the given profile
	#[instrument(skip(conn))]
	pub async fn get_for_profile(
		w_id: i32,
		p_id: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let result = conn
			.interact(move |conn| {
				use self::withdrawal::dsl::*;

				withdrawal
					.find(w_id)
					.filter(profile_id.eq(p_id))
					.filter(state.ne(WithdrawalState::Removed))
					.select(Self::as_select())
					.get_result(conn)
			})
			.await??;

		Ok(result)
	}

	/// Get the live withdrawals requested by a profile, newest first
	#[instrument(skip(conn))]
	pub async fn for_profile(
		p_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let withdrawals = conn
			.interact(move |conn| {
				use self::withdrawal::dsl::*;

				withdrawal
					.filter(profile_id.eq(p_id))
					.filter(state.ne(WithdrawalState::Removed))
					.order(created_at.desc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(withdrawals)
	}

	/// Get every withdrawal regardless of state, newest first
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let withdrawals = conn
			.interact(|conn| {
				use self::withdrawal::dsl::*;

				withdrawal
					.order(created_at.desc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(withdrawals)
	}

	/// Set the state of the withdrawal with the given id
	#[instrument(skip(conn))]
	pub async fn set_state(
		w_id: i32,
		new_state: WithdrawalState,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let updated = conn
			.interact(move |conn| {
				use self::withdrawal::dsl::*;

				diesel::update(withdrawal.find(w_id))
					.set(state.eq(new_state))
					.returning(Self::as_returning())
					.get_result(conn)
			})
			.await??;

		Ok(updated)
	}

	/// Archive the withdrawal with the given id
	///
	/// Archiving never refunds the debited balance; it denotes
	/// administrative cleanup, not reversal
	#[instrument(skip(conn))]
	pub async fn archive(w_id: i32, conn: &DbConn) -> Result<(), Error> {
		conn.interact(move |conn| {
			use self::withdrawal::dsl::*;

			diesel::update(withdrawal.find(w_id))
				.set(state.eq(WithdrawalState::Removed))
				.execute(conn)
		})
		.await??;

		info!("archived withdrawal {w_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = withdrawal)]
pub struct NewWithdrawal {
	pub profile_id: i32,
	pub amount:     BigDecimal,
	pub method:     String,
	pub account:    String,
}

impl NewWithdrawal {
	/// Insert this [`NewWithdrawal`], debiting the profile's balance
	///
	/// The balance check, the debit, and the insert share one transaction
	/// holding a lock on the profile row, so two competing withdrawals
	/// cannot both pass the check and overdraw the balance
	#[instrument(skip(conn))]
	pub async fn insert(
		self,
		conn: &DbConn,
	) -> Result<PrimitiveWithdrawal, Error> {
		let created = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let prof: PrimitiveProfile = profile::table
						.find(self.profile_id)
						.for_update()
						.select(PrimitiveProfile::as_select())
						.get_result(conn)?;

					if prof.balance < self.amount {
						return Err(WithdrawalError::InsufficientBalance {
							balance:   prof.balance,
							requested: self.amount.clone(),
						}
						.into());
					}

					let new_balance = &prof.balance - &self.amount;

					diesel::update(profile::table.find(self.profile_id))
						.set(profile::balance.eq(new_balance))
						.execute(conn)?;

					let created = diesel::insert_into(withdrawal::table)
						.values(&self)
						.returning(PrimitiveWithdrawal::as_returning())
						.get_result(conn)?;

					Ok(created)
				})
			})
			.await??;

		info!("created withdrawal {created:?}");

		Ok(created)
	}
}

#[cfg(test)]
mod tests {
	use std::str::FromStr;

	use super::*;

	#[test]
	fn debit_is_exact_at_two_decimals() {
		let balance = BigDecimal::from_str("125.50").unwrap();
		let amount = BigDecimal::from_str("60.25").unwrap();

		assert_eq!(&balance - &amount, BigDecimal::from_str("65.25").unwrap());
	}

	#[test]
	fn overdraw_is_detected() {
		let balance = BigDecimal::from_str("50.00").unwrap();
		let amount = BigDecimal::from_str("60.00").unwrap();

		assert!(balance < amount);

		let amount = BigDecimal::from_str("50.00").unwrap();

		// withdrawing the exact balance is allowed
		assert!(balance >= amount);
	}
}
