use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use common::Error;
use models::{NewWithdrawal, PrimitiveWithdrawal, WithdrawalState};
use serde::{Deserialize, Serialize};
use validator::Validate;
use validator_derive::Validate;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalResponse {
	pub id:         i32,
	pub profile_id: i32,
	pub state:      WithdrawalState,
	pub amount:     BigDecimal,
	pub method:     String,
	pub account:    String,
	pub created_at: NaiveDateTime,
}

impl From<PrimitiveWithdrawal> for WithdrawalResponse {
	fn from(value: PrimitiveWithdrawal) -> Self {
		Self {
			id:         value.id,
			profile_id: value.profile_id,
			state:      value.state,
			amount:     value.amount,
			method:     value.method,
			account:    value.account,
			created_at: value.created_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
	pub balance: BigDecimal,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWithdrawalRequest {
	pub amount:  BigDecimal,
	#[validate(length(
		min = 1,
		max = 32,
		message = "withdrawal method must be between 1 and 32 characters long",
		code = "method-length"
	))]
	pub method:  String,
	#[validate(length(
		min = 1,
		max = 64,
		message = "account must be between 1 and 64 characters long",
		code = "account-length"
	))]
	pub account: String,
}

impl CreateWithdrawalRequest {
	pub fn to_insertable(
		self,
		profile_id: i32,
	) -> Result<NewWithdrawal, Error> {
		self.validate()?;

		if self.amount <= BigDecimal::from(0) {
			return Err(Error::ValidationError(
				"withdrawal amount must be positive".to_string(),
			));
		}

		Ok(NewWithdrawal {
			profile_id,
			amount: self.amount,
			method: self.method,
			account: self.account,
		})
	}
}

#[cfg(test)]
mod tests {
	use std::str::FromStr;

	use super::*;

	#[test]
	fn a_positive_amount_converts() {
		let request = CreateWithdrawalRequest {
			amount:  BigDecimal::from_str("60.00").unwrap(),
			method:  "bank".to_string(),
			account: "BE68 5390 0754 7034".to_string(),
		};

		assert!(request.to_insertable(1).is_ok());
	}

	#[test]
	fn a_nonpositive_amount_is_rejected() {
		let request = CreateWithdrawalRequest {
			amount:  BigDecimal::from(0),
			method:  "bank".to_string(),
			account: "BE68 5390 0754 7034".to_string(),
		};

		assert!(matches!(
			request.to_insertable(1),
			Err(Error::ValidationError(_))
		));
	}
}
