use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use common::Error;
use models::{NewPayment, PaymentState, PrimitivePayment};
use serde::{Deserialize, Serialize};
use validator::Validate;
use validator_derive::Validate;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
	pub id:             i32,
	pub profile_id:     i32,
	pub reservation_id: i32,
	pub state:          PaymentState,
	pub amount:         BigDecimal,
	pub method:         String,
	pub created_at:     NaiveDateTime,
}

impl From<PrimitivePayment> for PaymentResponse {
	fn from(value: PrimitivePayment) -> Self {
		Self {
			id:             value.id,
			profile_id:     value.profile_id,
			reservation_id: value.reservation_id,
			state:          value.state,
			amount:         value.amount,
			method:         value.method,
			created_at:     value.created_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
	pub amount: BigDecimal,
	#[validate(length(
		min = 1,
		max = 32,
		message = "payment method must be between 1 and 32 characters long",
		code = "method-length"
	))]
	pub method: String,
}

impl CreatePaymentRequest {
	pub fn to_insertable(
		self,
		profile_id: i32,
		reservation_id: i32,
	) -> Result<NewPayment, Error> {
		self.validate()?;

		if self.amount <= BigDecimal::from(0) {
			return Err(Error::ValidationError(
				"payment amount must be positive".to_string(),
			));
		}

		Ok(NewPayment {
			profile_id,
			reservation_id,
			amount: self.amount,
			method: self.method,
		})
	}
}

#[cfg(test)]
mod tests {
	use std::str::FromStr;

	use super::*;

	#[test]
	fn a_positive_amount_converts() {
		let request = CreatePaymentRequest {
			amount: BigDecimal::from_str("100.00").unwrap(),
			method: "card".to_string(),
		};

		let new = request.to_insertable(3, 5).unwrap();

		assert_eq!(new.amount, BigDecimal::from_str("100.00").unwrap());
		assert_eq!(new.reservation_id, 5);
	}

	#[test]
	fn a_nonpositive_amount_is_rejected() {
		let request = CreatePaymentRequest {
			amount: BigDecimal::from(0),
			method: "card".to_string(),
		};

		assert!(matches!(
			request.to_insertable(3, 5),
			Err(Error::ValidationError(_))
		));

		let request = CreatePaymentRequest {
			amount: BigDecimal::from_str("-5.00").unwrap(),
			method: "card".to_string(),
		};

		assert!(request.to_insertable(3, 5).is_err());
	}
}
