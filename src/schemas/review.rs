use chrono::NaiveDateTime;
use common::Error;
use models::{NewReview, PrimitiveReview, ReviewState, ReviewUpdate};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator::Validate;
use validator_derive::Validate;

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
	pub id:             i32,
	pub profile_id:     i32,
	pub reservation_id: i32,
	pub state:          ReviewState,
	pub rating:         i32,
	pub comment:        Option<String>,
	pub created_at:     NaiveDateTime,
	pub updated_at:     NaiveDateTime,
}

impl From<PrimitiveReview> for ReviewResponse {
	fn from(value: PrimitiveReview) -> Self {
		Self {
			id:             value.id,
			profile_id:     value.profile_id,
			reservation_id: value.reservation_id,
			state:          value.state,
			rating:         value.rating,
			comment:        value.comment,
			created_at:     value.created_at,
			updated_at:     value.updated_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
	#[validate(range(
		min = 1,
		max = 5,
		message = "rating must be between 1 and 5",
		code = "rating-range"
	))]
	pub rating:  i32,
	#[validate(length(
		max = 1024,
		message = "comment must be at most 1024 characters long",
		code = "comment-length"
	))]
	pub comment: Option<String>,
}

impl CreateReviewRequest {
	pub fn to_insertable(
		self,
		profile_id: i32,
		reservation_id: i32,
	) -> Result<NewReview, Error> {
		self.validate()?;

		Ok(NewReview {
			profile_id,
			reservation_id,
			rating: self.rating,
			comment: self.comment,
		})
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewRequest {
	#[validate(range(
		min = 1,
		max = 5,
		message = "rating must be between 1 and 5",
		code = "rating-range"
	))]
	pub rating:  Option<i32>,
	#[validate(length(max = 1024))]
	pub comment: Option<String>,
}

impl UpdateReviewRequest {
	pub fn to_insertable(self) -> Result<ReviewUpdate, Error> {
		self.validate()?;

		Ok(ReviewUpdate { rating: self.rating, comment: self.comment })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ratings_outside_one_to_five_are_rejected() {
		let request =
			CreateReviewRequest { rating: 0, comment: None };

		assert!(request.to_insertable(1, 1).is_err());

		let request =
			CreateReviewRequest { rating: 6, comment: None };

		assert!(request.to_insertable(1, 1).is_err());
	}

	#[test]
	fn boundary_ratings_are_accepted() {
		for rating in [1, 5] {
			let request = CreateReviewRequest { rating, comment: None };

			assert!(request.to_insertable(1, 1).is_ok());
		}
	}
}
