use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use common::Error;
use models::{PrimitiveProfile, ProfileState, ProfileUpdate};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator::Validate;
use validator_derive::Validate;

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
	pub id:          i32,
	pub username:    String,
	pub email:       Option<String>,
	pub first_name:  Option<String>,
	pub last_name:   Option<String>,
	pub avatar_path: Option<String>,
	pub is_admin:    bool,
	pub state:       ProfileState,
	pub balance:     BigDecimal,
	pub created_at:  NaiveDateTime,
}

impl ProfileResponse {
	/// Assemble a response from a profile and its resolved avatar path
	#[must_use]
	pub fn from_parts(
		profile: PrimitiveProfile,
		avatar_path: Option<String>,
	) -> Self {
		Self {
			id:          profile.id,
			username:    profile.username,
			email:       profile.email,
			first_name:  profile.first_name,
			last_name:   profile.last_name,
			avatar_path,
			is_admin:    profile.is_admin,
			state:       profile.state,
			balance:     profile.balance,
			created_at:  profile.created_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
	#[validate(email(message = "invalid email", code = "email"))]
	pub email:           Option<String>,
	pub first_name:      Option<String>,
	pub last_name:       Option<String>,
	pub avatar_image_id: Option<i32>,
}

impl UpdateProfileRequest {
	pub fn to_insertable(self) -> Result<ProfileUpdate, Error> {
		self.validate()?;

		Ok(ProfileUpdate {
			email:           self.email,
			first_name:      self.first_name,
			last_name:       self.last_name,
			avatar_image_id: self.avatar_image_id,
		})
	}
}
