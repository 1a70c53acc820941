use common::Error;
use models::{NewProfile, hash_password};
use serde::{Deserialize, Serialize};
use validator::Validate;
use validator_derive::Validate;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
	#[validate(length(
		min = 2,
		max = 32,
		message = "username must be between 2 and 32 characters long",
		code = "username-length"
	))]
	pub username:   String,
	#[validate(length(
		min = 8,
		message = "password must be at least 8 characters long",
		code = "password-length"
	))]
	pub password:   String,
	#[validate(email(message = "invalid email", code = "email"))]
	pub email:      Option<String>,
	pub first_name: Option<String>,
	pub last_name:  Option<String>,
}

impl RegisterRequest {
	pub fn to_insertable(self) -> Result<NewProfile, Error> {
		self.validate()?;

		let password_hash = hash_password(&self.password)?;

		Ok(NewProfile {
			username: self.username,
			password_hash,
			email: self.email,
			first_name: self.first_name,
			last_name: self.last_name,
		})
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
	pub username: String,
	pub password: String,
}
