use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use common::Error;
use models::{ListingState, NewSpot, PrimitiveSpot, SpotKind, SpotUpdate};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator::Validate;
use validator_derive::Validate;

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotResponse {
	pub id:          i32,
	pub profile_id:  i32,
	pub state:       ListingState,
	pub name:        String,
	pub kind:        SpotKind,
	pub address:     String,
	pub description: Option<String>,
	pub width:       Option<BigDecimal>,
	pub length:      Option<BigDecimal>,
	pub height:      Option<BigDecimal>,
	pub latitude:    f64,
	pub longitude:   f64,
	pub image_path:  Option<String>,
	pub created_at:  NaiveDateTime,
}

impl SpotResponse {
	/// Assemble a response from a spot and its resolved image path
	#[must_use]
	pub fn from_parts(
		spot: PrimitiveSpot,
		image_path: Option<String>,
	) -> Self {
		Self {
			id:          spot.id,
			profile_id:  spot.profile_id,
			state:       spot.state,
			name:        spot.name,
			kind:        spot.kind,
			address:     spot.address,
			description: spot.description,
			width:       spot.width,
			length:      spot.length,
			height:      spot.height,
			latitude:    spot.latitude,
			longitude:   spot.longitude,
			image_path,
			created_at:  spot.created_at,
		}
	}
}

impl From<PrimitiveSpot> for SpotResponse {
	fn from(value: PrimitiveSpot) -> Self { Self::from_parts(value, None) }
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpotRequest {
	#[validate(length(
		min = 1,
		max = 128,
		message = "name must be between 1 and 128 characters long",
		code = "name-length"
	))]
	pub name:        String,
	pub kind:        SpotKind,
	#[validate(length(
		min = 1,
		message = "address must not be empty",
		code = "address-length"
	))]
	pub address:     String,
	pub description: Option<String>,
	pub width:       Option<BigDecimal>,
	pub length:      Option<BigDecimal>,
	pub height:      Option<BigDecimal>,
	#[validate(range(
		min = -90.0,
		max = 90.0,
		message = "latitude must be between -90 and 90",
		code = "latitude-range"
	))]
	pub latitude:    f64,
	#[validate(range(
		min = -180.0,
		max = 180.0,
		message = "longitude must be between -180 and 180",
		code = "longitude-range"
	))]
	pub longitude:   f64,
}

impl CreateSpotRequest {
	pub fn to_insertable(self, profile_id: i32) -> Result<NewSpot, Error> {
		self.validate()?;

		Ok(NewSpot {
			profile_id,
			name: self.name,
			kind: self.kind,
			address: self.address,
			description: self.description,
			width: self.width,
			length: self.length,
			height: self.height,
			latitude: self.latitude,
			longitude: self.longitude,
		})
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpotRequest {
	pub state:       Option<ListingState>,
	#[validate(length(
		min = 1,
		max = 128,
		message = "name must be between 1 and 128 characters long",
		code = "name-length"
	))]
	pub name:        Option<String>,
	pub kind:        Option<SpotKind>,
	pub address:     Option<String>,
	pub description: Option<String>,
	pub width:       Option<BigDecimal>,
	pub length:      Option<BigDecimal>,
	pub height:      Option<BigDecimal>,
	#[validate(range(min = -90.0, max = 90.0))]
	pub latitude:    Option<f64>,
	#[validate(range(min = -180.0, max = 180.0))]
	pub longitude:   Option<f64>,
}

impl UpdateSpotRequest {
	pub fn to_insertable(self) -> Result<SpotUpdate, Error> {
		self.validate()?;

		Ok(SpotUpdate {
			state:       self.state,
			name:        self.name,
			kind:        self.kind,
			address:     self.address,
			description: self.description,
			width:       self.width,
			length:      self.length,
			height:      self.height,
			latitude:    self.latitude,
			longitude:   self.longitude,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn request() -> CreateSpotRequest {
		CreateSpotRequest {
			name:        "Garage under the river house".to_string(),
			kind:        SpotKind::Indoor,
			address:     "1 Riverside Lane".to_string(),
			description: None,
			width:       None,
			length:      None,
			height:      None,
			latitude:    51.05,
			longitude:   3.72,
		}
	}

	#[test]
	fn valid_request_converts() {
		assert!(request().to_insertable(1).is_ok());
	}

	#[test]
	fn out_of_range_coordinates_are_rejected() {
		let mut bad = request();
		bad.latitude = 91.0;

		assert!(bad.to_insertable(1).is_err());

		let mut bad = request();
		bad.longitude = -200.0;

		assert!(bad.to_insertable(1).is_err());
	}
}
