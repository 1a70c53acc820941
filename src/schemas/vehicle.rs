use chrono::NaiveDateTime;
use common::Error;
use models::{ListingState, NewVehicle, PrimitiveVehicle, VehicleUpdate};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator::Validate;
use validator_derive::Validate;

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
	pub id:            i32,
	pub profile_id:    i32,
	pub state:         ListingState,
	pub kind:          String,
	pub license_plate: String,
	pub province:      Option<String>,
	pub brand:         Option<String>,
	pub model:         Option<String>,
	pub color:         Option<String>,
	pub image_path:    Option<String>,
	pub created_at:    NaiveDateTime,
}

impl VehicleResponse {
	/// Assemble a response from a vehicle and its resolved image path
	#[must_use]
	pub fn from_parts(
		vehicle: PrimitiveVehicle,
		image_path: Option<String>,
	) -> Self {
		Self {
			id:            vehicle.id,
			profile_id:    vehicle.profile_id,
			state:         vehicle.state,
			kind:          vehicle.kind,
			license_plate: vehicle.license_plate,
			province:      vehicle.province,
			brand:         vehicle.brand,
			model:         vehicle.model,
			color:         vehicle.color,
			image_path,
			created_at:    vehicle.created_at,
		}
	}
}

impl From<PrimitiveVehicle> for VehicleResponse {
	fn from(value: PrimitiveVehicle) -> Self { Self::from_parts(value, None) }
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
	#[validate(length(
		min = 1,
		max = 32,
		message = "vehicle kind must be between 1 and 32 characters long",
		code = "kind-length"
	))]
	pub kind:          String,
	#[validate(length(
		min = 1,
		max = 16,
		message = "license plate must be between 1 and 16 characters long",
		code = "license-plate-length"
	))]
	pub license_plate: String,
	pub province:      Option<String>,
	pub brand:         Option<String>,
	pub model:         Option<String>,
	pub color:         Option<String>,
}

impl CreateVehicleRequest {
	pub fn to_insertable(self, profile_id: i32) -> Result<NewVehicle, Error> {
		self.validate()?;

		Ok(NewVehicle {
			profile_id,
			kind: self.kind,
			license_plate: self.license_plate,
			province: self.province,
			brand: self.brand,
			model: self.model,
			color: self.color,
		})
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
	pub kind:          Option<String>,
	#[validate(length(min = 1, max = 16))]
	pub license_plate: Option<String>,
	pub province:      Option<String>,
	pub brand:         Option<String>,
	pub model:         Option<String>,
	pub color:         Option<String>,
	pub image_id:      Option<i32>,
}

impl UpdateVehicleRequest {
	pub fn to_insertable(self) -> Result<VehicleUpdate, Error> {
		self.validate()?;

		Ok(VehicleUpdate {
			kind:          self.kind,
			license_plate: self.license_plate,
			province:      self.province,
			brand:         self.brand,
			model:         self.model,
			color:         self.color,
			image_id:      self.image_id,
		})
	}
}
