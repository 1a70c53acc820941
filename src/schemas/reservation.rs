use chrono::{NaiveDateTime, TimeDelta};
use common::{CreateReservationError, Error};
use models::{
	NewReservation,
	PrimitiveReservation,
	ReservationState,
	ReservationUpdate,
	truncate_seconds,
};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::schemas::payment::PaymentResponse;
use crate::schemas::review::ReviewResponse;
use crate::schemas::spot::SpotResponse;
use crate::schemas::vehicle::VehicleResponse;
use crate::window::BookingWindow;

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
	pub id:          i32,
	pub profile_id:  i32,
	pub schedule_id: i32,
	pub vehicle_id:  i32,
	pub state:       ReservationState,
	pub start_time:  NaiveDateTime,
	pub end_time:    NaiveDateTime,
	pub spot:        Option<SpotResponse>,
	pub vehicle:     Option<VehicleResponse>,
	pub payment:     Option<PaymentResponse>,
	pub review:      Option<ReviewResponse>,
	pub created_at:  NaiveDateTime,
}

impl ReservationResponse {
	/// Assemble a response from a reservation and the related records a
	/// renter sees alongside it
	#[must_use]
	pub fn from_parts(
		reservation: PrimitiveReservation,
		spot: Option<SpotResponse>,
		vehicle: Option<VehicleResponse>,
		payment: Option<PaymentResponse>,
		review: Option<ReviewResponse>,
	) -> Self {
		Self {
			id: reservation.id,
			profile_id: reservation.profile_id,
			schedule_id: reservation.schedule_id,
			vehicle_id: reservation.vehicle_id,
			state: reservation.state,
			start_time: reservation.start_time,
			end_time: reservation.end_time,
			spot,
			vehicle,
			payment,
			review,
			created_at: reservation.created_at,
		}
	}
}

impl From<PrimitiveReservation> for ReservationResponse {
	fn from(value: PrimitiveReservation) -> Self {
		Self::from_parts(value, None, None, None, None)
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
	pub vehicle_id: i32,
	/// `dd/mm/yyyy HH:MM - dd/mm/yyyy HH:MM`
	pub window:     String,
}

impl CreateReservationRequest {
	pub fn to_insertable(
		self,
		profile_id: i32,
		schedule_id: i32,
	) -> Result<NewReservation, Error> {
		let window: BookingWindow = self.window.parse()?;

		Ok(NewReservation {
			profile_id,
			schedule_id,
			vehicle_id: self.vehicle_id,
			start_time: window.start,
			end_time: window.end,
		})
	}
}

/// The back-office creation path takes explicit datetimes instead of
/// window text
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCreateReservationRequest {
	pub profile_id:  i32,
	pub schedule_id: i32,
	pub vehicle_id:  i32,
	pub start_time:  NaiveDateTime,
	pub end_time:    NaiveDateTime,
}

impl AdminCreateReservationRequest {
	pub fn to_insertable(self) -> Result<NewReservation, Error> {
		let start_time = truncate_seconds(self.start_time);
		let end_time = truncate_seconds(self.end_time);

		if end_time - start_time < TimeDelta::hours(1) {
			return Err(CreateReservationError::TooShort.into());
		}

		Ok(NewReservation {
			profile_id: self.profile_id,
			schedule_id: self.schedule_id,
			vehicle_id: self.vehicle_id,
			start_time,
			end_time,
		})
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationRequest {
	pub vehicle_id: i32,
}

impl UpdateReservationRequest {
	pub fn to_insertable(self) -> ReservationUpdate {
		ReservationUpdate { vehicle_id: self.vehicle_id }
	}
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDate;

	use super::*;

	#[test]
	fn member_window_text_becomes_a_booking() {
		let request = CreateReservationRequest {
			vehicle_id: 7,
			window:     "01/01/2025 10:00 - 01/01/2025 12:00".to_string(),
		};

		let new = request.to_insertable(3, 5).unwrap();

		assert_eq!(new.profile_id, 3);
		assert_eq!(new.schedule_id, 5);
		assert_eq!(new.vehicle_id, 7);
		assert_eq!(new.end_time - new.start_time, TimeDelta::hours(2));
	}

	#[test]
	fn malformed_member_window_text_is_rejected() {
		let request = CreateReservationRequest {
			vehicle_id: 7,
			window:     "01-01-2025 10:00 to 12:00".to_string(),
		};

		assert!(matches!(
			request.to_insertable(3, 5),
			Err(Error::WindowError(_))
		));
	}

	#[test]
	fn admin_bookings_shorter_than_an_hour_are_rejected() {
		let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

		let request = AdminCreateReservationRequest {
			profile_id:  3,
			schedule_id: 5,
			vehicle_id:  7,
			start_time:  day.and_hms_opt(10, 0, 0).unwrap(),
			end_time:    day.and_hms_opt(10, 45, 0).unwrap(),
		};

		assert!(matches!(
			request.to_insertable(),
			Err(Error::CreateReservationError(
				CreateReservationError::TooShort
			))
		));
	}

	#[test]
	fn admin_bookings_are_truncated_to_minute_precision() {
		let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

		let request = AdminCreateReservationRequest {
			profile_id:  3,
			schedule_id: 5,
			vehicle_id:  7,
			start_time:  day.and_hms_opt(10, 0, 31).unwrap(),
			end_time:    day.and_hms_opt(12, 0, 59).unwrap(),
		};

		let new = request.to_insertable().unwrap();

		assert_eq!(new.start_time, day.and_hms_opt(10, 0, 0).unwrap());
		assert_eq!(new.end_time, day.and_hms_opt(12, 0, 0).unwrap());
	}
}
