use bigdecimal::BigDecimal;
use chrono::{NaiveDateTime, TimeDelta};
use common::Error;
use models::{ListingState, NewSchedule, PrimitiveSchedule, ScheduleUpdate};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator::Validate;
use validator_derive::Validate;

use crate::schemas::spot::SpotResponse;
use crate::window::BookingWindow;

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
	pub id:             i32,
	pub profile_id:     i32,
	pub spot_id:        i32,
	pub state:          ListingState,
	pub price_per_hour: BigDecimal,
	pub minimum_hours:  Option<i32>,
	pub charger_price:  Option<BigDecimal>,
	pub description:    Option<String>,
	pub start_time:     NaiveDateTime,
	pub end_time:       NaiveDateTime,
	pub rating:         f32,
	pub spot:           Option<SpotResponse>,
	pub created_at:     NaiveDateTime,
}

impl ScheduleResponse {
	/// Assemble a response from a schedule, its mean rating, and
	/// optionally the spot it belongs to
	#[must_use]
	pub fn from_parts(
		schedule: PrimitiveSchedule,
		rating: f32,
		spot: Option<SpotResponse>,
	) -> Self {
		Self {
			id:             schedule.id,
			profile_id:     schedule.profile_id,
			spot_id:        schedule.spot_id,
			state:          schedule.state,
			price_per_hour: schedule.price_per_hour,
			minimum_hours:  schedule.minimum_hours,
			charger_price:  schedule.charger_price,
			description:    schedule.description,
			start_time:     schedule.start_time,
			end_time:       schedule.end_time,
			rating,
			spot,
			created_at:     schedule.created_at,
		}
	}
}

/// Normalize the minimum booking length of a schedule
///
/// A minimum of one hour is no minimum at all, since every reservation
/// must last an hour anyway
fn normalize_minimum_hours(minimum: Option<i32>) -> Result<Option<i32>, Error> {
	match minimum {
		Some(h) if h < 1 => Err(Error::ValidationError(
			"minimum hours must be positive".to_string(),
		)),
		Some(1) => Ok(None),
		other => Ok(other),
	}
}

fn check_price(price: &BigDecimal) -> Result<(), Error> {
	if *price <= BigDecimal::from(0) {
		return Err(Error::ValidationError(
			"price per hour must be positive".to_string(),
		));
	}

	Ok(())
}

fn check_window(window: &BookingWindow) -> Result<(), Error> {
	if window.duration() < TimeDelta::hours(1) {
		return Err(Error::ValidationError(
			"a schedule must span at least one hour".to_string(),
		));
	}

	Ok(())
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
	pub spot_id:        i32,
	/// `dd/mm/yyyy HH:MM - dd/mm/yyyy HH:MM`
	pub window:         String,
	pub price_per_hour: BigDecimal,
	pub minimum_hours:  Option<i32>,
	pub charger_price:  Option<BigDecimal>,
	#[validate(length(
		max = 1024,
		message = "description must be at most 1024 characters long",
		code = "description-length"
	))]
	pub description:    Option<String>,
}

impl CreateScheduleRequest {
	pub fn to_insertable(self, profile_id: i32) -> Result<NewSchedule, Error> {
		self.validate()?;

		let window: BookingWindow = self.window.parse()?;

		check_window(&window)?;
		check_price(&self.price_per_hour)?;

		let minimum_hours = normalize_minimum_hours(self.minimum_hours)?;

		Ok(NewSchedule {
			profile_id,
			spot_id: self.spot_id,
			price_per_hour: self.price_per_hour,
			minimum_hours,
			charger_price: self.charger_price,
			description: self.description,
			start_time: window.start,
			end_time: window.end,
		})
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleRequest {
	pub state:          Option<ListingState>,
	/// `dd/mm/yyyy HH:MM - dd/mm/yyyy HH:MM`
	pub window:         Option<String>,
	pub price_per_hour: Option<BigDecimal>,
	pub minimum_hours:  Option<i32>,
	pub charger_price:  Option<BigDecimal>,
	#[validate(length(max = 1024))]
	pub description:    Option<String>,
}

impl UpdateScheduleRequest {
	pub fn to_insertable(self) -> Result<ScheduleUpdate, Error> {
		self.validate()?;

		let window = match self.window {
			Some(text) => {
				let window: BookingWindow = text.parse()?;

				check_window(&window)?;

				Some(window)
			},
			None => None,
		};

		if let Some(price) = &self.price_per_hour {
			check_price(price)?;
		}

		let minimum_hours = normalize_minimum_hours(self.minimum_hours)?;

		Ok(ScheduleUpdate {
			state:          self.state,
			price_per_hour: self.price_per_hour,
			minimum_hours,
			charger_price:  self.charger_price,
			description:    self.description,
			start_time:     window.map(|w| w.start),
			end_time:       window.map(|w| w.end),
		})
	}
}

#[cfg(test)]
mod tests {
	use std::str::FromStr;

	use super::*;

	fn request(window: &str) -> CreateScheduleRequest {
		CreateScheduleRequest {
			spot_id:        1,
			window:         window.to_string(),
			price_per_hour: BigDecimal::from_str("100.00").unwrap(),
			minimum_hours:  None,
			charger_price:  None,
			description:    None,
		}
	}

	#[test]
	fn a_short_window_is_rejected() {
		let result = request("01/01/2025 10:00 - 01/01/2025 10:30")
			.to_insertable(1);

		assert!(matches!(result, Err(Error::ValidationError(_))));
	}

	#[test]
	fn an_hour_long_window_is_accepted() {
		let schedule = request("01/01/2025 10:00 - 01/01/2025 11:00")
			.to_insertable(1)
			.unwrap();

		assert_eq!(schedule.end_time - schedule.start_time, TimeDelta::hours(1));
	}

	#[test]
	fn malformed_window_text_is_a_parse_error() {
		let result = request("sometime next week").to_insertable(1);

		assert!(matches!(result, Err(Error::WindowError(_))));
	}

	#[test]
	fn a_minimum_of_one_hour_is_dropped() {
		let mut req = request("01/01/2025 08:00 - 01/01/2025 20:00");
		req.minimum_hours = Some(1);

		let schedule = req.to_insertable(1).unwrap();

		assert_eq!(schedule.minimum_hours, None);
	}

	#[test]
	fn a_nonpositive_minimum_is_rejected() {
		let mut req = request("01/01/2025 08:00 - 01/01/2025 20:00");
		req.minimum_hours = Some(0);

		assert!(req.to_insertable(1).is_err());
	}

	#[test]
	fn a_two_hour_minimum_is_kept() {
		let mut req = request("01/01/2025 08:00 - 01/01/2025 20:00");
		req.minimum_hours = Some(2);

		let schedule = req.to_insertable(1).unwrap();

		assert_eq!(schedule.minimum_hours, Some(2));
	}

	#[test]
	fn a_free_schedule_is_rejected() {
		let mut req = request("01/01/2025 08:00 - 01/01/2025 20:00");
		req.price_per_hour = BigDecimal::from(0);

		assert!(matches!(
			req.to_insertable(1),
			Err(Error::ValidationError(_))
		));
	}
}
