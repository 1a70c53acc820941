//! Booking window text parsing
//!
//! Availability windows cross the API boundary as a single text field in
//! the form `dd/mm/yyyy HH:MM - dd/mm/yyyy HH:MM` (24-hour clock, minute
//! precision). The exact format is a contract with the frontend's
//! datetime range picker.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, TimeDelta};
use common::WindowError;

const DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M";
const SEPARATOR: &str = " - ";

/// A start/end datetime pair parsed from window text
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BookingWindow {
	pub start: NaiveDateTime,
	pub end:   NaiveDateTime,
}

impl BookingWindow {
	/// The length of this window
	#[must_use]
	pub fn duration(&self) -> TimeDelta { self.end - self.start }
}

impl FromStr for BookingWindow {
	type Err = WindowError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (start, end) =
			s.split_once(SEPARATOR).ok_or(WindowError::MissingSeparator)?;

		let start = NaiveDateTime::parse_from_str(start, DATETIME_FORMAT)
			.map_err(|_| WindowError::InvalidDateTime(start.to_string()))?;
		let end = NaiveDateTime::parse_from_str(end, DATETIME_FORMAT)
			.map_err(|_| WindowError::InvalidDateTime(end.to_string()))?;

		Ok(Self { start, end })
	}
}

impl fmt::Display for BookingWindow {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}{}{}",
			self.start.format(DATETIME_FORMAT),
			SEPARATOR,
			self.end.format(DATETIME_FORMAT),
		)
	}
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDate;

	use super::*;

	#[test]
	fn parses_a_two_hour_window() {
		let window: BookingWindow =
			"01/01/2025 10:00 - 01/01/2025 12:00".parse().unwrap();

		let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

		assert_eq!(window.start, day.and_hms_opt(10, 0, 0).unwrap());
		assert_eq!(window.end, day.and_hms_opt(12, 0, 0).unwrap());
		assert_eq!(window.duration(), TimeDelta::hours(2));
	}

	#[test]
	fn parses_a_window_spanning_days() {
		let window: BookingWindow =
			"31/12/2024 23:00 - 01/01/2025 01:30".parse().unwrap();

		assert_eq!(window.duration(), TimeDelta::minutes(150));
	}

	#[test]
	fn round_trips_through_display() {
		let text = "01/01/2025 10:00 - 01/01/2025 12:00";
		let window: BookingWindow = text.parse().unwrap();

		assert_eq!(window.to_string(), text);
	}

	#[test]
	fn rejects_a_missing_separator() {
		let result = "01/01/2025 10:00".parse::<BookingWindow>();

		assert!(matches!(result, Err(WindowError::MissingSeparator)));
	}

	#[test]
	fn rejects_malformed_datetimes() {
		// american date order
		let result =
			"12/31/2024 10:00 - 12/31/2024 12:00".parse::<BookingWindow>();

		assert!(matches!(result, Err(WindowError::InvalidDateTime(_))));

		// missing minutes
		let result = "01/01/2025 10 - 01/01/2025 12".parse::<BookingWindow>();

		assert!(matches!(result, Err(WindowError::InvalidDateTime(_))));
	}

	#[test]
	fn seconds_never_survive_parsing() {
		let window: BookingWindow =
			"01/01/2025 10:30 - 01/01/2025 11:45".parse().unwrap();

		assert_eq!(window.start.and_utc().timestamp() % 60, 0);
		assert_eq!(window.end.and_utc().timestamp() % 60, 0);
	}
}
