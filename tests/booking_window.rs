//! The window text format is a boundary contract with the frontend's
//! datetime range picker; these tests pin it down end to end through
//! the request schemas.

use chrono::{NaiveDate, TimeDelta};
use parkbnb::schemas::reservation::CreateReservationRequest;
use parkbnb::schemas::schedule::CreateScheduleRequest;
use parkbnb::window::BookingWindow;

#[test]
fn the_documented_example_parses_exactly() {
	let window: BookingWindow =
		"01/01/2025 10:00 - 01/01/2025 12:00".parse().unwrap();

	let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

	assert_eq!(window.start, day.and_hms_opt(10, 0, 0).unwrap());
	assert_eq!(window.end, day.and_hms_opt(12, 0, 0).unwrap());
	assert_eq!(window.duration(), TimeDelta::hours(2));
}

#[test]
fn a_schedule_and_a_reservation_read_the_same_window_text() {
	let text = "05/03/2025 08:00 - 05/03/2025 20:00";

	let schedule = CreateScheduleRequest {
		spot_id:        1,
		window:         text.to_string(),
		price_per_hour: "100.00".parse().unwrap(),
		minimum_hours:  None,
		charger_price:  None,
		description:    None,
	}
	.to_insertable(1)
	.unwrap();

	let reservation = CreateReservationRequest {
		vehicle_id: 1,
		window:     text.to_string(),
	}
	.to_insertable(1, 1)
	.unwrap();

	assert_eq!(schedule.start_time, reservation.start_time);
	assert_eq!(schedule.end_time, reservation.end_time);
}

#[test]
fn window_text_rejects_iso_datetimes() {
	let result =
		"2025-01-01T10:00 - 2025-01-01T12:00".parse::<BookingWindow>();

	assert!(result.is_err());
}
