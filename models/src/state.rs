use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::ProfileState"]
pub enum ProfileState {
	#[default]
	Active,
	Disabled,
}

/// Workflow/soft-delete state shared by spots, vehicles, and schedules
///
/// `Removed` rows are never physically deleted so that historical joins
/// (reservations, payments, reviews) keep resolving
#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::ListingState"]
pub enum ListingState {
	#[default]
	Active,
	Inactive,
	Removed,
}

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::SpotKind"]
pub enum SpotKind {
	#[default]
	Indoor,
	Outdoor,
}

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::ReservationState"]
pub enum ReservationState {
	#[default]
	Pending,
	Confirmed,
	Cancelled,
	Removed,
}

impl ReservationState {
	/// The states that occupy a schedule window
	#[must_use]
	pub fn live() -> Vec<Self> { vec![Self::Pending, Self::Confirmed] }

	/// The states shown in reservation listings; only admin removal hides
	/// a reservation
	#[must_use]
	pub fn listed() -> Vec<Self> {
		vec![Self::Pending, Self::Confirmed, Self::Cancelled]
	}
}

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::PaymentState"]
pub enum PaymentState {
	#[default]
	Pending,
	Completed,
	Failed,
	Removed,
}

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::ReviewState"]
pub enum ReviewState {
	#[default]
	Active,
	Edited,
	Removed,
}

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::WithdrawalState"]
pub enum WithdrawalState {
	#[default]
	Pending,
	Processing,
	Completed,
	Removed,
}

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::BookmarkState"]
pub enum BookmarkState {
	#[default]
	Active,
	Removed,
}
