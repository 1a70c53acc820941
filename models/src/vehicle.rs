use chrono::NaiveDateTime;
use common::{DbConn, Error};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ListingState;
use crate::schema::vehicle;

/// A vehicle registered by a renter
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = vehicle)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveVehicle {
	pub id:            i32,
	pub profile_id:    i32,
	pub state:         ListingState,
	pub kind:          String,
	pub license_plate: String,
	pub province:      Option<String>,
	pub brand:         Option<String>,
	pub model:         Option<String>,
	pub color:         Option<String>,
	pub image_id:      Option<i32>,
	pub created_at:    NaiveDateTime,
	pub updated_at:    NaiveDateTime,
}

impl PrimitiveVehicle {
	/// Get a [`PrimitiveVehicle`] given its id, in any state
	#[instrument(skip(conn))]
	pub async fn get_by_id(v_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let result = conn
			.interact(move |conn| {
				use self::vehicle::dsl::*;

				vehicle.find(v_id).select(Self::as_select()).get_result(conn)
			})
			.await??;

		Ok(result)
	}

	/// Get the active vehicles owned by a profile, newest first
	#[instrument(skip(conn))]
	pub async fn for_profile(
		p_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let vehicles = conn
			.interact(move |conn| {
				use self::vehicle::dsl::*;

				vehicle
					.filter(profile_id.eq(p_id))
					.filter(state.eq(ListingState::Active))
					.order(created_at.desc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(vehicles)
	}

	/// Get an active vehicle owned by the given profile
	#[instrument(skip(conn))]
	pub async fn get_for_owner(
		v_id: i32,
		p_id: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let result = conn
			.interact(move |conn| {
				use self::vehicle::dsl::*;

				vehicle
					.find(v_id)
					.filter(profile_id.eq(p_id))
					.filter(state.ne(ListingState::Removed))
					.select(Self::as_select())
					.get_result(conn)
			})
			.await??;

		Ok(result)
	}

	/// Soft-delete the vehicle with the given id
	#[instrument(skip(conn))]
	pub async fn archive(v_id: i32, conn: &DbConn) -> Result<(), Error> {
		conn.interact(move |conn| {
			use self::vehicle::dsl::*;

			diesel::update(vehicle.find(v_id))
				.set(state.eq(ListingState::Removed))
				.execute(conn)
		})
		.await??;

		info!("archived vehicle {v_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = vehicle)]
pub struct NewVehicle {
	pub profile_id:    i32,
	pub kind:          String,
	pub license_plate: String,
	pub province:      Option<String>,
	pub brand:         Option<String>,
	pub model:         Option<String>,
	pub color:         Option<String>,
}

impl NewVehicle {
	/// Insert this [`NewVehicle`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<PrimitiveVehicle, Error> {
		let created = conn
			.interact(|conn| {
				use self::vehicle::dsl::*;

				diesel::insert_into(vehicle)
					.values(self)
					.returning(PrimitiveVehicle::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created vehicle {created:?}");

		Ok(created)
	}
}

#[derive(AsChangeset, Clone, Debug, Default, Deserialize, Serialize)]
#[diesel(table_name = vehicle)]
pub struct VehicleUpdate {
	pub kind:          Option<String>,
	pub license_plate: Option<String>,
	pub province:      Option<String>,
	pub brand:         Option<String>,
	pub model:         Option<String>,
	pub color:         Option<String>,
	pub image_id:      Option<i32>,
}

impl VehicleUpdate {
	/// Apply this update to the vehicle with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		v_id: i32,
		conn: &DbConn,
	) -> Result<PrimitiveVehicle, Error> {
		let updated = conn
			.interact(move |conn| {
				use self::vehicle::dsl::*;

				diesel::update(vehicle.find(v_id))
					.set(self)
					.returning(PrimitiveVehicle::as_returning())
					.get_result(conn)
			})
			.await??;

		Ok(updated)
	}
}
