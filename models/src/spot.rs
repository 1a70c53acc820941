use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use common::{DbConn, Error};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::spot;
use crate::{ListingState, PageQuery, SpotKind};

/// A rentable parking location
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = spot)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveSpot {
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
	pub image_id:    Option<i32>,
	pub created_at:  NaiveDateTime,
	pub updated_at:  NaiveDateTime,
}

impl PrimitiveSpot {
	/// Get a [`PrimitiveSpot`] given its id, in any state
	///
	/// Removed spots stay resolvable so historical reservations keep
	/// rendering
	#[instrument(skip(conn))]
	pub async fn get_by_id(s_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let result = conn
			.interact(move |conn| {
				use self::spot::dsl::*;

				spot.find(s_id).select(Self::as_select()).get_result(conn)
			})
			.await??;

		Ok(result)
	}

	/// Get a page of active spots, newest first, along with the total
	/// number of active spots
	#[instrument(skip(conn))]
	pub async fn get_active(
		page: PageQuery,
		conn: &DbConn,
	) -> Result<(i64, Vec<Self>), Error> {
		let result = conn
			.interact(move |conn| {
				use self::spot::dsl::*;

				let total = spot
					.filter(state.eq(ListingState::Active))
					.count()
					.get_result(conn)?;

				let spots = spot
					.filter(state.eq(ListingState::Active))
					.order(created_at.desc())
					.limit(page.limit())
					.offset(page.offset())
					.select(Self::as_select())
					.get_results(conn)?;

				Ok::<_, diesel::result::Error>((total, spots))
			})
			.await??;

		Ok(result)
	}

	/// Get every spot regardless of state, newest first
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let spots = conn
			.interact(|conn| {
				use self::spot::dsl::*;

				spot.order(created_at.desc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(spots)
	}

	/// Get the active spots owned by a profile, newest first
	#[instrument(skip(conn))]
	pub async fn for_profile(
		p_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let spots = conn
			.interact(move |conn| {
				use self::spot::dsl::*;

				spot.filter(profile_id.eq(p_id))
					.filter(state.eq(ListingState::Active))
					.order(created_at.desc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(spots)
	}

	/// Get an active spot owned by the given profile
	#[instrument(skip(conn))]
	pub async fn get_for_owner(
		s_id: i32,
		p_id: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let result = conn
			.interact(move |conn| {
				use self::spot::dsl::*;

				spot.find(s_id)
					.filter(profile_id.eq(p_id))
					.filter(state.ne(ListingState::Removed))
					.select(Self::as_select())
					.get_result(conn)
			})
			.await??;

		Ok(result)
	}

	/// Attach an uploaded image to the spot with the given id
	#[instrument(skip(conn))]
	pub async fn set_image(
		s_id: i32,
		file_id: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let updated = conn
			.interact(move |conn| {
				use self::spot::dsl::*;

				diesel::update(spot.find(s_id))
					.set(image_id.eq(file_id))
					.returning(Self::as_returning())
					.get_result(conn)
			})
			.await??;

		Ok(updated)
	}

	/// Soft-delete the spot with the given id
	#[instrument(skip(conn))]
	pub async fn archive(s_id: i32, conn: &DbConn) -> Result<(), Error> {
		conn.interact(move |conn| {
			use self::spot::dsl::*;

			diesel::update(spot.find(s_id))
				.set(state.eq(ListingState::Removed))
				.execute(conn)
		})
		.await??;

		info!("archived spot {s_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = spot)]
pub struct NewSpot {
	pub profile_id:  i32,
	pub name:        String,
	pub kind:        SpotKind,
	pub address:     String,
	pub description: Option<String>,
	pub width:       Option<BigDecimal>,
	pub length:      Option<BigDecimal>,
	pub height:      Option<BigDecimal>,
	pub latitude:    f64,
	pub longitude:   f64,
}

impl NewSpot {
	/// Insert this [`NewSpot`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<PrimitiveSpot, Error> {
		let created = conn
			.interact(|conn| {
				use self::spot::dsl::*;

				diesel::insert_into(spot)
					.values(self)
					.returning(PrimitiveSpot::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created spot {created:?}");

		Ok(created)
	}
}

#[derive(AsChangeset, Clone, Debug, Default, Deserialize, Serialize)]
#[diesel(table_name = spot)]
pub struct SpotUpdate {
	pub state:       Option<ListingState>,
	pub name:        Option<String>,
	pub kind:        Option<SpotKind>,
	pub address:     Option<String>,
	pub description: Option<String>,
	pub width:       Option<BigDecimal>,
	pub length:      Option<BigDecimal>,
	pub height:      Option<BigDecimal>,
	pub latitude:    Option<f64>,
	pub longitude:   Option<f64>,
}

impl SpotUpdate {
	/// Apply this update to the spot with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		s_id: i32,
		conn: &DbConn,
	) -> Result<PrimitiveSpot, Error> {
		let updated = conn
			.interact(move |conn| {
				use self::spot::dsl::*;

				diesel::update(spot.find(s_id))
					.set(self)
					.returning(PrimitiveSpot::as_returning())
					.get_result(conn)
			})
			.await??;

		Ok(updated)
	}
}
