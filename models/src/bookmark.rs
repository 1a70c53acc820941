use chrono::NaiveDateTime;
use common::{DbConn, Error};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::{bookmark, spot};
use crate::{BookmarkState, ListingState, PrimitiveSpot};

/// A profile's bookmark on a spot
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = bookmark)]
#[diesel(primary_key(profile_id, spot_id))]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveBookmark {
	pub profile_id: i32,
	pub spot_id:    i32,
	pub state:      BookmarkState,
	pub created_at: NaiveDateTime,
	pub updated_at: NaiveDateTime,
}

impl PrimitiveBookmark {
	/// Toggle the bookmark of a spot for a profile
	///
	/// Returns whether the spot is bookmarked after the toggle
	#[instrument(skip(conn))]
	pub async fn toggle(
		p_id: i32,
		s_id: i32,
		conn: &DbConn,
	) -> Result<bool, Error> {
		let bookmarked = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let existing: Option<Self> = bookmark::table
						.find((p_id, s_id))
						.for_update()
						.select(Self::as_select())
						.get_result(conn)
						.optional()?;

					let bookmarked = match existing {
						None => {
							diesel::insert_into(bookmark::table)
								.values((
									bookmark::profile_id.eq(p_id),
									bookmark::spot_id.eq(s_id),
								))
								.execute(conn)?;

							true
						},
						Some(b) => {
							let next = match b.state {
								BookmarkState::Active => {
									BookmarkState::Removed
								},
								BookmarkState::Removed => {
									BookmarkState::Active
								},
							};

							diesel::update(bookmark::table.find((p_id, s_id)))
								.set(bookmark::state.eq(next))
								.execute(conn)?;

							next == BookmarkState::Active
						},
					};

					Ok(bookmarked)
				})
			})
			.await??;

		info!("toggled bookmark ({p_id}, {s_id}) to {bookmarked}");

		Ok(bookmarked)
	}

	/// Get the active spots a profile has bookmarked, newest bookmark
	/// first
	#[instrument(skip(conn))]
	pub async fn spots_for_profile(
		p_id: i32,
		conn: &DbConn,
	) -> Result<Vec<PrimitiveSpot>, Error> {
		let spots = conn
			.interact(move |conn| {
				bookmark::table
					.inner_join(spot::table)
					.filter(bookmark::profile_id.eq(p_id))
					.filter(bookmark::state.eq(BookmarkState::Active))
					.filter(spot::state.eq(ListingState::Active))
					.order(bookmark::created_at.desc())
					.select(PrimitiveSpot::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(spots)
	}
}
