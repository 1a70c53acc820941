use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use models::{ListingState, PrimitiveBookmark, PrimitiveSpot};

use crate::Session;
use crate::controllers::spot::build_spot_responses;
use crate::schemas::bookmark::BookmarkToggleResponse;

#[instrument(skip(pool))]
pub async fn toggle_bookmark(
	State(pool): State<DbPool>,
	session: Session,
	Path(spot_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let spot = PrimitiveSpot::get_by_id(spot_id, &conn).await?;

	if spot.state == ListingState::Removed {
		return Err(Error::NotFound(format!("no spot with id {spot_id}")));
	}

	let bookmarked = PrimitiveBookmark::toggle(
		session.data.profile_id,
		spot.id,
		&conn,
	)
	.await?;

	Ok((
		StatusCode::OK,
		Json(BookmarkToggleResponse { spot_id: spot.id, bookmarked }),
	))
}

#[instrument(skip(pool))]
pub async fn get_bookmarked_spots(
	State(pool): State<DbPool>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let spots = PrimitiveBookmark::spots_for_profile(
		session.data.profile_id,
		&conn,
	)
	.await?;
	let response = build_spot_responses(spots, &conn).await?;

	Ok((StatusCode::OK, Json(response)))
}
