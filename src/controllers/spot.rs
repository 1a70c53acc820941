use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use common::{DbConn, DbPool, Error};
use models::{
	ListingState,
	NewStoredFile,
	PageQuery,
	PrimitiveSpot,
	StoredFile,
};

use crate::schemas::spot::{
	CreateSpotRequest,
	SpotResponse,
	UpdateSpotRequest,
};
use crate::{Config, Session};

/// Resolve the image of every spot in a listing
pub(crate) async fn build_spot_responses(
	spots: Vec<PrimitiveSpot>,
	conn: &DbConn,
) -> Result<Vec<SpotResponse>, Error> {
	let mut responses = Vec::with_capacity(spots.len());

	for spot in spots {
		let image_path = StoredFile::resolve(spot.image_id, conn).await?;

		responses.push(SpotResponse::from_parts(spot, image_path));
	}

	Ok(responses)
}

#[instrument(skip(pool))]
pub async fn get_spots(
	State(pool): State<DbPool>,
	Query(page): Query<PageQuery>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let (total, spots) = PrimitiveSpot::get_active(page, &conn).await?;
	let spots = build_spot_responses(spots, &conn).await?;
	let response = page.paginate(total, spots);

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_spot(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let spot = PrimitiveSpot::get_by_id(id, &conn).await?;

	if spot.state == ListingState::Removed {
		return Err(Error::NotFound(format!("no spot with id {id}")));
	}

	let image_path = StoredFile::resolve(spot.image_id, &conn).await?;

	Ok((StatusCode::OK, Json(SpotResponse::from_parts(spot, image_path))))
}

#[instrument(skip(pool))]
pub async fn get_my_spots(
	State(pool): State<DbPool>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let spots =
		PrimitiveSpot::for_profile(session.data.profile_id, &conn).await?;
	let response = build_spot_responses(spots, &conn).await?;

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_all_spots(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let spots = PrimitiveSpot::get_all(&conn).await?;
	let response = build_spot_responses(spots, &conn).await?;

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn create_spot(
	State(pool): State<DbPool>,
	session: Session,
	Json(request): Json<CreateSpotRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let new_spot = request.to_insertable(session.data.profile_id)?;
	let spot = new_spot.insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(SpotResponse::from(spot))))
}

#[instrument(skip(pool))]
pub async fn update_spot(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
	Json(request): Json<UpdateSpotRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let spot =
		PrimitiveSpot::get_for_owner(id, session.data.profile_id, &conn)
			.await?;

	let update = request.to_insertable()?;
	let updated = update.apply_to(spot.id, &conn).await?;
	let image_path = StoredFile::resolve(updated.image_id, &conn).await?;

	Ok((StatusCode::OK, Json(SpotResponse::from_parts(updated, image_path))))
}

#[instrument(skip(pool))]
pub async fn delete_spot(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let spot =
		PrimitiveSpot::get_for_owner(id, session.data.profile_id, &conn)
			.await?;

	PrimitiveSpot::archive(spot.id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(pool, config, data))]
pub async fn upload_spot_image(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	Path(id): Path<i32>,
	mut data: Multipart,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let spot =
		PrimitiveSpot::get_for_owner(id, session.data.profile_id, &conn)
			.await?;

	let Some(field) = data.next_field().await? else {
		return Err(Error::ValidationError(
			"no image field in request".to_string(),
		));
	};

	let file_name = field.file_name().unwrap_or("image").to_string();
	let bytes = field.bytes().await?;

	let disk_name = format!(
		"{}-{}-{file_name}",
		session.data.profile_id,
		Utc::now().timestamp_millis(),
	);
	let disk_path = config.upload_dir.join(&disk_name);

	tokio::fs::create_dir_all(&config.upload_dir).await?;
	tokio::fs::write(&disk_path, &bytes).await?;

	let stored = NewStoredFile {
		profile_id: session.data.profile_id,
		path:       disk_name,
	}
	.insert(&conn)
	.await?;

	let spot = PrimitiveSpot::set_image(spot.id, stored.id, &conn).await?;
	let response = SpotResponse::from_parts(spot, Some(stored.path));

	Ok((StatusCode::CREATED, Json(response)))
}
