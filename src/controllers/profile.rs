use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use models::{PrimitiveProfile, ProfileState, StoredFile};

use crate::Session;
use crate::schemas::profile::{ProfileResponse, UpdateProfileRequest};

#[instrument(skip(pool))]
pub async fn get_current_profile(
	State(pool): State<DbPool>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let profile = PrimitiveProfile::get(session.data.profile_id, &conn).await?;
	let avatar_path = StoredFile::resolve(profile.avatar_image_id, &conn).await?;

	Ok((StatusCode::OK, Json(ProfileResponse::from_parts(profile, avatar_path))))
}

#[instrument(skip(pool))]
pub async fn update_current_profile(
	State(pool): State<DbPool>,
	session: Session,
	Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let update = request.to_insertable()?;
	let profile = update.apply_to(session.data.profile_id, &conn).await?;
	let avatar_path = StoredFile::resolve(profile.avatar_image_id, &conn).await?;

	Ok((StatusCode::OK, Json(ProfileResponse::from_parts(profile, avatar_path))))
}

#[instrument(skip(pool))]
pub async fn get_all_profiles(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let profiles = PrimitiveProfile::get_all(&conn).await?;
	let response: Vec<ProfileResponse> = profiles
		.into_iter()
		.map(|p| ProfileResponse::from_parts(p, None))
		.collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn disable_profile(
	State(pool): State<DbPool>,
	Path(profile_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let profile =
		PrimitiveProfile::set_state(profile_id, ProfileState::Disabled, &conn)
			.await?;

	Ok((StatusCode::OK, Json(ProfileResponse::from_parts(profile, None))))
}

#[instrument(skip(pool))]
pub async fn activate_profile(
	State(pool): State<DbPool>,
	Path(profile_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let profile =
		PrimitiveProfile::set_state(profile_id, ProfileState::Active, &conn)
			.await?;

	Ok((StatusCode::OK, Json(ProfileResponse::from_parts(profile, None))))
}
