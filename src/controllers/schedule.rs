use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbConn, DbPool, Error};
use models::{
	ListingState,
	PageQuery,
	PrimitiveSchedule,
	PrimitiveSpot,
	StoredFile,
};

use crate::controllers::required;
use crate::schemas::schedule::{
	CreateScheduleRequest,
	ScheduleResponse,
	UpdateScheduleRequest,
};
use crate::Session;
use crate::schemas::spot::SpotResponse;

/// Assemble full responses for a listing of schedules
///
/// Ratings are aggregated in one query; the spot behind each schedule is
/// resolved individually
pub(crate) async fn build_schedule_responses(
	schedules: Vec<PrimitiveSchedule>,
	conn: &DbConn,
) -> Result<Vec<ScheduleResponse>, Error> {
	let ids: Vec<i32> = schedules.iter().map(|s| s.id).collect();
	let ratings = PrimitiveSchedule::average_ratings(ids, conn).await?;

	let mut responses = Vec::with_capacity(schedules.len());

	for schedule in schedules {
		let spot = required(
			PrimitiveSpot::get_by_id(schedule.spot_id, conn).await,
			|| {
				format!(
					"schedule {} references missing spot {}",
					schedule.id, schedule.spot_id
				)
			},
		)?;
		let image_path = StoredFile::resolve(spot.image_id, conn).await?;
		let rating = ratings.get(&schedule.id).copied().unwrap_or(0.0);

		responses.push(ScheduleResponse::from_parts(
			schedule,
			rating,
			Some(SpotResponse::from_parts(spot, image_path)),
		));
	}

	Ok(responses)
}

#[instrument(skip(pool))]
pub async fn search_schedules(
	State(pool): State<DbPool>,
	Query(page): Query<PageQuery>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let (total, schedules) =
		PrimitiveSchedule::get_open(page, &conn).await?;
	let schedules = build_schedule_responses(schedules, &conn).await?;
	let response = page.paginate(total, schedules);

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_schedule(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let schedule = PrimitiveSchedule::get_by_id(id, &conn).await?;

	if schedule.state == ListingState::Removed {
		return Err(Error::NotFound(format!("no schedule with id {id}")));
	}

	let response = build_schedule_responses(vec![schedule], &conn)
		.await?
		.pop()
		.ok_or(Error::InternalServerError)?;

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_my_schedules(
	State(pool): State<DbPool>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let schedules =
		PrimitiveSchedule::for_profile(session.data.profile_id, &conn).await?;
	let response = build_schedule_responses(schedules, &conn).await?;

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_schedules_for_spot(
	State(pool): State<DbPool>,
	Path(spot_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let schedules = PrimitiveSchedule::for_spot(spot_id, &conn).await?;
	let response = build_schedule_responses(schedules, &conn).await?;

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_all_schedules(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let schedules = PrimitiveSchedule::get_all(&conn).await?;
	let response = build_schedule_responses(schedules, &conn).await?;

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn create_schedule(
	State(pool): State<DbPool>,
	session: Session,
	Json(request): Json<CreateScheduleRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let new_schedule = request.to_insertable(session.data.profile_id)?;

	// A schedule may only be published for an active spot of the same
	// owner
	let spot = PrimitiveSpot::get_by_id(new_schedule.spot_id, &conn).await?;

	if spot.profile_id != session.data.profile_id
		|| spot.state != ListingState::Active
	{
		return Err(Error::ValidationError(
			"the spot does not belong to you".to_string(),
		));
	}

	let schedule = new_schedule.insert(&conn).await?;
	let image_path = StoredFile::resolve(spot.image_id, &conn).await?;

	let response = ScheduleResponse::from_parts(
		schedule,
		0.0,
		Some(SpotResponse::from_parts(spot, image_path)),
	);

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(pool))]
pub async fn update_schedule(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
	Json(request): Json<UpdateScheduleRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let schedule =
		PrimitiveSchedule::get_for_owner(id, session.data.profile_id, &conn)
			.await?;

	let update = request.to_insertable()?;
	let updated = update.apply_to(schedule.id, &conn).await?;

	let response = build_schedule_responses(vec![updated], &conn)
		.await?
		.pop()
		.ok_or(Error::InternalServerError)?;

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn delete_schedule(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let schedule =
		PrimitiveSchedule::get_for_owner(id, session.data.profile_id, &conn)
			.await?;

	PrimitiveSchedule::archive(schedule.id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}
