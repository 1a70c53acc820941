use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use models::{PrimitiveReservation, PrimitiveReview};

use crate::Session;
use crate::schemas::review::{
	CreateReviewRequest,
	ReviewResponse,
	UpdateReviewRequest,
};

#[instrument(skip(pool))]
pub async fn create_review(
	State(pool): State<DbPool>,
	session: Session,
	Path(reservation_id): Path<i32>,
	Json(request): Json<CreateReviewRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	// Only the renter of the reservation may review it
	let reservation = PrimitiveReservation::get_for_profile(
		reservation_id,
		session.data.profile_id,
		&conn,
	)
	.await?;

	let new_review =
		request.to_insertable(session.data.profile_id, reservation.id)?;
	let review = new_review.insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(ReviewResponse::from(review))))
}

#[instrument(skip(pool))]
pub async fn get_review_for_reservation(
	State(pool): State<DbPool>,
	_session: Session,
	Path(reservation_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let review =
		PrimitiveReview::active_for_reservation(reservation_id, &conn).await?;
	let response: Option<ReviewResponse> = review.map(Into::into);

	Ok((StatusCode::OK, Json(response)))
}

/// The reviews renters left on a schedule's reservations
#[instrument(skip(pool))]
pub async fn get_reviews_for_schedule(
	State(pool): State<DbPool>,
	Path(schedule_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let reservations =
		PrimitiveReservation::for_schedule(schedule_id, &conn).await?;
	let reservation_ids = reservations.into_iter().map(|r| r.id).collect();

	let reviews =
		PrimitiveReview::for_reservations(reservation_ids, &conn).await?;
	let response: Vec<ReviewResponse> =
		reviews.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn update_review(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
	Json(request): Json<UpdateReviewRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let review = PrimitiveReview::get_by_id(id, &conn).await?;

	if review.profile_id != session.data.profile_id {
		return Err(Error::Forbidden);
	}

	let update = request.to_insertable()?;
	let updated = update.apply_to(review.id, &conn).await?;

	Ok((StatusCode::OK, Json(ReviewResponse::from(updated))))
}

#[instrument(skip(pool))]
pub async fn remove_review(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let review = PrimitiveReview::get_by_id(id, &conn).await?;

	if review.profile_id != session.data.profile_id {
		return Err(Error::Forbidden);
	}

	PrimitiveReview::remove(review.id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(pool))]
pub async fn get_all_reviews(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let reviews = PrimitiveReview::get_all(&conn).await?;
	let response: Vec<ReviewResponse> =
		reviews.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn admin_remove_review(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	PrimitiveReview::remove(id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}
