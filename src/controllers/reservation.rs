use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{CreateReservationError, DbConn, DbPool, Error};
use models::{
	PrimitivePayment,
	PrimitiveReservation,
	PrimitiveReview,
	PrimitiveSchedule,
	PrimitiveSpot,
	PrimitiveVehicle,
	ReservationState,
	StoredFile,
};

use crate::Session;
use crate::controllers::required;
use crate::schemas::reservation::{
	AdminCreateReservationRequest,
	CreateReservationRequest,
	ReservationResponse,
	UpdateReservationRequest,
};
use crate::schemas::spot::SpotResponse;
use crate::schemas::vehicle::VehicleResponse;

/// Assemble the full response for one reservation: the spot it is
/// parked at, the vehicle parked there, and the payment/review made
/// against it
pub(crate) async fn build_reservation_response(
	reservation: PrimitiveReservation,
	conn: &DbConn,
) -> Result<ReservationResponse, Error> {
	let schedule = required(
		PrimitiveSchedule::get_by_id(reservation.schedule_id, conn).await,
		|| {
			format!(
				"reservation {} references missing schedule {}",
				reservation.id, reservation.schedule_id
			)
		},
	)?;

	let spot = required(
		PrimitiveSpot::get_by_id(schedule.spot_id, conn).await,
		|| {
			format!(
				"schedule {} references missing spot {}",
				schedule.id, schedule.spot_id
			)
		},
	)?;
	let spot_image = StoredFile::resolve(spot.image_id, conn).await?;

	let vehicle = required(
		PrimitiveVehicle::get_by_id(reservation.vehicle_id, conn).await,
		|| {
			format!(
				"reservation {} references missing vehicle {}",
				reservation.id, reservation.vehicle_id
			)
		},
	)?;
	let vehicle_image = StoredFile::resolve(vehicle.image_id, conn).await?;

	let payment =
		PrimitivePayment::for_reservation(reservation.id, conn).await?;
	let review =
		PrimitiveReview::active_for_reservation(reservation.id, conn).await?;

	Ok(ReservationResponse::from_parts(
		reservation,
		Some(SpotResponse::from_parts(spot, spot_image)),
		Some(VehicleResponse::from_parts(vehicle, vehicle_image)),
		payment.map(Into::into),
		review.map(Into::into),
	))
}

async fn build_reservation_responses(
	reservations: Vec<PrimitiveReservation>,
	conn: &DbConn,
) -> Result<Vec<ReservationResponse>, Error> {
	let mut responses = Vec::with_capacity(reservations.len());

	for reservation in reservations {
		responses.push(build_reservation_response(reservation, conn).await?);
	}

	Ok(responses)
}

#[instrument(skip(pool))]
pub async fn create_reservation(
	State(pool): State<DbPool>,
	session: Session,
	Path(schedule_id): Path<i32>,
	Json(request): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let new_reservation =
		request.to_insertable(session.data.profile_id, schedule_id)?;
	let reservation = new_reservation.insert(&conn).await?;

	let response = build_reservation_response(reservation, &conn).await?;

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_my_reservations(
	State(pool): State<DbPool>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let reservations =
		PrimitiveReservation::for_profile(session.data.profile_id, &conn)
			.await?;
	let response = build_reservation_responses(reservations, &conn).await?;

	Ok((StatusCode::OK, Json(response)))
}

/// Every reservation made against any schedule the caller publishes
#[instrument(skip(pool))]
pub async fn get_reservations_for_my_schedules(
	State(pool): State<DbPool>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let schedules =
		PrimitiveSchedule::for_profile(session.data.profile_id, &conn).await?;
	let schedule_ids = schedules.into_iter().map(|s| s.id).collect();

	let reservations =
		PrimitiveReservation::for_schedules(schedule_ids, &conn).await?;
	let response = build_reservation_responses(reservations, &conn).await?;

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_reservations_for_schedule(
	State(pool): State<DbPool>,
	_session: Session,
	Path(schedule_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let reservations =
		PrimitiveReservation::for_schedule(schedule_id, &conn).await?;
	let response = build_reservation_responses(reservations, &conn).await?;

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_reservation(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let reservation = PrimitiveReservation::get_for_profile(
		id,
		session.data.profile_id,
		&conn,
	)
	.await?;
	let response = build_reservation_response(reservation, &conn).await?;

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn update_reservation(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
	Json(request): Json<UpdateReservationRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let reservation = PrimitiveReservation::get_for_profile(
		id,
		session.data.profile_id,
		&conn,
	)
	.await?;

	// The replacement vehicle must belong to the renter as well
	let update = request.to_insertable();

	match PrimitiveVehicle::get_for_owner(
		update.vehicle_id,
		session.data.profile_id,
		&conn,
	)
	.await
	{
		Ok(_) => {},
		Err(Error::NotFound(_)) => {
			return Err(CreateReservationError::VehicleNotOwned.into());
		},
		Err(e) => return Err(e),
	}

	let updated = update.apply_to(reservation.id, &conn).await?;
	let response = build_reservation_response(updated, &conn).await?;

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn cancel_reservation(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let reservation = PrimitiveReservation::get_for_profile(
		id,
		session.data.profile_id,
		&conn,
	)
	.await?;

	let cancelled =
		PrimitiveReservation::cancel(reservation.id, &conn).await?;
	let response = build_reservation_response(cancelled, &conn).await?;

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_all_reservations(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let reservations = PrimitiveReservation::get_all(&conn).await?;
	let response = build_reservation_responses(reservations, &conn).await?;

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn admin_create_reservation(
	State(pool): State<DbPool>,
	Json(request): Json<AdminCreateReservationRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let new_reservation = request.to_insertable()?;
	let reservation = new_reservation.insert(&conn).await?;

	let response = build_reservation_response(reservation, &conn).await?;

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(pool))]
pub async fn confirm_reservation(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let confirmed = PrimitiveReservation::set_state(
		id,
		ReservationState::Confirmed,
		&conn,
	)
	.await?;
	let response = build_reservation_response(confirmed, &conn).await?;

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn remove_reservation(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	PrimitiveReservation::remove(id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}
