use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use models::{PrimitivePayment, PrimitiveReservation};

use crate::Session;
use crate::schemas::payment::{CreatePaymentRequest, PaymentResponse};

#[instrument(skip(pool))]
pub async fn create_payment(
	State(pool): State<DbPool>,
	session: Session,
	Path(reservation_id): Path<i32>,
	Json(request): Json<CreatePaymentRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let reservation =
		PrimitiveReservation::get_by_id(reservation_id, &conn).await?;

	// Only the renter pays for a reservation
	if reservation.profile_id != session.data.profile_id {
		return Err(Error::ValidationError(
			"only the renter may pay for a reservation".to_string(),
		));
	}

	let new_payment =
		request.to_insertable(session.data.profile_id, reservation.id)?;
	let payment = new_payment.insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(PaymentResponse::from(payment))))
}

#[instrument(skip(pool))]
pub async fn get_payment_for_reservation(
	State(pool): State<DbPool>,
	session: Session,
	Path(reservation_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let reservation = PrimitiveReservation::get_for_profile(
		reservation_id,
		session.data.profile_id,
		&conn,
	)
	.await?;

	let payment =
		PrimitivePayment::for_reservation(reservation.id, &conn).await?;
	let response: Option<PaymentResponse> = payment.map(Into::into);

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_my_payments(
	State(pool): State<DbPool>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let payments =
		PrimitivePayment::for_profile(session.data.profile_id, &conn).await?;
	let response: Vec<PaymentResponse> =
		payments.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_all_payments(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let payments = PrimitivePayment::get_all(&conn).await?;
	let response: Vec<PaymentResponse> =
		payments.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

/// Completing a payment credits the schedule owner's balance in the
/// same transaction
#[instrument(skip(pool))]
pub async fn complete_payment(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let payment = PrimitivePayment::complete(id, &conn).await?;

	Ok((StatusCode::OK, Json(PaymentResponse::from(payment))))
}

#[instrument(skip(pool))]
pub async fn archive_payment(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	PrimitivePayment::archive(id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}
