use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use models::{PrimitiveProfile, PrimitiveWithdrawal, WithdrawalState};

use crate::Session;
use crate::schemas::withdrawal::{
	BalanceResponse,
	CreateWithdrawalRequest,
	WithdrawalResponse,
};

#[instrument(skip(pool))]
pub async fn create_withdrawal(
	State(pool): State<DbPool>,
	session: Session,
	Json(request): Json<CreateWithdrawalRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let new_withdrawal = request.to_insertable(session.data.profile_id)?;
	let withdrawal = new_withdrawal.insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(WithdrawalResponse::from(withdrawal))))
}

#[instrument(skip(pool))]
pub async fn get_my_withdrawals(
	State(pool): State<DbPool>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let withdrawals =
		PrimitiveWithdrawal::for_profile(session.data.profile_id, &conn)
			.await?;
	let response: Vec<WithdrawalResponse> =
		withdrawals.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_withdrawal(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let withdrawal = PrimitiveWithdrawal::get_for_profile(
		id,
		session.data.profile_id,
		&conn,
	)
	.await?;

	Ok((StatusCode::OK, Json(WithdrawalResponse::from(withdrawal))))
}

#[instrument(skip(pool))]
pub async fn get_balance(
	State(pool): State<DbPool>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let profile =
		PrimitiveProfile::get(session.data.profile_id, &conn).await?;

	Ok((StatusCode::OK, Json(BalanceResponse { balance: profile.balance })))
}

#[instrument(skip(pool))]
pub async fn get_all_withdrawals(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let withdrawals = PrimitiveWithdrawal::get_all(&conn).await?;
	let response: Vec<WithdrawalResponse> =
		withdrawals.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn process_withdrawal(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let withdrawal = PrimitiveWithdrawal::set_state(
		id,
		WithdrawalState::Processing,
		&conn,
	)
	.await?;

	Ok((StatusCode::OK, Json(WithdrawalResponse::from(withdrawal))))
}

#[instrument(skip(pool))]
pub async fn complete_withdrawal(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let withdrawal = PrimitiveWithdrawal::set_state(
		id,
		WithdrawalState::Completed,
		&conn,
	)
	.await?;

	Ok((StatusCode::OK, Json(WithdrawalResponse::from(withdrawal))))
}

/// Archiving a withdrawal never refunds the debited balance
#[instrument(skip(pool))]
pub async fn archive_withdrawal(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	PrimitiveWithdrawal::archive(id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}
