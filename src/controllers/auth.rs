//! Controllers for registration, login, and logout

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::PrivateCookieJar;
use common::{DbPool, Error, LoginError, RedisConn};
use models::{PrimitiveProfile, ProfileState};

use crate::schemas::auth::{LoginRequest, RegisterRequest};
use crate::schemas::profile::ProfileResponse;
use crate::{Config, Session};

#[instrument(skip_all)]
pub async fn register(
	State(pool): State<DbPool>,
	State(mut r_conn): State<RedisConn>,
	State(config): State<Config>,
	jar: PrivateCookieJar,
	Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let new_profile = request.to_insertable()?;
	let profile = new_profile.insert(&conn).await?;

	let session = Session::create(
		config.access_cookie_lifetime,
		&profile,
		&mut r_conn,
	)
	.await?;

	let cookie = session.to_access_token_cookie(
		config.access_cookie_name.clone(),
		config.access_cookie_lifetime,
		config.production,
	);
	let jar = jar.add(cookie);

	let response = ProfileResponse::from_parts(profile, None);

	Ok((StatusCode::CREATED, jar, Json(response)))
}

#[instrument(skip_all)]
pub async fn login(
	State(pool): State<DbPool>,
	State(mut r_conn): State<RedisConn>,
	State(config): State<Config>,
	jar: PrivateCookieJar,
	Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let profile =
		PrimitiveProfile::get_by_username(request.username.clone(), &conn)
			.await?
			.ok_or(LoginError::UnknownUsername(request.username))?;

	if profile.state == ProfileState::Disabled {
		return Err(LoginError::Disabled.into());
	}

	profile.verify_password(&request.password)?;

	PrimitiveProfile::touch_login(profile.id, &conn).await?;

	let session = Session::create(
		config.access_cookie_lifetime,
		&profile,
		&mut r_conn,
	)
	.await?;

	info!("logged in profile {}", profile.id);

	let cookie = session.to_access_token_cookie(
		config.access_cookie_name.clone(),
		config.access_cookie_lifetime,
		config.production,
	);
	let jar = jar.add(cookie);

	let response = ProfileResponse::from_parts(profile, None);

	Ok((StatusCode::OK, jar, Json(response)))
}

#[instrument(skip_all)]
pub async fn logout(
	State(mut r_conn): State<RedisConn>,
	State(config): State<Config>,
	session: Session,
	jar: PrivateCookieJar,
) -> Result<impl IntoResponse, Error> {
	Session::delete(session.id, &mut r_conn).await?;

	let jar = jar.remove(config.access_cookie_name.clone());

	Ok((StatusCode::NO_CONTENT, jar))
}
