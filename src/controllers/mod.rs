use axum::extract::State;
use axum::response::NoContent;
use common::{DbPool, Error};
use diesel::{RunQueryDsl, sql_query};

pub mod auth;
pub mod bookmark;
pub mod payment;
pub mod profile;
pub mod reservation;
pub mod review;
pub mod schedule;
pub mod spot;
pub mod vehicle;
pub mod withdrawal;

/// Check if the database connection and webserver are functional
pub async fn healthcheck(
	State(pool): State<DbPool>,
) -> Result<NoContent, Error> {
	let conn = pool.get().await?;

	conn.interact(|conn| sql_query("SELECT 1").execute(conn)).await??;

	Ok(NoContent)
}

/// Promote a missing referenced entity to a referential integrity fault
///
/// Used while assembling responses; a stored row pointing at an id that
/// no longer resolves is corrupt data, not a bad request
pub(crate) fn required<T>(
	result: Result<T, Error>,
	context: impl FnOnce() -> String,
) -> Result<T, Error> {
	match result {
		Err(Error::NotFound(_)) => Err(Error::ReferentialIntegrity(context())),
		other => other,
	}
}
