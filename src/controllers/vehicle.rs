use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use models::{PrimitiveVehicle, StoredFile};

use crate::Session;
use crate::schemas::vehicle::{
	CreateVehicleRequest,
	UpdateVehicleRequest,
	VehicleResponse,
};

#[instrument(skip(pool))]
pub async fn get_my_vehicles(
	State(pool): State<DbPool>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let vehicles =
		PrimitiveVehicle::for_profile(session.data.profile_id, &conn).await?;

	let mut response = Vec::with_capacity(vehicles.len());

	for vehicle in vehicles {
		let image_path = StoredFile::resolve(vehicle.image_id, &conn).await?;

		response.push(VehicleResponse::from_parts(vehicle, image_path));
	}

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_vehicle(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let vehicle =
		PrimitiveVehicle::get_for_owner(id, session.data.profile_id, &conn)
			.await?;
	let image_path = StoredFile::resolve(vehicle.image_id, &conn).await?;

	Ok((StatusCode::OK, Json(VehicleResponse::from_parts(vehicle, image_path))))
}

#[instrument(skip(pool))]
pub async fn create_vehicle(
	State(pool): State<DbPool>,
	session: Session,
	Json(request): Json<CreateVehicleRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let new_vehicle = request.to_insertable(session.data.profile_id)?;
	let vehicle = new_vehicle.insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(VehicleResponse::from(vehicle))))
}

#[instrument(skip(pool))]
pub async fn update_vehicle(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
	Json(request): Json<UpdateVehicleRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let vehicle =
		PrimitiveVehicle::get_for_owner(id, session.data.profile_id, &conn)
			.await?;

	let update = request.to_insertable()?;
	let updated = update.apply_to(vehicle.id, &conn).await?;
	let image_path = StoredFile::resolve(updated.image_id, &conn).await?;

	Ok((StatusCode::OK, Json(VehicleResponse::from_parts(updated, image_path))))
}

#[instrument(skip(pool))]
pub async fn delete_vehicle(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let vehicle =
		PrimitiveVehicle::get_for_owner(id, session.data.profile_id, &conn)
			.await?;

	PrimitiveVehicle::archive(vehicle.id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}
