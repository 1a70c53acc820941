use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use common::{DbConn, Error};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ProfileState;
use crate::schema::profile;

/// A single registered user
///
/// The balance field doubles as the user's balance account; it is only
/// ever mutated inside withdrawal/payment transactions
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = profile)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveProfile {
	pub id:              i32,
	pub username:        String,
	#[serde(skip)]
	pub password_hash:   String,
	pub email:           Option<String>,
	pub first_name:      Option<String>,
	pub last_name:       Option<String>,
	pub avatar_image_id: Option<i32>,
	pub is_admin:        bool,
	pub state:           ProfileState,
	pub balance:         BigDecimal,
	pub created_at:      NaiveDateTime,
	pub updated_at:      NaiveDateTime,
	pub last_login_at:   NaiveDateTime,
}

/// Hash a plaintext password for storage
pub fn hash_password(password: &str) -> Result<String, Error> {
	let salt = SaltString::generate(&mut OsRng);
	let hash =
		Argon2::default().hash_password(password.as_bytes(), &salt)?.to_string();

	Ok(hash)
}

impl PrimitiveProfile {
	/// Check a plaintext password against the stored hash
	pub fn verify_password(&self, password: &str) -> Result<(), Error> {
		let hash = PasswordHash::new(&self.password_hash)?;

		Argon2::default().verify_password(password.as_bytes(), &hash)?;

		Ok(())
	}

	/// Get a [`PrimitiveProfile`] given its id
	#[instrument(skip(conn))]
	pub async fn get(p_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let result = conn
			.interact(move |conn| {
				use self::profile::dsl::*;

				profile.find(p_id).select(Self::as_select()).get_result(conn)
			})
			.await??;

		Ok(result)
	}

	/// Get a [`PrimitiveProfile`] given its username, if one exists
	#[instrument(skip(conn))]
	pub async fn get_by_username(
		name: String,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		let result = conn
			.interact(move |conn| {
				use self::profile::dsl::*;

				profile
					.filter(username.eq(name))
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??;

		Ok(result)
	}

	/// Get all profiles, newest first
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let profiles = conn
			.interact(|conn| {
				use self::profile::dsl::*;

				profile
					.order(created_at.desc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(profiles)
	}

	/// Record a successful login
	#[instrument(skip(conn))]
	pub async fn touch_login(p_id: i32, conn: &DbConn) -> Result<(), Error> {
		conn.interact(move |conn| {
			use self::profile::dsl::*;

			diesel::update(profile.find(p_id))
				.set(last_login_at.eq(diesel::dsl::now))
				.execute(conn)
		})
		.await??;

		Ok(())
	}

	/// Set the state of the profile with the given id
	#[instrument(skip(conn))]
	pub async fn set_state(
		p_id: i32,
		new_state: ProfileState,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let updated = conn
			.interact(move |conn| {
				use self::profile::dsl::*;

				diesel::update(profile.find(p_id))
					.set(state.eq(new_state))
					.returning(Self::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("set state of profile {p_id} to {new_state:?}");

		Ok(updated)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = profile)]
pub struct NewProfile {
	pub username:      String,
	pub password_hash: String,
	pub email:         Option<String>,
	pub first_name:    Option<String>,
	pub last_name:     Option<String>,
}

impl NewProfile {
	/// Insert this [`NewProfile`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<PrimitiveProfile, Error> {
		let created = conn
			.interact(|conn| {
				use self::profile::dsl::*;

				diesel::insert_into(profile)
					.values(self)
					.returning(PrimitiveProfile::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created profile {} ({})", created.id, created.username);

		Ok(created)
	}
}

#[derive(AsChangeset, Clone, Debug, Default, Deserialize, Serialize)]
#[diesel(table_name = profile)]
pub struct ProfileUpdate {
	pub email:           Option<String>,
	pub first_name:      Option<String>,
	pub last_name:       Option<String>,
	pub avatar_image_id: Option<i32>,
}

impl ProfileUpdate {
	/// Apply this update to the profile with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		p_id: i32,
		conn: &DbConn,
	) -> Result<PrimitiveProfile, Error> {
		let updated = conn
			.interact(move |conn| {
				use self::profile::dsl::*;

				diesel::update(profile.find(p_id))
					.set(self)
					.returning(PrimitiveProfile::as_returning())
					.get_result(conn)
			})
			.await??;

		Ok(updated)
	}
}
