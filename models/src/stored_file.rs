use chrono::NaiveDateTime;
use common::{DbConn, Error};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::stored_file;

/// A reference to an uploaded file on disk
///
/// The rest of the system only stores and forwards the id; bytes live
/// under the configured uploads directory
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = stored_file)]
#[diesel(check_for_backend(Pg))]
pub struct StoredFile {
	pub id:         i32,
	pub profile_id: i32,
	pub path:       String,
	pub created_at: NaiveDateTime,
}

impl StoredFile {
	/// Resolve the path of a file id, if one is set
	///
	/// A set id that no longer resolves is a referential integrity fault,
	/// not a missing image
	#[instrument(skip(conn))]
	pub async fn resolve(
		f_id: Option<i32>,
		conn: &DbConn,
	) -> Result<Option<String>, Error> {
		let Some(f_id) = f_id else {
			return Ok(None);
		};

		let result: Option<Self> = conn
			.interact(move |conn| {
				use self::stored_file::dsl::*;

				stored_file
					.find(f_id)
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??;

		let file = result.ok_or_else(|| {
			Error::ReferentialIntegrity(format!(
				"stored file {f_id} is referenced but does not exist"
			))
		})?;

		Ok(Some(file.path))
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = stored_file)]
pub struct NewStoredFile {
	pub profile_id: i32,
	pub path:       String,
}

impl NewStoredFile {
	/// Insert this [`NewStoredFile`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<StoredFile, Error> {
		let created = conn
			.interact(|conn| {
				use self::stored_file::dsl::*;

				diesel::insert_into(stored_file)
					.values(self)
					.returning(StoredFile::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("stored file {} at {}", created.id, created.path);

		Ok(created)
	}
}
