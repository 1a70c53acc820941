use std::path::PathBuf;

use axum_extra::extract::cookie::Key;
use common::{DbPool, RedisConn};
use deadpool_diesel::postgres::Manager;

#[derive(Clone, Debug)]
pub struct Config {
	pub production: bool,

	pub database_url: String,
	pub redis_url:    String,

	pub access_cookie_name:     String,
	pub access_cookie_lifetime: time::Duration,
	pub cookie_jar_secret:      String,

	pub upload_dir: PathBuf,
}

impl Config {
	fn get_env_var(var: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| panic!("{var} must be set"))
	}

	/// Create a new [`Config`] from environment variables
	///
	/// # Panics
	/// Panics if an environment variable is missing or malformed
	#[must_use]
	pub fn from_env() -> Self {
		let production = std::env::var("PRODUCTION").is_ok();

		let database_url = Self::get_env_var("DATABASE_URL");
		let redis_url = Self::get_env_var("REDIS_URL");

		let access_cookie_name = Self::get_env_var("ACCESS_COOKIE_NAME");
		let access_cookie_lifetime = time::Duration::minutes(
			Self::get_env_var("ACCESS_COOKIE_LIFETIME_MINUTES")
				.parse::<i64>()
				.unwrap(),
		);
		let cookie_jar_secret = Self::get_env_var("COOKIE_JAR_SECRET");

		let upload_dir = PathBuf::from(Self::get_env_var("UPLOAD_DIR"));

		Self {
			production,
			database_url,
			redis_url,
			access_cookie_name,
			access_cookie_lifetime,
			cookie_jar_secret,
			upload_dir,
		}
	}

	/// Create a database pool for the given config
	///
	/// # Panics
	/// Panics if creating the pool fails
	#[must_use]
	pub fn create_database_pool(&self) -> DbPool {
		let manager = Manager::new(
			self.database_url.to_string(),
			deadpool_diesel::Runtime::Tokio1,
		);

		DbPool::builder(manager).build().unwrap()
	}

	/// Connect to the redis session store
	///
	/// # Panics
	/// Panics if the connection cannot be established
	pub async fn create_redis_connection(&self) -> RedisConn {
		let client = redis::Client::open(self.redis_url.as_str()).unwrap();

		client.get_multiplexed_tokio_connection().await.unwrap()
	}

	/// The key used to sign and encrypt private cookies
	#[must_use]
	pub fn cookie_jar_key(&self) -> Key {
		Key::derive_from(self.cookie_jar_secret.as_bytes())
	}
}
