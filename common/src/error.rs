//! Library-wide error types and [`From`] impls

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::result::DatabaseErrorKind;
use thiserror::Error;

/// Top level application error, can be converted into a [`Response`]
#[derive(Debug, Error)]
pub enum Error {
	/// Duplicate resource created
	#[error("{0}")]
	Duplicate(String),
	/// Request/operation forbidden
	#[error("forbidden")]
	Forbidden,
	/// An error that should never happen
	#[error("{0}")]
	Infallible(String),
	/// Opaque internal server error
	#[error("internal server error")]
	InternalServerError,
	/// Resource not found
	#[error("not found - {0}")]
	NotFound(String),
	/// Any error related to logging in
	#[error(transparent)]
	LoginError(#[from] LoginError),
	/// Any error related to parsing multipart data
	#[error(transparent)]
	MultipartError(#[from] axum::extract::multipart::MultipartError),
	/// Invalid or missing access token
	#[error(transparent)]
	TokenError(#[from] TokenError),
	/// Malformed booking window text
	#[error(transparent)]
	WindowError(#[from] WindowError),
	/// Any error related to creating a reservation
	#[error(transparent)]
	CreateReservationError(#[from] CreateReservationError),
	/// Any error related to reviewing a reservation
	#[error(transparent)]
	ReviewError(#[from] ReviewError),
	/// Any error related to withdrawing funds
	#[error(transparent)]
	WithdrawalError(#[from] WithdrawalError),
	/// A stored row references an entity that no longer resolves
	#[error("referential integrity violated - {0}")]
	ReferentialIntegrity(String),
	/// Resource could not be validated
	#[error("{0}")]
	ValidationError(String),
}

impl Error {
	/// Return a unique identifying code for this error
	///
	/// When modifying this function an error code should never be reused
	/// once assigned, to avoid unexpectedly breaking the frontend
	fn code(&self) -> i32 {
		match self {
			Self::Duplicate(_) => 1,
			Self::Forbidden => 2,
			Self::Infallible(_) => 3,
			Self::InternalServerError => 4,
			Self::NotFound(_) => 5,
			Self::LoginError(e) => {
				match e {
					LoginError::UnknownUsername(_) => 6,
					LoginError::InvalidPassword => 7,
					LoginError::Disabled => 8,
				}
			},
			Self::TokenError(e) => {
				match e {
					TokenError::MissingAccessToken => 9,
					TokenError::MissingSession => 10,
				}
			},
			Self::WindowError(e) => {
				match e {
					WindowError::MissingSeparator => 11,
					WindowError::InvalidDateTime(_) => 12,
				}
			},
			Self::CreateReservationError(e) => {
				match e {
					CreateReservationError::ScheduleNotOpen => 13,
					CreateReservationError::OutOfBounds { .. } => 14,
					CreateReservationError::TooShort => 15,
					CreateReservationError::BelowMinimum(_) => 16,
					CreateReservationError::Overlapping => 17,
					CreateReservationError::VehicleNotOwned => 18,
				}
			},
			Self::ReviewError(ReviewError::AlreadyReviewed) => 19,
			Self::WithdrawalError(
				WithdrawalError::InsufficientBalance { .. },
			) => 20,
			Self::ReferentialIntegrity(_) => 21,
			Self::ValidationError(_) => 22,
			Self::MultipartError(_) => 23,
		}
	}

	/// Return additional information about the error
	fn info(&self) -> Option<String> {
		match self {
			Self::Duplicate(m)
			| Self::NotFound(m)
			| Self::LoginError(LoginError::UnknownUsername(m))
			| Self::ValidationError(m) => Some(m.to_owned()),
			Self::WindowError(WindowError::InvalidDateTime(m)) => {
				Some(m.to_owned())
			},
			Self::CreateReservationError(e) => {
				match e {
					CreateReservationError::OutOfBounds { start, end } => {
						Some(
							serde_json::json!({"start": start, "end": end})
								.to_string(),
						)
					},
					CreateReservationError::BelowMinimum(min) => {
						Some(serde_json::json!({"min": min}).to_string())
					},
					_ => None,
				}
			},
			Self::WithdrawalError(WithdrawalError::InsufficientBalance {
				balance,
				..
			}) => Some(serde_json::json!({"balance": balance}).to_string()),
			_ => None,
		}
	}
}

/// Convert an error into a [`Response`]
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		error!("{self:?}");

		let message = self.to_string();

		let data = serde_json::json!({
			"message": message,
			"code": self.code(),
			"info": self.info(),
		});

		let status = match self {
			Self::Duplicate(_)
			| Self::ReviewError(ReviewError::AlreadyReviewed) => {
				StatusCode::CONFLICT
			},
			Self::InternalServerError
			| Self::Infallible(_)
			| Self::ReferentialIntegrity(_) => StatusCode::INTERNAL_SERVER_ERROR,
			Self::TokenError(_) => StatusCode::UNAUTHORIZED,
			Self::Forbidden | Self::LoginError(_) => StatusCode::FORBIDDEN,
			Self::WindowError(_)
			| Self::CreateReservationError(_)
			| Self::MultipartError(_) => StatusCode::BAD_REQUEST,
			Self::NotFound(_) => StatusCode::NOT_FOUND,
			Self::ValidationError(_) | Self::WithdrawalError(_) => {
				StatusCode::UNPROCESSABLE_ENTITY
			},
		};

		(status, axum::Json(data)).into_response()
	}
}

/// Any error related to logging in
#[derive(Debug, Error)]
pub enum LoginError {
	#[error("no profile with username '{0}' was found")]
	UnknownUsername(String),
	#[error("invalid password")]
	InvalidPassword,
	#[error("profile is disabled")]
	Disabled,
}

/// Any error related to an access token
#[derive(Debug, Error)]
pub enum TokenError {
	#[error("missing or invalid access token")]
	MissingAccessToken,
	#[error("missing session")]
	MissingSession,
}

/// Any error related to parsing a booking window string
///
/// The window text format is a boundary contract with the frontend:
/// `dd/mm/yyyy HH:MM - dd/mm/yyyy HH:MM`
#[derive(Debug, Error)]
pub enum WindowError {
	#[error("window text is missing the ' - ' separator")]
	MissingSeparator,
	#[error("invalid datetime in window text")]
	InvalidDateTime(String),
}

#[derive(Debug, Error)]
pub enum CreateReservationError {
	/// The schedule is not open for booking
	#[error("this schedule is not open for reservations")]
	ScheduleNotOpen,
	/// The requested window falls outside the schedule window
	#[error("reservation out of bounds for the schedule")]
	OutOfBounds {
		start: NaiveDateTime,
		end:   NaiveDateTime,
	},
	/// The requested window is shorter than one hour
	#[error("a reservation must last at least one hour")]
	TooShort,
	/// The requested window is shorter than the schedule minimum
	#[error("the reservation is shorter than the schedule minimum")]
	BelowMinimum(i32),
	/// The requested window overlaps an existing live reservation
	#[error("the requested window is already booked")]
	Overlapping,
	/// The vehicle does not belong to the renter
	#[error("the vehicle does not belong to you")]
	VehicleNotOwned,
}

/// Any error related to reviewing a reservation
#[derive(Debug, Error)]
pub enum ReviewError {
	#[error("this reservation already has an active review")]
	AlreadyReviewed,
}

/// Any error related to withdrawing funds
#[derive(Debug, Error)]
pub enum WithdrawalError {
	#[error("insufficient balance")]
	InsufficientBalance {
		balance:   BigDecimal,
		requested: BigDecimal,
	},
}

/// A list of possible internal errors
///
/// API end users should never see these details
#[derive(Debug, Error)]
pub enum InternalError {
	/// Unknown database constraint violation
	#[error("constraint error -- {0:?}")]
	ConstraintError(String),
	/// Error executing some database operation
	#[error("database error -- {0:?}")]
	DatabaseError(diesel::result::Error),
	/// Error interacting with a database connection
	#[error("database interaction error -- {0:?}")]
	InteractError(deadpool_diesel::InteractError),
	/// Error acquiring database pool connection
	#[error("database pool error -- {0:?}")]
	PoolError(deadpool_diesel::PoolError),
	/// Error executing some redis operation
	#[error("redis error -- {0:?}")]
	RedisError(redis::RedisError),
	/// Error hashing some value
	#[error("hash error -- {0:?}")]
	HashError(argon2::password_hash::Error),
	/// Error handling some form of I/O
	#[error("I/O error -- {0:?}")]
	IoError(std::io::Error),
	/// Error related to `serde_json`
	#[error("serde_json error -- {0:?}")]
	SerdeJsonError(serde_json::Error),
	/// Attempted to extract a session from a request that has not been
	/// authorized
	#[error("attempted to extract session without checking authorization")]
	SessionWithoutAuth,
}

// Map internal errors to application errors
impl From<InternalError> for Error {
	fn from(value: InternalError) -> Self {
		error!("internal server error -- {value}");

		Self::InternalServerError
	}
}

/// Map validation errors to application errors
impl From<validator::ValidationErrors> for Error {
	fn from(err: validator::ValidationErrors) -> Self {
		let errs = err.field_errors();
		let repr = errs
			.values()
			.map(|v| {
				v.iter()
					.map(ToString::to_string)
					.collect::<Vec<String>>()
					.join("\n")
			})
			.collect::<Vec<String>>()
			.join("\n");

		Self::ValidationError(repr)
	}
}

/// Map password hashing errors to application errors
impl From<argon2::password_hash::Error> for Error {
	fn from(err: argon2::password_hash::Error) -> Self {
		match err {
			argon2::password_hash::Error::Password => {
				LoginError::InvalidPassword.into()
			},
			_ => InternalError::HashError(err).into(),
		}
	}
}

/// Map database interaction errors to application errors
impl From<deadpool_diesel::InteractError> for Error {
	fn from(value: deadpool_diesel::InteractError) -> Self {
		InternalError::InteractError(value).into()
	}
}

/// Map database result errors to application errors
impl From<diesel::result::Error> for Error {
	fn from(err: diesel::result::Error) -> Self {
		match &err {
			// No rows returned by a query that expected at least one
			diesel::result::Error::NotFound => {
				Self::NotFound("no context provided".to_string())
			},
			// Unique constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::UniqueViolation,
				info,
			) => {
				// Unwrap is safe as constraint_name is guaranteed to exist
				// for postgres
				let constraint_name = info.constraint_name().unwrap();

				// Standard constraint names in postgres are
				// {tablename}_{columnname}_{suffix}
				let Some(field) = constraint_name.split('_').nth(1) else {
					return InternalError::ConstraintError(
						constraint_name.to_string(),
					)
					.into();
				};

				Self::Duplicate(format!("'{field}' is already in use"))
			},
			// Foreign key constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::ForeignKeyViolation,
				info,
			) => Self::ValidationError(info.message().to_string()),
			_ => InternalError::DatabaseError(err).into(),
		}
	}
}

impl From<deadpool_diesel::PoolError> for Error {
	fn from(value: deadpool_diesel::PoolError) -> Self {
		InternalError::PoolError(value).into()
	}
}

impl From<redis::RedisError> for Error {
	fn from(err: redis::RedisError) -> Self {
		InternalError::RedisError(err).into()
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self { InternalError::IoError(err).into() }
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		InternalError::SerdeJsonError(err).into()
	}
}
