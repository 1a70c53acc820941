//! Middleware restricting routes to admin users
//!
//! Must be layered on top of [`AuthLayer`](super::AuthLayer) so the
//! session id extension is present

use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::extract::Request;
use axum::http::Response;
use axum::response::IntoResponse;
use common::Error;
use tower::{Layer, Service};

use crate::AppState;
use crate::session::Session;

#[derive(Clone)]
pub struct AdminLayer {
	state: AppState,
}

impl AdminLayer {
	#[must_use]
	pub fn new(state: AppState) -> Self { Self { state } }
}

impl<S> Layer<S> for AdminLayer {
	type Service = AdminMiddleware<S>;

	fn layer(&self, inner: S) -> Self::Service {
		AdminMiddleware { inner, state: self.state.clone() }
	}
}

#[derive(Clone)]
pub struct AdminMiddleware<S> {
	inner: S,
	state: AppState,
}

impl<S> Service<Request<Body>> for AdminMiddleware<S>
where
	S: Service<Request, Response = Response<Body>> + Clone + Send + 'static,
	S::Future: Send + 'static,
{
	type Error = S::Error;
	type Future = Pin<
		Box<
			dyn Future<Output = Result<Self::Response, Self::Error>>
				+ Send
				+ 'static,
		>,
	>;
	type Response = S::Response;

	fn poll_ready(
		&mut self,
		cx: &mut Context<'_>,
	) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	#[instrument(skip_all)]
	fn call(&mut self, req: Request<Body>) -> Self::Future {
		let cloned_inner = self.inner.clone();
		let mut inner = std::mem::replace(&mut self.inner, cloned_inner);

		let state = self.state.clone();

		Box::pin(async move {
			let Some(&session_id) = req.extensions().get::<i32>() else {
				debug!("session id not found in request extensions");

				return Ok(Error::Forbidden.into_response());
			};

			let mut r_conn = state.redis_connection;

			let session = match Session::get(session_id, &mut r_conn).await {
				Ok(s) => s,
				Err(e) => return Ok(e.into_response()),
			};

			let Some(session) = session else {
				return Ok(Error::Forbidden.into_response());
			};

			if !session.data.profile_is_admin {
				debug!(
					"profile {} is not an admin",
					session.data.profile_id
				);

				return Ok(Error::Forbidden.into_response());
			}

			inner.call(req).await
		})
	}
}
