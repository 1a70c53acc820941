use std::time::Duration;

use axum::Router;
use axum::routing::{delete, get, patch, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::auth::{login, logout, register};
use crate::controllers::bookmark::{get_bookmarked_spots, toggle_bookmark};
use crate::controllers::healthcheck;
use crate::controllers::payment::{
	archive_payment,
	complete_payment,
	create_payment,
	get_all_payments,
	get_my_payments,
	get_payment_for_reservation,
};
use crate::controllers::profile::{
	activate_profile,
	disable_profile,
	get_all_profiles,
	get_current_profile,
	update_current_profile,
};
use crate::controllers::reservation::{
	admin_create_reservation,
	cancel_reservation,
	confirm_reservation,
	create_reservation,
	get_all_reservations,
	get_my_reservations,
	get_reservation,
	get_reservations_for_my_schedules,
	get_reservations_for_schedule,
	remove_reservation,
	update_reservation,
};
use crate::controllers::review::{
	admin_remove_review,
	create_review,
	get_all_reviews,
	get_review_for_reservation,
	get_reviews_for_schedule,
	remove_review,
	update_review,
};
use crate::controllers::schedule::{
	create_schedule,
	delete_schedule,
	get_all_schedules,
	get_my_schedules,
	get_schedule,
	get_schedules_for_spot,
	search_schedules,
	update_schedule,
};
use crate::controllers::spot::{
	create_spot,
	delete_spot,
	get_all_spots,
	get_my_spots,
	get_spot,
	get_spots,
	update_spot,
	upload_spot_image,
};
use crate::controllers::vehicle::{
	create_vehicle,
	delete_vehicle,
	get_my_vehicles,
	get_vehicle,
	update_vehicle,
};
use crate::controllers::withdrawal::{
	archive_withdrawal,
	complete_withdrawal,
	create_withdrawal,
	get_all_withdrawals,
	get_balance,
	get_my_withdrawals,
	get_withdrawal,
	process_withdrawal,
};
use crate::middleware::{AdminLayer, AuthLayer};

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let api_routes = Router::new()
		.route("/healthcheck", get(healthcheck))
		.nest("/auth", auth_routes(&state))
		.nest("/profile", profile_routes(&state))
		.nest("/spots", spot_routes(&state))
		.nest("/bookmarks", bookmark_routes(&state))
		.nest("/vehicles", vehicle_routes(&state))
		.nest("/schedules", schedule_routes(&state))
		.nest("/reservations", reservation_routes(&state))
		.nest("/reviews", review_routes(&state))
		.nest("/payments", payment_routes(&state))
		.nest("/withdrawals", withdrawal_routes(&state))
		.nest("/admin", admin_routes(&state));

	Router::new()
		.merge(api_routes)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::new(Duration::from_secs(10)))
				.layer(CompressionLayer::new())
				.layer(CorsLayer::permissive()),
		)
		.with_state(state)
}

/// Authentication routes
fn auth_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/register", post(register))
		.route("/login", post(login))
		.route(
			"/logout",
			post(logout).route_layer(AuthLayer::new(state.clone())),
		)
}

/// Profile routes
fn profile_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/me", get(get_current_profile).patch(update_current_profile))
		.route_layer(AuthLayer::new(state.clone()))
}

/// Spot routes; browsing is public, publishing needs a session
fn spot_routes(state: &AppState) -> Router<AppState> {
	let authenticated = Router::new()
		.route("/", post(create_spot))
		.route("/mine", get(get_my_spots))
		.route("/{id}", patch(update_spot).delete(delete_spot))
		.route("/{id}/image", post(upload_spot_image))
		.route("/{id}/bookmark", post(toggle_bookmark))
		.route_layer(AuthLayer::new(state.clone()));

	Router::new()
		.route("/", get(get_spots))
		.route("/{id}", get(get_spot))
		.route("/{id}/schedules", get(get_schedules_for_spot))
		.merge(authenticated)
}

/// Bookmark routes
fn bookmark_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/", get(get_bookmarked_spots))
		.route_layer(AuthLayer::new(state.clone()))
}

/// Vehicle routes
fn vehicle_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/", get(get_my_vehicles).post(create_vehicle))
		.route(
			"/{id}",
			get(get_vehicle).patch(update_vehicle).delete(delete_vehicle),
		)
		.route_layer(AuthLayer::new(state.clone()))
}

/// Schedule routes; searching is public, publishing needs a session
fn schedule_routes(state: &AppState) -> Router<AppState> {
	let authenticated = Router::new()
		.route("/", post(create_schedule))
		.route("/mine", get(get_my_schedules))
		.route("/{id}", patch(update_schedule).delete(delete_schedule))
		.route(
			"/{id}/reservations",
			get(get_reservations_for_schedule).post(create_reservation),
		)
		.route_layer(AuthLayer::new(state.clone()));

	Router::new()
		.route("/", get(search_schedules))
		.route("/{id}", get(get_schedule))
		.route("/{id}/reviews", get(get_reviews_for_schedule))
		.merge(authenticated)
}

/// Reservation routes
fn reservation_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/mine", get(get_my_reservations))
		.route("/dashboard", get(get_reservations_for_my_schedules))
		.route("/{id}", get(get_reservation).patch(update_reservation))
		.route("/{id}/cancel", post(cancel_reservation))
		.route(
			"/{id}/payment",
			get(get_payment_for_reservation).post(create_payment),
		)
		.route(
			"/{id}/review",
			get(get_review_for_reservation).post(create_review),
		)
		.route_layer(AuthLayer::new(state.clone()))
}

/// Review routes; a review is edited or withdrawn by its own id
fn review_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/{id}", patch(update_review).delete(remove_review))
		.route_layer(AuthLayer::new(state.clone()))
}

/// Payment routes
fn payment_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/", get(get_my_payments))
		.route_layer(AuthLayer::new(state.clone()))
}

/// Withdrawal routes
fn withdrawal_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/", get(get_my_withdrawals).post(create_withdrawal))
		.route("/balance", get(get_balance))
		.route("/{id}", get(get_withdrawal))
		.route_layer(AuthLayer::new(state.clone()))
}

/// Back-office routes covering every entity
fn admin_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/profiles", get(get_all_profiles))
		.route("/profiles/{id}/disable", post(disable_profile))
		.route("/profiles/{id}/activate", post(activate_profile))
		.route("/spots", get(get_all_spots))
		.route("/schedules", get(get_all_schedules))
		.route(
			"/reservations",
			get(get_all_reservations).post(admin_create_reservation),
		)
		.route("/reservations/{id}", delete(remove_reservation))
		.route("/reservations/{id}/confirm", post(confirm_reservation))
		.route("/payments", get(get_all_payments))
		.route("/payments/{id}", delete(archive_payment))
		.route("/payments/{id}/complete", post(complete_payment))
		.route("/reviews", get(get_all_reviews))
		.route("/reviews/{id}", delete(admin_remove_review))
		.route("/withdrawals", get(get_all_withdrawals))
		.route("/withdrawals/{id}", delete(archive_withdrawal))
		.route("/withdrawals/{id}/process", post(process_withdrawal))
		.route("/withdrawals/{id}/complete", post(complete_withdrawal))
		.route_layer(AdminLayer::new(state.clone()))
		.route_layer(AuthLayer::new(state.clone()))
}
