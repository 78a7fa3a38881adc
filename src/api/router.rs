use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, booking, booking_management, health, resource, user};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Session
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/me", get(auth::me))

        // Catalogue
        .route("/api/v1/rooms", get(resource::list_rooms))
        .route("/api/v1/rooms/buildings", get(resource::list_buildings))
        .route("/api/v1/rooms/{room_id}", get(resource::get_room))
        .route("/api/v1/equipment", get(resource::list_equipment))
        .route("/api/v1/equipment/categories", get(resource::list_categories))
        .route("/api/v1/equipment/{equipment_id}", get(resource::get_equipment))

        // Borrower
        .route("/api/v1/bookings", post(booking::create_booking).get(booking::list_my_bookings))
        .route("/api/v1/bookings/{booking_id}", get(booking::get_booking))
        .route("/api/v1/bookings/{booking_id}/receipt", get(booking::get_receipt))
        .route("/api/v1/dashboard", get(booking::my_dashboard))

        // Admin Review
        .route("/api/v1/admin/dashboard", get(booking_management::admin_dashboard))
        .route("/api/v1/admin/bookings", get(booking_management::list_all_bookings))
        .route("/api/v1/admin/bookings/{booking_id}/approve", post(booking_management::approve_booking))
        .route("/api/v1/admin/bookings/{booking_id}/reject", post(booking_management::reject_booking))

        // Admin Users
        .route("/api/v1/admin/users", get(user::list_users).post(user::create_user))
        .route("/api/v1/admin/users/{user_id}", put(user::update_user).delete(user::delete_user))
        .route("/api/v1/admin/users/{user_id}/deactivate", post(user::deactivate_user))
        .route("/api/v1/admin/users/{user_id}/activate", post(user::activate_user))
        .route("/api/v1/admin/users/{user_id}/deactivations", get(user::list_deactivations))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
