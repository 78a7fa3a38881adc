use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::CreateBookingRequest;
use crate::api::dtos::responses::{BookingListResponse, ReceiptResponse};
use crate::domain::models::{booking::{Booking, BookingStatus}, user::User};
use crate::domain::services::booking_service::{parse_timestamp, BookingDraft};
use crate::domain::services::statistics::BookingStats;
use crate::error::AppError;
use std::sync::Arc;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let draft = BookingDraft {
        resource_type: payload.resource_type,
        item_id: payload.item_id,
        start: parse_timestamp("start_date", &payload.start_date)?,
        end: parse_timestamp("end_date", &payload.end_date)?,
        purpose: payload.purpose,
        notes: payload.notes,
    };

    let created = state.booking_service.create_booking(&user, draft).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_my_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list_by_user(&user.id).await?;
    let stats = BookingStats::from_bookings(&bookings);
    Ok(Json(BookingListResponse { bookings, stats }))
}

pub async fn my_dashboard(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list_by_user(&user.id).await?;
    Ok(Json(BookingStats::from_bookings(&bookings)))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = find_visible(&state, &user, &booking_id).await?;
    Ok(Json(booking))
}

/// The booking and its resource, as handed to the PDF exporter. Only approved
/// bookings get a receipt.
pub async fn get_receipt(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = find_visible(&state, &user, &booking_id).await?;
    if booking.status != BookingStatus::Approved {
        return Err(AppError::Validation(format!("Receipts are only issued for approved bookings, this one is {}", booking.status)));
    }

    let resource = state.booking_service.resolve_resource(booking.resource_type, &booking.item_id).await?;
    Ok(Json(ReceiptResponse { booking, resource }))
}

async fn find_visible(state: &AppState, user: &User, booking_id: &str) -> Result<Booking, AppError> {
    let booking = state.booking_repo.find_by_id(booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.user_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden("Booking belongs to another user".into()));
    }
    Ok(booking)
}
