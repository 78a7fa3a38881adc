use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::requests::{ApproveBookingRequest, BookingListQuery, RejectBookingRequest};
use crate::api::dtos::responses::{AdminDashboardResponse, BookingListResponse};
use crate::domain::models::booking::BookingStatus;
use crate::domain::services::filters::with_status;
use crate::domain::services::statistics::{BookingStats, ResourceStats, UserStats};
use crate::error::AppError;
use std::sync::Arc;

pub async fn list_all_bookings(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(query): Query<BookingListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let status = match query.status.as_deref() {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(raw.parse::<BookingStatus>()?),
    };

    let bookings = state.booking_repo.list().await?;
    let stats = BookingStats::from_bookings(&bookings);
    Ok(Json(BookingListResponse { bookings: with_status(bookings, status), stats }))
}

pub async fn approve_booking(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(booking_id): Path<String>,
    payload: Option<Json<ApproveBookingRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let approved = state.booking_service.approve(&booking_id, &admin, payload.notes.as_deref()).await?;
    Ok(Json(approved))
}

pub async fn reject_booking(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(booking_id): Path<String>,
    Json(payload): Json<RejectBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let rejected = state.booking_service.reject(&booking_id, &payload.reason).await?;
    Ok(Json(rejected))
}

pub async fn admin_dashboard(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let users = state.user_repo.list().await?;
    let bookings = state.booking_repo.list().await?;
    let rooms = state.room_repo.list().await?;
    let equipment = state.equipment_repo.list().await?;

    Ok(Json(AdminDashboardResponse {
        users: UserStats::from_users(&users),
        bookings: BookingStats::from_bookings(&bookings),
        rooms: ResourceStats::from_statuses(rooms.iter().map(|r| r.status)),
        equipment: ResourceStats::from_statuses(equipment.iter().map(|e| e.status)),
    }))
}
