use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::responses::FilteredListResponse;
use crate::domain::services::filters::{distinct_buildings, distinct_categories, EquipmentFilter, RoomFilter};
use crate::error::AppError;
use std::sync::Arc;

pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(filter): Query<RoomFilter>,
) -> Result<impl IntoResponse, AppError> {
    let rooms = state.room_repo.list().await?;
    let total = rooms.len();
    Ok(Json(FilteredListResponse { items: filter.apply(rooms), total }))
}

pub async fn list_buildings(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let rooms = state.room_repo.list().await?;
    Ok(Json(distinct_buildings(&rooms)))
}

pub async fn get_room(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(room_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let room = state.room_repo.find_by_id(&room_id).await?
        .ok_or(AppError::NotFound("Room not found".into()))?;
    Ok(Json(room))
}

pub async fn list_equipment(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(filter): Query<EquipmentFilter>,
) -> Result<impl IntoResponse, AppError> {
    let equipment = state.equipment_repo.list().await?;
    let total = equipment.len();
    Ok(Json(FilteredListResponse { items: filter.apply(equipment), total }))
}

pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let equipment = state.equipment_repo.list().await?;
    Ok(Json(distinct_categories(&equipment)))
}

pub async fn get_equipment(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(equipment_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let equipment = state.equipment_repo.find_by_id(&equipment_id).await?
        .ok_or(AppError::NotFound("Equipment not found".into()))?;
    Ok(Json(equipment))
}
