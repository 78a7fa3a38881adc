use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::requests::{CreateUserRequest, DeactivateUserRequest, UpdateUserRequest};
use crate::api::dtos::responses::UserListResponse;
use crate::domain::models::user::{Role, User, UserDeactivation};
use crate::domain::services::statistics::UserStats;
use std::sync::Arc;
use crate::error::AppError;
use tracing::{info, warn};

fn normalize_name(raw: &str) -> Result<String, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Name is required".into()));
    }
    Ok(name.to_string())
}

fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AppError::Validation(format!("Invalid email address: {}", raw))),
    }
}

async fn ensure_email_free(state: &AppState, email: &str, owner_id: Option<&str>) -> Result<(), AppError> {
    match state.user_repo.find_by_email(email).await? {
        Some(existing) if Some(existing.id.as_str()) != owner_id => {
            Err(AppError::Conflict("Email already registered".into()))
        }
        _ => Ok(()),
    }
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let users = state.user_repo.list().await?;
    let stats = UserStats::from_users(&users);
    Ok(Json(UserListResponse { users, stats }))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = normalize_name(&payload.name)?;
    let email = normalize_email(&payload.email)?;
    ensure_email_free(&state, &email, None).await?;

    let user = User::new(name, email, payload.role.unwrap_or(Role::User));
    let created = state.user_repo.create(&user).await?;

    info!("Created user {}", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(user_id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut user = state.user_repo.find_by_id(&user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    if let Some(name) = payload.name {
        user.name = normalize_name(&name)?;
    }
    if let Some(email) = payload.email {
        let email = normalize_email(&email)?;
        ensure_email_free(&state, &email, Some(&user.id)).await?;
        user.email = email;
    }
    if let Some(role) = payload.role {
        user.role = role;
    }

    let updated = state.user_repo.update(&user).await?;
    info!("Updated user {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_user(
    _admin: AdminUser,
    Path(user_id): Path<String>,
) -> Result<StatusCode, AppError> {
    warn!("Deletion requested for user {}, which is not supported", user_id);
    Err(AppError::NotImplemented("User deletion is not implemented; deactivate the user instead".into()))
}

pub async fn deactivate_user(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<String>,
    Json(payload): Json<DeactivateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let reason = payload.reason.trim();
    if reason.is_empty() {
        return Err(AppError::Validation("Deactivation reason is required".into()));
    }
    if let Some(days) = payload.duration_days && days <= 0 {
        return Err(AppError::Validation("Deactivation duration must be at least one day".into()));
    }
    if admin.id == user_id {
        return Err(AppError::Conflict("Cannot deactivate yourself".into()));
    }

    let target = state.user_repo.find_by_id(&user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;
    if !target.is_active {
        return Err(AppError::Conflict("User is already inactive".into()));
    }

    let record = UserDeactivation::new(target.id, reason.to_string(), admin.id, payload.duration_days)?;
    let created = state.deactivation_repo.deactivate(&record).await?;

    info!("Deactivated user {} until {:?}", created.user_id, created.reactivate_at);
    Ok(Json(created))
}

pub async fn activate_user(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_repo.set_active(&user_id, true).await?;
    info!("Activated user {}", user.id);
    Ok(Json(user))
}

pub async fn list_deactivations(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let history = state.deactivation_repo.list_by_user(&user_id).await?;
    Ok(Json(history))
}
