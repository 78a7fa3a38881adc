use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::LoginRequest;
use crate::api::dtos::responses::LoginResponse;
use crate::api::extractors::auth::{AuthUser, SESSION_COOKIE};
use std::sync::Arc;
use tower_cookies::{Cookies, Cookie};
use tower_cookies::cookie::SameSite;
use time::Duration;
use tracing::info;

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let issued = state.auth_service.login(&payload.email).await?;

    let mut session_c = Cookie::new(SESSION_COOKIE, issued.token);
    session_c.set_http_only(true);
    session_c.set_secure(true);
    session_c.set_same_site(SameSite::Strict);
    session_c.set_path("/");
    session_c.set_max_age(Duration::hours(state.config.session_ttl_hours));
    cookies.add(session_c);

    Ok(Json(LoginResponse {
        csrf_token: issued.csrf_token,
        user: issued.user,
    }))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    cookies: Cookies,
) -> Result<impl IntoResponse, AppError> {
    if let Some(cookie) = cookies.get(SESSION_COOKIE) {
        state.auth_service.logout(cookie.value()).await?;
    }

    cookies.remove(Cookie::build((SESSION_COOKIE, "")).path("/").into());

    info!("User {} logged out", user.id);

    Ok(StatusCode::OK)
}

pub async fn me(AuthUser(user): AuthUser) -> impl IntoResponse {
    Json(user)
}
