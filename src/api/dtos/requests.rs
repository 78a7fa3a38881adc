use crate::domain::models::booking::ResourceType;
use crate::domain::models::user::Role;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub item_id: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub purpose: String,
    pub notes: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct ApproveBookingRequest {
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct RejectBookingRequest {
    #[serde(default)]
    pub reason: String,
}

#[derive(Deserialize)]
pub struct BookingListQuery {
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub role: Option<Role>,
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

#[derive(Deserialize)]
pub struct DeactivateUserRequest {
    #[serde(default)]
    pub reason: String,
    pub duration_days: Option<i32>,
}
