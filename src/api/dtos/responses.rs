use serde::Serialize;
use crate::domain::models::{booking::Booking, resource::Resource, user::User};
use crate::domain::services::statistics::{BookingStats, ResourceStats, UserStats};

#[derive(Serialize)]
pub struct LoginResponse {
    pub csrf_token: String,
    pub user: User,
}

#[derive(Serialize)]
pub struct BookingListResponse {
    pub bookings: Vec<Booking>,
    pub stats: BookingStats,
}

/// `total` counts the whole collection before filtering.
#[derive(Serialize)]
pub struct FilteredListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

#[derive(Serialize)]
pub struct UserListResponse {
    pub users: Vec<User>,
    pub stats: UserStats,
}

#[derive(Serialize)]
pub struct AdminDashboardResponse {
    pub users: UserStats,
    pub bookings: BookingStats,
    pub rooms: ResourceStats,
    pub equipment: ResourceStats,
}

#[derive(Serialize)]
pub struct ReceiptResponse {
    pub booking: Booking,
    pub resource: Resource,
}
