use crate::domain::models::{
    booking::{Booking, BookingStatus, ResourceType},
    resource::{Equipment, Room},
    session::AuthSession,
    user::{User, UserDeactivation},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn update(&self, user: &User) -> Result<User, AppError>;
    async fn set_active(&self, id: &str, is_active: bool) -> Result<User, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
}

#[async_trait]
pub trait DeactivationRepository: Send + Sync {
    /// Appends the record and clears the user's active flag in one transaction.
    async fn deactivate(&self, record: &UserDeactivation) -> Result<UserDeactivation, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<UserDeactivation>, AppError>;
    /// Reactivates inactive users whose latest deactivation deadline has passed.
    async fn reactivate_due(&self, now: DateTime<Utc>) -> Result<Vec<String>, AppError>;
}

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, room: &Room) -> Result<Room, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Room>, AppError>;
    async fn list(&self) -> Result<Vec<Room>, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
}

#[async_trait]
pub trait EquipmentRepository: Send + Sync {
    async fn create(&self, equipment: &Equipment) -> Result<Equipment, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Equipment>, AppError>;
    async fn list(&self) -> Result<Vec<Equipment>, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn list(&self) -> Result<Vec<Booking>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError>;
    async fn list_by_status(&self, status: BookingStatus) -> Result<Vec<Booking>, AppError>;
    /// Approved or active bookings of one item that intersect `[start, end)`.
    async fn list_committed_overlaps(
        &self,
        resource_type: ResourceType,
        item_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Booking>, AppError>;
    /// Writes the status and review fields of `booking` only if the stored
    /// status still equals `expected`. Returns `None` when it does not.
    async fn update_if_status(&self, booking: &Booking, expected: BookingStatus) -> Result<Option<Booking>, AppError>;
    /// Stores an approval of a pending booking in one statement, provided no
    /// other approved or active booking of the same item overlaps it.
    /// Returns `None` when the booking is no longer pending or the slot is taken.
    async fn approve_if_free(&self, booking: &Booking) -> Result<Option<Booking>, AppError>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &AuthSession) -> Result<(), AppError>;
    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<AuthSession>, AppError>;
    async fn delete(&self, token_hash: &str) -> Result<(), AppError>;
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError>;
}
