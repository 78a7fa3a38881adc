use crate::domain::{
    models::booking::{Booking, BookingStatus, ResourceType},
    ports::BookingRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::{DateTime, Utc};

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, user_id, user_name, type, item_id, item_name, start_date, end_date, purpose, notes, status, approved_by, approved_at, rejection_reason, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.user_id).bind(&booking.user_name).bind(booking.resource_type)
            .bind(&booking.item_id).bind(&booking.item_name).bind(booking.start_date).bind(booking.end_date)
            .bind(&booking.purpose).bind(&booking.notes).bind(booking.status).bind(&booking.approved_by)
            .bind(booking.approved_at).bind(&booking.rejection_reason).bind(booking.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE user_id = ? ORDER BY created_at DESC").bind(user_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_status(&self, status: BookingStatus) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE status = ? ORDER BY start_date ASC").bind(status).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_committed_overlaps(&self, resource_type: ResourceType, item_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE type = ? AND item_id = ? AND start_date < ? AND end_date > ? AND status IN ('approved', 'active')"
        )
            .bind(resource_type).bind(item_id).bind(end).bind(start)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update_if_status(&self, booking: &Booking, expected: BookingStatus) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = ?, notes = ?, approved_by = ?, approved_at = ?, rejection_reason = ?
             WHERE id = ? AND status = ?
             RETURNING *"
        )
            .bind(booking.status).bind(&booking.notes).bind(&booking.approved_by)
            .bind(booking.approved_at).bind(&booking.rejection_reason)
            .bind(&booking.id).bind(expected)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn approve_if_free(&self, booking: &Booking) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = 'approved', notes = ?, approved_by = ?, approved_at = ?
             WHERE id = ? AND status = 'pending'
               AND NOT EXISTS (
                   SELECT 1 FROM bookings o
                   WHERE o.type = ? AND o.item_id = ? AND o.id <> ?
                     AND o.status IN ('approved', 'active')
                     AND o.start_date < ? AND o.end_date > ?
               )
             RETURNING *"
        )
            .bind(&booking.notes).bind(&booking.approved_by).bind(booking.approved_at)
            .bind(&booking.id)
            .bind(booking.resource_type).bind(&booking.item_id).bind(&booking.id)
            .bind(booking.end_date).bind(booking.start_date)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
}
