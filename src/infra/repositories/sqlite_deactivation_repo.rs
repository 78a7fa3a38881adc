use crate::domain::{models::user::UserDeactivation, ports::DeactivationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

pub struct SqliteDeactivationRepo {
    pool: SqlitePool,
}

impl SqliteDeactivationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeactivationRepository for SqliteDeactivationRepo {
    async fn deactivate(&self, record: &UserDeactivation) -> Result<UserDeactivation, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let result = sqlx::query("UPDATE users SET is_active = 0 WHERE id = ?")
            .bind(&record.user_id)
            .execute(&mut *tx).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".into()));
        }

        let created = sqlx::query_as::<_, UserDeactivation>(
            "INSERT INTO user_deactivations (id, user_id, reason, deactivated_by, deactivated_at, duration_days, reactivate_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&record.id).bind(&record.user_id).bind(&record.reason).bind(&record.deactivated_by)
            .bind(record.deactivated_at).bind(record.duration_days).bind(record.reactivate_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<UserDeactivation>, AppError> {
        sqlx::query_as::<_, UserDeactivation>("SELECT * FROM user_deactivations WHERE user_id = ? ORDER BY deactivated_at DESC")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn reactivate_due(&self, now: DateTime<Utc>) -> Result<Vec<String>, AppError> {
        sqlx::query_scalar::<_, String>(
            "UPDATE users SET is_active = 1
             WHERE is_active = 0 AND id IN (
                 SELECT d.user_id FROM user_deactivations d
                 WHERE d.reactivate_at IS NOT NULL AND d.reactivate_at <= ?
                   AND d.deactivated_at = (SELECT MAX(deactivated_at) FROM user_deactivations WHERE user_id = d.user_id)
             )
             RETURNING id"
        )
            .bind(now)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
