use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Duration, Utc};
use sqlx::FromRow;
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            role,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// One entry of a user's deactivation history. Records are only ever appended.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct UserDeactivation {
    pub id: String,
    pub user_id: String,
    pub reason: String,
    pub deactivated_by: String,
    pub deactivated_at: DateTime<Utc>,
    pub duration_days: Option<i32>,
    pub reactivate_at: Option<DateTime<Utc>>,
}

impl UserDeactivation {
    /// Fails when `duration_days` pushes the reactivation date out of range.
    pub fn new(user_id: String, reason: String, deactivated_by: String, duration_days: Option<i32>) -> Result<Self, AppError> {
        let now = Utc::now();
        let reactivate_at = match duration_days {
            Some(days) => Some(
                Duration::try_days(days as i64)
                    .and_then(|d| now.checked_add_signed(d))
                    .ok_or_else(|| AppError::Validation(format!("Deactivation duration of {} days is out of range", days)))?,
            ),
            None => None,
        };

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            reason,
            deactivated_by,
            deactivated_at: now,
            duration_days,
            reactivate_at,
        })
    }
}
