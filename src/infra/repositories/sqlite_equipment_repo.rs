use crate::domain::{models::resource::Equipment, ports::EquipmentRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteEquipmentRepo {
    pool: SqlitePool,
}

impl SqliteEquipmentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EquipmentRepository for SqliteEquipmentRepo {
    async fn create(&self, equipment: &Equipment) -> Result<Equipment, AppError> {
        sqlx::query_as::<_, Equipment>(
            "INSERT INTO equipment (id, name, category, description, quantity, status) VALUES (?, ?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&equipment.id).bind(&equipment.name).bind(&equipment.category)
            .bind(&equipment.description).bind(equipment.quantity).bind(equipment.status)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Equipment>, AppError> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self) -> Result<Vec<Equipment>, AppError> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment ORDER BY id ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn count(&self) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM equipment").fetch_one(&self.pool).await.map_err(AppError::Database)
    }
}
