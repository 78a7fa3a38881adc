use chrono::{TimeZone, Utc};
use sqlx::types::Json;
use tracing::info;
use crate::domain::models::{
    resource::{Equipment, ResourceStatus, Room},
    user::{Role, User},
};
use crate::error::AppError;
use crate::state::AppState;

pub fn default_users() -> Vec<User> {
    let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_else(Utc::now);
    let user = |id: &str, name: &str, email: &str, role: Role| User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        is_active: true,
        created_at,
    };

    vec![
        user("admin-1", "Administrator", "admin@sipinjam.id", Role::Admin),
        user("u1", "Budi Santoso", "budi@sipinjam.id", Role::User),
        user("u2", "Siti Rahayu", "siti@sipinjam.id", Role::User),
        user("u3", "Andi Wijaya", "andi@sipinjam.id", Role::User),
    ]
}

pub fn default_rooms() -> Vec<Room> {
    let room = |id: &str, name: &str, building: &str, floor: i32, capacity: i32, facilities: &[&str], status: ResourceStatus| Room {
        id: id.to_string(),
        name: name.to_string(),
        building: building.to_string(),
        floor,
        capacity,
        facilities: Json(facilities.iter().map(|f| f.to_string()).collect()),
        status,
    };

    vec![
        room("room-1", "Ruang Rapat Utama", "Gedung A", 2, 20, &["Proyektor", "AC", "Whiteboard"], ResourceStatus::Available),
        room("room-2", "Laboratorium Komputer", "Gedung A", 3, 40, &["Komputer", "AC", "Proyektor"], ResourceStatus::Booked),
        room("room-3", "Aula Serbaguna", "Gedung B", 1, 150, &["Sound System", "Panggung", "AC"], ResourceStatus::Available),
        room("room-4", "Ruang Kelas 101", "Gedung B", 1, 35, &["Whiteboard", "Proyektor"], ResourceStatus::InUse),
        room("room-5", "Ruang Diskusi Kecil", "Gedung A", 1, 8, &["TV", "Whiteboard"], ResourceStatus::Available),
    ]
}

pub fn default_equipment() -> Vec<Equipment> {
    let item = |id: &str, name: &str, category: &str, description: &str, quantity: i32, status: ResourceStatus| Equipment {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        quantity,
        status,
    };

    vec![
        item("equipment-1", "Proyektor Epson", "Elektronik", "Proyektor 3LCD 3600 lumen", 5, ResourceStatus::Available),
        item("equipment-2", "Kamera DSLR Canon", "Multimedia", "Kamera DSLR dengan lensa kit 18-55mm", 2, ResourceStatus::Available),
        item("equipment-3", "Sound System Portable", "Audio", "Speaker aktif dengan 2 mikrofon nirkabel", 3, ResourceStatus::Booked),
        item("equipment-4", "Laptop Lenovo ThinkPad", "Elektronik", "Laptop untuk presentasi", 10, ResourceStatus::Available),
    ]
}

/// Fills each collection with the defaults when it is empty. Collections that
/// already hold data are left alone.
pub async fn seed_if_empty(state: &AppState) -> Result<(), AppError> {
    if state.user_repo.count().await? == 0 {
        for user in default_users() {
            state.user_repo.create(&user).await?;
        }
        info!("Seeded default users");
    }
    if state.room_repo.count().await? == 0 {
        for room in default_rooms() {
            state.room_repo.create(&room).await?;
        }
        info!("Seeded default rooms");
    }
    if state.equipment_repo.count().await? == 0 {
        for equipment in default_equipment() {
            state.equipment_repo.create(&equipment).await?;
        }
        info!("Seeded default equipment");
    }
    Ok(())
}
