use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
pub enum ResourceStatus {
    #[serde(rename = "available")]
    #[sqlx(rename = "available")]
    Available,
    #[serde(rename = "booked")]
    #[sqlx(rename = "booked")]
    Booked,
    #[serde(rename = "in-use")]
    #[sqlx(rename = "in-use")]
    InUse,
}

impl ResourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceStatus::Available => "available",
            ResourceStatus::Booked => "booked",
            ResourceStatus::InUse => "in-use",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub building: String,
    pub floor: i32,
    pub capacity: i32,
    pub facilities: Json<Vec<String>>,
    pub status: ResourceStatus,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub quantity: i32,
    pub status: ResourceStatus,
}

/// A bookable item of either kind, tagged with its booking `type`.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Resource {
    Room(Room),
    Equipment(Equipment),
}

impl Resource {
    pub fn name(&self) -> &str {
        match self {
            Resource::Room(room) => &room.name,
            Resource::Equipment(equipment) => &equipment.name,
        }
    }
}
