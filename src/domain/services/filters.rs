use std::collections::BTreeSet;
use serde::Deserialize;
use crate::domain::models::{
    booking::{Booking, BookingStatus},
    resource::{Equipment, ResourceStatus, Room},
};

/// Optional predicates combined with AND. An absent field, an empty string or
/// `"all"` matches everything.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct RoomFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub building: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EquipmentFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
}

fn selected(value: &Option<String>) -> Option<&str> {
    value.as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

fn name_matches(name: &str, search: &Option<String>) -> bool {
    match selected(search) {
        Some(term) => name.to_lowercase().contains(&term.to_lowercase()),
        None => true,
    }
}

fn status_matches(status: ResourceStatus, wanted: &Option<String>) -> bool {
    match selected(wanted) {
        Some(raw) => status.as_str() == raw,
        None => true,
    }
}

impl RoomFilter {
    pub fn matches(&self, room: &Room) -> bool {
        name_matches(&room.name, &self.search)
            && status_matches(room.status, &self.status)
            && selected(&self.building).is_none_or(|b| room.building == b)
    }

    pub fn apply(&self, rooms: Vec<Room>) -> Vec<Room> {
        rooms.into_iter().filter(|r| self.matches(r)).collect()
    }
}

impl EquipmentFilter {
    pub fn matches(&self, equipment: &Equipment) -> bool {
        name_matches(&equipment.name, &self.search)
            && status_matches(equipment.status, &self.status)
            && selected(&self.category).is_none_or(|c| equipment.category == c)
    }

    pub fn apply(&self, equipment: Vec<Equipment>) -> Vec<Equipment> {
        equipment.into_iter().filter(|e| self.matches(e)).collect()
    }
}

pub fn distinct_buildings(rooms: &[Room]) -> Vec<String> {
    rooms.iter().map(|r| r.building.clone()).collect::<BTreeSet<_>>().into_iter().collect()
}

pub fn distinct_categories(equipment: &[Equipment]) -> Vec<String> {
    equipment.iter().map(|e| e.category.clone()).collect::<BTreeSet<_>>().into_iter().collect()
}

pub fn with_status(bookings: Vec<Booking>, status: Option<BookingStatus>) -> Vec<Booking> {
    match status {
        Some(status) => bookings.into_iter().filter(|b| b.status == status).collect(),
        None => bookings,
    }
}
