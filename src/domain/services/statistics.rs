use serde::Serialize;
use crate::domain::models::{
    booking::{Booking, BookingStatus},
    resource::ResourceStatus,
    user::User,
};

#[derive(Debug, Serialize, Default, Clone, PartialEq, Eq)]
pub struct BookingStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub active: usize,
    pub completed: usize,
    /// Approved plus active.
    pub ongoing: usize,
}

impl BookingStats {
    pub fn from_bookings<'a>(bookings: impl IntoIterator<Item = &'a Booking>) -> Self {
        let mut stats = Self::default();
        for booking in bookings {
            stats.total += 1;
            match booking.status {
                BookingStatus::Pending => stats.pending += 1,
                BookingStatus::Approved => stats.approved += 1,
                BookingStatus::Rejected => stats.rejected += 1,
                BookingStatus::Active => stats.active += 1,
                BookingStatus::Completed => stats.completed += 1,
            }
        }
        stats.ongoing = stats.approved + stats.active;
        stats
    }
}

#[derive(Debug, Serialize, Default, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

impl UserStats {
    pub fn from_users(users: &[User]) -> Self {
        let active = users.iter().filter(|u| u.is_active).count();
        Self { total: users.len(), active, inactive: users.len() - active }
    }
}

#[derive(Debug, Serialize, Default, Clone, PartialEq, Eq)]
pub struct ResourceStats {
    pub total: usize,
    pub available: usize,
    pub booked: usize,
    pub in_use: usize,
}

impl ResourceStats {
    pub fn from_statuses(statuses: impl IntoIterator<Item = ResourceStatus>) -> Self {
        statuses.into_iter().fold(Self::default(), |mut stats, status| {
            stats.total += 1;
            match status {
                ResourceStatus::Available => stats.available += 1,
                ResourceStatus::Booked => stats.booked += 1,
                ResourceStatus::InUse => stats.in_use += 1,
            }
            stats
        })
    }
}
