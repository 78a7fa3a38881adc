//! Pure booking state transitions. Each function takes the current record and
//! returns the revised one without touching storage.

use chrono::{DateTime, Utc};
use crate::domain::models::booking::{Booking, BookingStatus};
use crate::error::AppError;

fn ensure_transition(booking: &Booking, next: BookingStatus) -> Result<(), AppError> {
    if booking.status.can_transition_to(next) {
        Ok(())
    } else {
        Err(AppError::Conflict(format!(
            "Booking {} is {} and cannot become {}",
            booking.id, booking.status, next
        )))
    }
}

/// Blank notes keep whatever the requester wrote.
pub fn approve(
    booking: &Booking,
    approver_id: &str,
    at: DateTime<Utc>,
    notes: Option<&str>,
) -> Result<Booking, AppError> {
    ensure_transition(booking, BookingStatus::Approved)?;

    let notes = match notes.map(str::trim) {
        Some(n) if !n.is_empty() => Some(n.to_string()),
        _ => booking.notes.clone(),
    };

    Ok(Booking {
        status: BookingStatus::Approved,
        approved_by: Some(approver_id.to_string()),
        approved_at: Some(at),
        notes,
        ..booking.clone()
    })
}

pub fn reject(booking: &Booking, reason: &str) -> Result<Booking, AppError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(AppError::Validation("Rejection reason is required".into()));
    }
    ensure_transition(booking, BookingStatus::Rejected)?;

    Ok(Booking {
        status: BookingStatus::Rejected,
        rejection_reason: Some(reason.to_string()),
        ..booking.clone()
    })
}

/// The status wall-clock time puts an approved or active booking in, if it
/// should move at all.
pub fn status_at(booking: &Booking, now: DateTime<Utc>) -> Option<BookingStatus> {
    let next = if now >= booking.end_date {
        BookingStatus::Completed
    } else if now >= booking.start_date {
        BookingStatus::Active
    } else {
        return None;
    };

    (next != booking.status && booking.status.can_transition_to(next)).then_some(next)
}
