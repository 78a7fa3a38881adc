use std::sync::Arc;
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{info, warn};
use crate::domain::{
    models::{
        booking::{Booking, BookingStatus, NewBookingParams, ResourceType},
        resource::Resource,
        user::User,
    },
    ports::{BookingRepository, EquipmentRepository, RoomRepository},
    services::lifecycle,
};
use crate::error::AppError;

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Accepts RFC 3339 or a zone-less `YYYY-MM-DDTHH:MM[:SS]`, which is read as UTC.
pub fn parse_timestamp(field: &str, raw: &str) -> Result<DateTime<Utc>, AppError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::Validation(format!("Invalid {}: {}", field, raw)))
}

pub struct BookingDraft {
    pub resource_type: ResourceType,
    pub item_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub purpose: String,
    pub notes: Option<String>,
}

pub struct BookingService {
    booking_repo: Arc<dyn BookingRepository>,
    room_repo: Arc<dyn RoomRepository>,
    equipment_repo: Arc<dyn EquipmentRepository>,
}

impl BookingService {
    pub fn new(
        booking_repo: Arc<dyn BookingRepository>,
        room_repo: Arc<dyn RoomRepository>,
        equipment_repo: Arc<dyn EquipmentRepository>,
    ) -> Self {
        Self { booking_repo, room_repo, equipment_repo }
    }

    pub async fn resolve_resource(&self, resource_type: ResourceType, item_id: &str) -> Result<Resource, AppError> {
        let resource = match resource_type {
            ResourceType::Room => self.room_repo.find_by_id(item_id).await?.map(Resource::Room),
            ResourceType::Equipment => self.equipment_repo.find_by_id(item_id).await?.map(Resource::Equipment),
        };
        resource.ok_or_else(|| AppError::NotFound(format!("Item {} not found", item_id)))
    }

    /// Validates the draft, resolves the item's display name and stores a new
    /// `pending` booking. Nothing is written when any check fails.
    pub async fn create_booking(&self, requester: &User, draft: BookingDraft) -> Result<Booking, AppError> {
        let purpose = draft.purpose.trim();
        if purpose.is_empty() {
            return Err(AppError::Validation("Purpose is required".into()));
        }
        if draft.end <= draft.start {
            return Err(AppError::Validation("End date must be after start date".into()));
        }

        let resource = self.resolve_resource(draft.resource_type, &draft.item_id).await?;

        let booking = Booking::new(NewBookingParams {
            user_id: requester.id.clone(),
            user_name: requester.name.clone(),
            resource_type: draft.resource_type,
            item_id: draft.item_id,
            item_name: resource.name().to_string(),
            start: draft.start,
            end: draft.end,
            purpose: purpose.to_string(),
            notes: draft.notes.filter(|n| !n.trim().is_empty()),
        });

        let created = self.booking_repo.create(&booking).await?;
        info!("Booking {} submitted by {} for {}", created.id, created.user_id, created.item_name);
        Ok(created)
    }

    /// The overlap check and the write happen in a single conditional UPDATE,
    /// so two overlapping requests approved at once cannot both succeed.
    pub async fn approve(&self, booking_id: &str, approver: &User, notes: Option<&str>) -> Result<Booking, AppError> {
        let booking = self.find(booking_id).await?;
        let approved = lifecycle::approve(&booking, &approver.id, Utc::now(), notes)?;

        match self.booking_repo.approve_if_free(&approved).await? {
            Some(stored) => {
                info!("Booking {} approved by {}", stored.id, approver.id);
                Ok(stored)
            }
            None => Err(self.approval_refusal(&booking).await?),
        }
    }

    async fn approval_refusal(&self, booking: &Booking) -> Result<AppError, AppError> {
        let current = self.find(&booking.id).await?;
        if current.status != BookingStatus::Pending {
            return Ok(AppError::Conflict(format!("Booking {} was already reviewed", booking.id)));
        }

        let clash = self.booking_repo
            .list_committed_overlaps(booking.resource_type, &booking.item_id, booking.start_date, booking.end_date)
            .await?
            .into_iter()
            .find(|b| b.id != booking.id);

        Ok(match clash {
            Some(clash) => AppError::Conflict(format!(
                "{} is already booked by booking {} in this period",
                booking.item_name, clash.id
            )),
            None => AppError::Conflict(format!("{} is already booked in this period", booking.item_name)),
        })
    }

    pub async fn reject(&self, booking_id: &str, reason: &str) -> Result<Booking, AppError> {
        let booking = self.find(booking_id).await?;
        let rejected = lifecycle::reject(&booking, reason)?;

        let stored = self.store_transition(&rejected, BookingStatus::Pending).await?;
        info!("Booking {} rejected", stored.id);
        Ok(stored)
    }

    /// Moves approved and active bookings along by wall-clock time. Returns the
    /// number of bookings activated and completed.
    pub async fn advance_lifecycle(&self, now: DateTime<Utc>) -> Result<(u64, u64), AppError> {
        let mut candidates = self.booking_repo.list_by_status(BookingStatus::Approved).await?;
        candidates.extend(self.booking_repo.list_by_status(BookingStatus::Active).await?);

        let mut activated = 0;
        let mut completed = 0;
        for booking in candidates {
            let Some(next) = lifecycle::status_at(&booking, now) else { continue };
            let moved = Booking { status: next, ..booking.clone() };

            match self.booking_repo.update_if_status(&moved, booking.status).await? {
                Some(_) if next == BookingStatus::Active => activated += 1,
                Some(_) => completed += 1,
                None => warn!("Booking {} changed while advancing lifecycle, skipped", booking.id),
            }
        }
        Ok((activated, completed))
    }

    async fn find(&self, booking_id: &str) -> Result<Booking, AppError> {
        self.booking_repo.find_by_id(booking_id).await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))
    }

    async fn store_transition(&self, booking: &Booking, expected: BookingStatus) -> Result<Booking, AppError> {
        self.booking_repo.update_if_status(booking, expected).await?
            .ok_or_else(|| AppError::Conflict(format!("Booking {} was already reviewed", booking.id)))
    }
}
