use std::sync::Arc;
use crate::domain::ports::{
    BookingRepository, DeactivationRepository, EquipmentRepository, RoomRepository,
    UserRepository,
};
use crate::domain::services::{auth_service::AuthService, booking_service::BookingService};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub deactivation_repo: Arc<dyn DeactivationRepository>,
    pub room_repo: Arc<dyn RoomRepository>,
    pub equipment_repo: Arc<dyn EquipmentRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub auth_service: Arc<AuthService>,
    pub booking_service: Arc<BookingService>,
}
