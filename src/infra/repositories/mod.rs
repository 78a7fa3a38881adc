pub mod sqlite_booking_repo;
pub mod sqlite_deactivation_repo;
pub mod sqlite_equipment_repo;
pub mod sqlite_room_repo;
pub mod sqlite_session_repo;
pub mod sqlite_user_repo;
