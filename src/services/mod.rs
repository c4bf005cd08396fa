pub mod auth_service;
pub mod booking_service;
pub mod front_desk_service;
pub mod invoice_service;
pub mod request_service;
pub mod room_service;
pub mod schedule_service;
