pub mod auth;
pub mod bookings;
pub mod invoices;
pub mod requests;
pub mod rooms;
pub mod schedules;
