use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    models::{BookedService, Booking, Invoice},
    workflow::booking::BookingAction,
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StageBookingRequest {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default = "default_guests")]
    pub guests: i32,
    #[serde(default)]
    pub service_ids: Vec<Uuid>,
}

fn default_guests() -> i32 {
    1
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingList {
    pub items: Vec<Booking>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingDetail {
    pub booking: Booking,
    pub services: Vec<BookedService>,
    pub invoice: Option<Invoice>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BookingActionRequest {
    pub action: BookingAction,
    pub note: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingActionResult {
    pub booking: Booking,
    pub invoice: Option<Invoice>,
    /// False when check-out found an invoice already on file.
    pub invoice_created: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddServiceRequest {
    pub service_id: Uuid,
    pub usage_date: NaiveDate,
    pub usage_time: NaiveTime,
    pub quantity: i32,
    #[serde(default)]
    pub note: String,
}
