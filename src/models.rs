use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{
    booked_services, bookings, customers,
    enums::{
        BookingStatus, RequestCategory, RequestStatus, RoomStatus, RoomType, Shift, UserRole,
    },
    invoices, room_photos, rooms, service_requests, services, shift_schedules, users,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            role: model.role,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl From<customers::Model> for Customer {
    fn from(model: customers::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            full_name: model.full_name,
            phone: model.phone,
            email: model.email,
            address: model.address,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub nightly_rate: i64,
    pub room_type: RoomType,
    pub capacity: i32,
    pub status: RoomStatus,
    pub description: String,
    pub policy: String,
    pub amenities: String,
    pub created_at: DateTime<Utc>,
}

impl From<rooms::Model> for Room {
    fn from(model: rooms::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            nightly_rate: model.nightly_rate,
            room_type: model.room_type,
            capacity: model.capacity,
            status: model.status,
            description: model.description,
            policy: model.policy,
            amenities: model.amenities,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomPhoto {
    pub id: Uuid,
    pub url: String,
    pub caption: Option<String>,
}

impl From<room_photos::Model> for RoomPhoto {
    fn from(model: room_photos::Model) -> Self {
        Self {
            id: model.id,
            url: model.url,
            caption: model.caption,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub fee: i64,
    pub active: bool,
}

impl From<services::Model> for Service {
    fn from(model: services::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            fee: model.fee,
            active: model.active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Booking {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i32,
    pub price: i64,
    pub status: BookingStatus,
    pub note: String,
    pub paid: bool,
    pub created_at: DateTime<Utc>,
}

impl From<bookings::Model> for Booking {
    fn from(model: bookings::Model) -> Self {
        Self {
            id: model.id,
            customer_id: model.customer_id,
            room_id: model.room_id,
            check_in: model.check_in,
            check_out: model.check_out,
            guests: model.guests,
            price: model.price,
            status: model.status,
            note: model.note,
            paid: model.paid,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookedService {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub service_id: Uuid,
    pub usage_date: NaiveDate,
    pub usage_time: NaiveTime,
    pub quantity: i32,
    pub line_total: i64,
    pub note: String,
}

impl From<booked_services::Model> for BookedService {
    fn from(model: booked_services::Model) -> Self {
        Self {
            id: model.id,
            booking_id: model.booking_id,
            service_id: model.service_id,
            usage_date: model.usage_date,
            usage_time: model.usage_time,
            quantity: model.quantity,
            line_total: model.line_total,
            note: model.note,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Invoice {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub invoice_number: String,
    pub total_amount: i64,
    pub paid: bool,
    pub payment_method: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<invoices::Model> for Invoice {
    fn from(model: invoices::Model) -> Self {
        Self {
            id: model.id,
            booking_id: model.booking_id,
            invoice_number: model.invoice_number,
            total_amount: model.total_amount,
            paid: model.paid,
            payment_method: model.payment_method,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceRequest {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub room_id: Uuid,
    pub staff_id: Option<Uuid>,
    pub category: RequestCategory,
    pub content: String,
    pub status: RequestStatus,
    pub note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<service_requests::Model> for ServiceRequest {
    fn from(model: service_requests::Model) -> Self {
        Self {
            id: model.id,
            customer_id: model.customer_id,
            room_id: model.room_id,
            staff_id: model.staff_id,
            category: model.category,
            content: model.content,
            status: model.status,
            note: model.note,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
            completed_at: model.completed_at.map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShiftSchedule {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub work_date: NaiveDate,
    pub shift: Shift,
    pub note: String,
}

impl From<shift_schedules::Model> for ShiftSchedule {
    fn from(model: shift_schedules::Model) -> Self {
        Self {
            id: model.id,
            staff_id: model.staff_id,
            work_date: model.work_date,
            shift: model.shift,
            note: model.note,
        }
    }
}
