use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Room, RoomPhoto, Service};

#[derive(Debug, Serialize, ToSchema)]
pub struct RoomList {
    pub items: Vec<Room>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoomDetail {
    pub room: Room,
    pub photos: Vec<RoomPhoto>,
    /// Active services that can be staged with a booking of this room.
    pub available_services: Vec<Service>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceList {
    pub items: Vec<Service>,
}
