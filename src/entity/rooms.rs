use sea_orm::entity::prelude::*;

use super::enums::{RoomStatus, RoomType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub nightly_rate: i64,
    pub room_type: RoomType,
    pub capacity: i32,
    pub status: RoomStatus,
    pub description: String,
    pub policy: String,
    pub amenities: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::room_photos::Entity")]
    RoomPhotos,
    #[sea_orm(has_many = "super::bookings::Entity")]
    Bookings,
    #[sea_orm(has_many = "super::service_requests::Entity")]
    ServiceRequests,
}

impl Related<super::room_photos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoomPhotos.def()
    }
}

impl Related<super::bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl Related<super::service_requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
