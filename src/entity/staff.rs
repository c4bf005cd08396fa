use sea_orm::entity::prelude::*;

use super::enums::{EmploymentStatus, Gender, StaffPosition};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub full_name: String,
    pub gender: Gender,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub position: StaffPosition,
    pub employment_status: EmploymentStatus,
    pub hired_on: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(has_many = "super::shift_schedules::Entity")]
    ShiftSchedules,
    #[sea_orm(has_many = "super::service_requests::Entity")]
    ServiceRequests,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::shift_schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShiftSchedules.def()
    }
}

impl Related<super::service_requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
