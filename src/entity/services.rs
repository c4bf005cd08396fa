use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub fee: i64,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::booked_services::Entity")]
    BookedServices,
}

impl Related<super::booked_services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookedServices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
