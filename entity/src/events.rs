use sea_orm::entity::prelude::*;

/// Published event definition. Read-only to the registration core.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    /// `individual` or `team`
    pub event_type: String,
    pub team_size: i32,
    pub max_slots: i32,
    pub max_online_slots: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::registration_events::Entity")]
    RegistrationEvents,
    #[sea_orm(has_many = "super::slot_reservations::Entity")]
    SlotReservations,
}

impl Related<super::registration_events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RegistrationEvents.def()
    }
}

impl Related<super::slot_reservations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SlotReservations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
