use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "registrations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    pub college: String,
    pub student_year: String,
    pub food: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::registration_events::Entity")]
    RegistrationEvents,
    #[sea_orm(has_one = "super::food_tokens::Entity")]
    FoodTokens,
}

impl Related<super::registration_events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RegistrationEvents.def()
    }
}

impl Related<super::food_tokens::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FoodTokens.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
