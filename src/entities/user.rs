// ABOUTME: User entity definition for SeaORM with profile and medical info columns
// ABOUTME: Root of the ownership hierarchy for reports and additional fields

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<Date>,
    pub gender: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub medical_history: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub allergies: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::report::Entity")]
    Reports,
    #[sea_orm(has_many = "super::additional_field::Entity")]
    AdditionalFields,
}

impl Related<super::report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reports.def()
    }
}

impl Related<super::additional_field::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdditionalFields.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
