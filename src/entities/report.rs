// ABOUTME: Report entity owned by exactly one user
// ABOUTME: Parent of report fields, additional fields, and report files

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::report_field::Entity")]
    ReportFields,
    #[sea_orm(has_many = "super::additional_field::Entity")]
    AdditionalFields,
    #[sea_orm(has_many = "super::report_file::Entity")]
    ReportFiles,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::report_field::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReportFields.def()
    }
}

impl Related<super::additional_field::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdditionalFields.def()
    }
}

impl Related<super::report_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReportFiles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
