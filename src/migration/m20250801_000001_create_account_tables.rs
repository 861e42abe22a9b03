// ABOUTME: Initial migration to create users, reports, report_fields, additional_fields, and report_files tables
// ABOUTME: Foreign keys use RESTRICT so the cascade sweeps in the storage layer stay load-bearing

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::FirstName).string())
                    .col(ColumnDef::new(Users::LastName).string())
                    .col(ColumnDef::new(Users::PhoneNumber).string())
                    .col(ColumnDef::new(Users::DateOfBirth).date())
                    .col(ColumnDef::new(Users::Gender).string())
                    .col(ColumnDef::new(Users::MedicalHistory).text())
                    .col(ColumnDef::new(Users::Allergies).text())
                    .col(ColumnDef::new(Users::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        // Create reports table
        manager
            .create_table(
                Table::create()
                    .table(Reports::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Reports::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Reports::UserId).integer().not_null())
                    .col(ColumnDef::new(Reports::Title).string().not_null())
                    .col(ColumnDef::new(Reports::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reports_user_id")
                            .from(Reports::Table, Reports::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create report_fields table
        manager
            .create_table(
                Table::create()
                    .table(ReportFields::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ReportFields::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(ReportFields::ReportId).integer().not_null())
                    .col(ColumnDef::new(ReportFields::Name).string().not_null())
                    .col(ColumnDef::new(ReportFields::Value).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_fields_report_id")
                            .from(ReportFields::Table, ReportFields::ReportId)
                            .to(Reports::Table, Reports::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create additional_fields table (two association paths: report_id and user_id)
        manager
            .create_table(
                Table::create()
                    .table(AdditionalFields::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AdditionalFields::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(AdditionalFields::ReportId).integer())
                    .col(ColumnDef::new(AdditionalFields::UserId).integer())
                    .col(ColumnDef::new(AdditionalFields::Name).string().not_null())
                    .col(ColumnDef::new(AdditionalFields::Value).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_additional_fields_report_id")
                            .from(AdditionalFields::Table, AdditionalFields::ReportId)
                            .to(Reports::Table, Reports::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_additional_fields_user_id")
                            .from(AdditionalFields::Table, AdditionalFields::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create report_files table
        manager
            .create_table(
                Table::create()
                    .table(ReportFiles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ReportFiles::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(ReportFiles::ReportId).integer().not_null())
                    .col(ColumnDef::new(ReportFiles::Filename).string().not_null())
                    .col(ColumnDef::new(ReportFiles::ContentType).string())
                    .col(ColumnDef::new(ReportFiles::UploadedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_files_report_id")
                            .from(ReportFiles::Table, ReportFiles::ReportId)
                            .to(Reports::Table, Reports::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReportFiles::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AdditionalFields::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ReportFields::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Reports::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    FirstName,
    LastName,
    PhoneNumber,
    DateOfBirth,
    Gender,
    MedicalHistory,
    Allergies,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Reports {
    Table,
    Id,
    UserId,
    Title,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ReportFields {
    Table,
    Id,
    ReportId,
    Name,
    Value,
}

#[derive(DeriveIden)]
enum AdditionalFields {
    Table,
    Id,
    ReportId,
    UserId,
    Name,
    Value,
}

#[derive(DeriveIden)]
enum ReportFiles {
    Table,
    Id,
    ReportId,
    Filename,
    ContentType,
    UploadedAt,
}
