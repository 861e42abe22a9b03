// ABOUTME: SeaORM storage layer for users, reports, and report sub-entities
// ABOUTME: Owns the transaction boundary for the multi-table account deletion cascade

use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, ModelTrait, QueryFilter, TransactionTrait,
};
use sea_orm_migration::MigratorTrait;

use crate::entities::{additional_field, report, report_field, report_file, user};
use crate::migration::Migrator;

pub struct Storage {
    pub db: DatabaseConnection,
}

impl Storage {
    pub async fn new() -> Result<Self> {
        let db_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:carelog.db?mode=rwc".to_string());
        let db = Database::connect(&db_url).await?;

        Migrator::up(&db, None).await?;

        Ok(Self { db })
    }

    pub async fn get_user(&self, user_id: i32) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find_by_id(user_id).one(&self.db).await
    }

    /// Persist an already-validated batch of profile changes as one UPDATE.
    /// An update with no staged columns is a no-op.
    pub async fn update_user(&self, user: user::ActiveModel) -> Result<(), DbErr> {
        if !user.is_changed() {
            return Ok(());
        }

        user.update(&self.db).await?;
        Ok(())
    }

    /// Delete a user and every row that references them, in one transaction.
    ///
    /// `sweep_user_fields` controls whether additional_fields rows linked
    /// directly to the user (rather than through a report) are removed. The
    /// self-service path sweeps them; the admin/testing path does not, and
    /// will roll back if any such rows exist.
    pub async fn delete_user_cascade(&self, user_id: i32, sweep_user_fields: bool) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        match Self::run_cascade(&txn, user_id, sweep_user_fields).await {
            Ok(()) => txn.commit().await,
            Err(err) => {
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    async fn run_cascade(
        txn: &DatabaseTransaction,
        user_id: i32,
        sweep_user_fields: bool,
    ) -> Result<(), DbErr> {
        let reports = report::Entity::find()
            .filter(report::Column::UserId.eq(user_id))
            .all(txn)
            .await?;

        for report in reports {
            report_field::Entity::delete_many()
                .filter(report_field::Column::ReportId.eq(report.id))
                .exec(txn)
                .await?;
            additional_field::Entity::delete_many()
                .filter(additional_field::Column::ReportId.eq(report.id))
                .exec(txn)
                .await?;
            report_file::Entity::delete_many()
                .filter(report_file::Column::ReportId.eq(report.id))
                .exec(txn)
                .await?;
            report.delete(txn).await?;
        }

        if sweep_user_fields {
            additional_field::Entity::delete_many()
                .filter(additional_field::Column::UserId.eq(user_id))
                .exec(txn)
                .await?;
        }

        user::Entity::delete_by_id(user_id).exec(txn).await?;

        Ok(())
    }
}
