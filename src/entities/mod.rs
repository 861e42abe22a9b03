// ABOUTME: SeaORM entities module for database models and relationships
// ABOUTME: Exports all entity definitions for users, reports, and report sub-entities

pub mod user;
pub mod report;
pub mod report_field;
pub mod additional_field;
pub mod report_file;

pub use user::Entity as User;
pub use report::Entity as Report;
pub use report_field::Entity as ReportField;
pub use additional_field::Entity as AdditionalField;
pub use report_file::Entity as ReportFile;
