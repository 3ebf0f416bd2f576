use sea_orm_migration::prelude::*;

mod m20260301_000001_create_users;
mod m20260301_000002_create_cases;
mod m20260301_000003_create_case_children;
mod m20260301_000004_create_appointments;
mod m20260301_000005_create_messages;
mod m20260301_000006_create_notifications;
mod m20260301_000007_create_invoices;
mod m20260301_000008_add_scheduled_slot_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_users::Migration),
            Box::new(m20260301_000002_create_cases::Migration),
            Box::new(m20260301_000003_create_case_children::Migration),
            Box::new(m20260301_000004_create_appointments::Migration),
            Box::new(m20260301_000005_create_messages::Migration),
            Box::new(m20260301_000006_create_notifications::Migration),
            Box::new(m20260301_000007_create_invoices::Migration),
            Box::new(m20260301_000008_add_scheduled_slot_index::Migration),
        ]
    }
}
