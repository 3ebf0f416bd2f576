use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// At most one scheduled appointment per lawyer and slot. Completed or canceled rows may
// share the slot.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS uq_appointments_scheduled_slot \
                 ON appointments (lawyer_id, date, time) \
                 WHERE status = 'scheduled'",
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("uq_appointments_scheduled_slot")
                    .to_owned(),
            )
            .await
    }
}
