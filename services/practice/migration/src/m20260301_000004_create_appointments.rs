use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Appointments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Appointments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Appointments::ClientId).uuid().not_null())
                    .col(ColumnDef::new(Appointments::LawyerId).uuid().not_null())
                    .col(ColumnDef::new(Appointments::CaseId).uuid().not_null())
                    .col(ColumnDef::new(Appointments::Date).date().not_null())
                    .col(ColumnDef::new(Appointments::Time).string().not_null())
                    .col(
                        ColumnDef::new(Appointments::Status)
                            .string()
                            .not_null()
                            .default("scheduled"),
                    )
                    .col(
                        ColumnDef::new(Appointments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Appointments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Appointments::Table)
                    .col(Appointments::ClientId)
                    .col(Appointments::Date)
                    .name("idx_appointments_client_id_date")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Appointments::Table)
                    .col(Appointments::LawyerId)
                    .col(Appointments::Date)
                    .name("idx_appointments_lawyer_id_date")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Appointments::Table)
                    .col(Appointments::CaseId)
                    .name("idx_appointments_case_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Appointments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Appointments {
    Table,
    Id,
    ClientId,
    LawyerId,
    CaseId,
    Date,
    Time,
    Status,
    CreatedAt,
    UpdatedAt,
}
