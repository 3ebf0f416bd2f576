use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cases::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cases::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Cases::Title).string().not_null())
                    .col(ColumnDef::new(Cases::Description).text().null())
                    .col(ColumnDef::new(Cases::ClientId).uuid().not_null())
                    .col(ColumnDef::new(Cases::LawyerId).uuid().not_null())
                    .col(
                        ColumnDef::new(Cases::CaseType)
                            .string()
                            .not_null()
                            .default("other"),
                    )
                    .col(
                        ColumnDef::new(Cases::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Cases::Priority)
                            .string()
                            .not_null()
                            .default("medium"),
                    )
                    .col(ColumnDef::new(Cases::StartDate).date().not_null())
                    .col(ColumnDef::new(Cases::EndDate).date().null())
                    .col(ColumnDef::new(Cases::EstimatedCompletion).date().null())
                    .col(
                        ColumnDef::new(Cases::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Cases::UpdatedAt)
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
                    .table(Cases::Table)
                    .col(Cases::ClientId)
                    .name("idx_cases_client_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Cases::Table)
                    .col(Cases::LawyerId)
                    .name("idx_cases_lawyer_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Cases::Table)
                    .col(Cases::Status)
                    .name("idx_cases_status")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cases::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Cases {
    Table,
    Id,
    Title,
    Description,
    ClientId,
    LawyerId,
    CaseType,
    Status,
    Priority,
    StartDate,
    EndDate,
    EstimatedCompletion,
    CreatedAt,
    UpdatedAt,
}
