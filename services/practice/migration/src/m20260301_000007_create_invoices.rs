use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Invoices::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Invoices::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Invoices::InvoiceNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Invoices::Client).string().not_null())
                    .col(
                        ColumnDef::new(Invoices::Amount)
                            .decimal_len(14, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Invoices::DueDate).date().not_null())
                    .col(
                        ColumnDef::new(Invoices::PaymentStatus)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Invoices::PaymentReference).string().null())
                    .col(
                        ColumnDef::new(Invoices::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Invoices::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Invoices::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Invoices {
    Table,
    Id,
    InvoiceNumber,
    Client,
    Amount,
    DueDate,
    PaymentStatus,
    PaymentReference,
    CreatedAt,
    UpdatedAt,
}
