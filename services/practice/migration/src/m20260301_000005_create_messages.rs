use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Messages::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Messages::SenderId).uuid().not_null())
                    .col(ColumnDef::new(Messages::ReceiverId).uuid().not_null())
                    .col(ColumnDef::new(Messages::CaseId).uuid().null())
                    .col(ColumnDef::new(Messages::Content).text().not_null())
                    .col(
                        ColumnDef::new(Messages::MessageType)
                            .string()
                            .not_null()
                            .default("text"),
                    )
                    .col(ColumnDef::new(Messages::FileUrl).text().null())
                    .col(ColumnDef::new(Messages::FileName).string().null())
                    .col(
                        ColumnDef::new(Messages::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Messages::ReadAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Messages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Messages::UpdatedAt)
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
                    .table(Messages::Table)
                    .col(Messages::SenderId)
                    .col(Messages::ReceiverId)
                    .col((Messages::CreatedAt, IndexOrder::Desc))
                    .name("idx_messages_sender_receiver_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Messages::Table)
                    .col(Messages::ReceiverId)
                    .col(Messages::IsRead)
                    .name("idx_messages_receiver_id_is_read")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Messages {
    Table,
    Id,
    SenderId,
    ReceiverId,
    CaseId,
    Content,
    MessageType,
    FileUrl,
    FileName,
    IsRead,
    ReadAt,
    CreatedAt,
    UpdatedAt,
}
