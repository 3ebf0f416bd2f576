use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CaseDocuments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CaseDocuments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CaseDocuments::CaseId).uuid().not_null())
                    .col(ColumnDef::new(CaseDocuments::Name).string().not_null())
                    .col(ColumnDef::new(CaseDocuments::Url).text().not_null())
                    .col(
                        ColumnDef::new(CaseDocuments::UploadedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CaseDocuments::Table, CaseDocuments::CaseId)
                            .to(Cases::Table, Cases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(CaseDocuments::Table)
                    .col(CaseDocuments::CaseId)
                    .col(CaseDocuments::UploadedAt)
                    .name("idx_case_documents_case_id_uploaded_at")
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CaseNotes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CaseNotes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(CaseNotes::CaseId).uuid().not_null())
                    .col(ColumnDef::new(CaseNotes::Content).text().not_null())
                    .col(ColumnDef::new(CaseNotes::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(CaseNotes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CaseNotes::Table, CaseNotes::CaseId)
                            .to(Cases::Table, Cases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(CaseNotes::Table)
                    .col(CaseNotes::CaseId)
                    .col(CaseNotes::CreatedAt)
                    .name("idx_case_notes_case_id_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CaseNotes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CaseDocuments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CaseDocuments {
    Table,
    Id,
    CaseId,
    Name,
    Url,
    UploadedAt,
}

#[derive(Iden)]
enum CaseNotes {
    Table,
    Id,
    CaseId,
    Content,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum Cases {
    Table,
    Id,
}
