//! Creates `shared_receipts`, the store of published receipt summaries.
//!
//! Rows are only ever inserted: a published summary is immutable and is read
//! back by id.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum SharedReceipts {
    Table,
    Id,
    Title,
    Document,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SharedReceipts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SharedReceipts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SharedReceipts::Title).string().not_null())
                    // Full summary JSON, as served to readers.
                    .col(ColumnDef::new(SharedReceipts::Document).text().not_null())
                    .col(
                        ColumnDef::new(SharedReceipts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-shared_receipts-created_at")
                    .table(SharedReceipts::Table)
                    .col(SharedReceipts::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SharedReceipts::Table).to_owned())
            .await
    }
}
