use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ListingFiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ListingFiles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ListingFiles::ListingId).integer().not_null())
                    .col(ColumnDef::new(ListingFiles::File).string_len(100).not_null())
                    .col(
                        ColumnDef::new(ListingFiles::Description)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ListingFiles::Created)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_listing_files_listing_id")
                    .table(ListingFiles::Table)
                    .col(ListingFiles::ListingId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ListingFiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ListingFiles {
    Table,
    Id,
    ListingId,
    File,
    Description,
    Created,
}
