use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No foreign key on listing_id: removing a listing must not touch its image rows.
        manager
            .create_table(
                Table::create()
                    .table(ListingImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ListingImages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ListingImages::ListingId).integer().not_null())
                    .col(ColumnDef::new(ListingImages::Image).string_len(100).null())
                    .col(
                        ColumnDef::new(ListingImages::ShortDescription)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ListingImages::Created)
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
                    .name("idx_listing_images_listing_id")
                    .table(ListingImages::Table)
                    .col(ListingImages::ListingId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ListingImages::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ListingImages {
    Table,
    Id,
    ListingId,
    Image,
    ShortDescription,
    Created,
}
