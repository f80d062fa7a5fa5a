use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Listings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Listings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Listings::ListingTypeId).integer().not_null())
                    // Realtor is referenced without a constraint: deleting one leaves listings untouched.
                    .col(ColumnDef::new(Listings::RealtorId).integer().not_null())
                    .col(ColumnDef::new(Listings::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Listings::AddressId).integer().null())
                    .col(ColumnDef::new(Listings::Description).text().not_null().default(""))
                    .col(ColumnDef::new(Listings::Price).decimal_len(16, 2).not_null())
                    .col(ColumnDef::new(Listings::SchoolLevel).string_len(50).null())
                    .col(ColumnDef::new(Listings::Religion).string_len(50).null())
                    .col(
                        ColumnDef::new(Listings::IsBoarding)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Listings::LanguagesOffered)
                            .string_len(200)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Listings::Facilities).text().not_null().default(""))
                    .col(ColumnDef::new(Listings::Bedrooms).integer().not_null().default(0))
                    .col(ColumnDef::new(Listings::Bathrooms).integer().not_null().default(0))
                    .col(ColumnDef::new(Listings::Garage).integer().not_null().default(0))
                    .col(ColumnDef::new(Listings::Sqft).double().not_null().default(0.0))
                    .col(ColumnDef::new(Listings::LotSize).double().not_null().default(0.0))
                    .col(ColumnDef::new(Listings::Image).string_len(100).not_null().default(""))
                    .col(
                        ColumnDef::new(Listings::ListingFor)
                            .string_len(5)
                            .not_null()
                            .default("S"),
                    )
                    .col(
                        ColumnDef::new(Listings::Protected)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Listings::IsPublished)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Listings::FreeFrom).date().not_null())
                    .col(ColumnDef::new(Listings::Created).timestamp().null())
                    .col(ColumnDef::new(Listings::Updated).timestamp().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_listings_listing_type_id")
                            .from(Listings::Table, Listings::ListingTypeId)
                            .to(ListingTypes::Table, ListingTypes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_listings_address_id")
                            .from(Listings::Table, Listings::AddressId)
                            .to(Addresses::Table, Addresses::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_listings_realtor_id")
                    .table(Listings::Table)
                    .col(Listings::RealtorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Listings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Listings {
    Table,
    Id,
    ListingTypeId,
    RealtorId,
    Title,
    AddressId,
    Description,
    Price,
    SchoolLevel,
    Religion,
    IsBoarding,
    LanguagesOffered,
    Facilities,
    Bedrooms,
    Bathrooms,
    Garage,
    Sqft,
    LotSize,
    Image,
    ListingFor,
    Protected,
    IsPublished,
    FreeFrom,
    Created,
    Updated,
}

#[derive(DeriveIden)]
enum ListingTypes {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Addresses {
    Table,
    Id,
}
