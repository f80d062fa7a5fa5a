use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Countries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Countries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Countries::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Countries::Shortcut).string_len(5).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(States::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(States::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(States::Name).string_len(100).not_null())
                    .col(ColumnDef::new(States::CountryId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_states_country_id")
                            .from(States::Table, States::CountryId)
                            .to(Countries::Table, Countries::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Addresses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Addresses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Addresses::Street).string_len(200).not_null())
                    .col(ColumnDef::new(Addresses::Hn).string_len(20).not_null())
                    .col(ColumnDef::new(Addresses::Zipcode).string_len(20).not_null())
                    .col(ColumnDef::new(Addresses::City).string_len(100).not_null())
                    .col(ColumnDef::new(Addresses::StateId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_addresses_state_id")
                            .from(Addresses::Table, Addresses::StateId)
                            .to(States::Table, States::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Addresses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(States::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Countries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Countries {
    Table,
    Id,
    Name,
    Shortcut,
}

#[derive(DeriveIden)]
enum States {
    Table,
    Id,
    Name,
    CountryId,
}

#[derive(DeriveIden)]
enum Addresses {
    Table,
    Id,
    Street,
    Hn,
    Zipcode,
    City,
    StateId,
}
