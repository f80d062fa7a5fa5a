use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Realtors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Realtors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Realtors::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Realtors::Email).string_len(254).not_null())
                    .col(ColumnDef::new(Realtors::Phone).string_len(30).not_null().default(""))
                    .col(
                        ColumnDef::new(Realtors::Created)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Realtors::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Realtors {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Created,
}
