mod m20261019_000001_create_locations_tables;
mod m20261019_000002_create_realtors_table;
mod m20261019_000003_create_listing_types_table;
mod m20261019_000004_create_listings_table;
mod m20261019_000005_create_listing_images_table;
mod m20261019_000006_create_listing_files_table;
mod m20261019_000007_create_listing_to_customers_table;

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261019_000001_create_locations_tables::Migration),
            Box::new(m20261019_000002_create_realtors_table::Migration),
            Box::new(m20261019_000003_create_listing_types_table::Migration),
            Box::new(m20261019_000004_create_listings_table::Migration),
            Box::new(m20261019_000005_create_listing_images_table::Migration),
            Box::new(m20261019_000006_create_listing_files_table::Migration),
            Box::new(m20261019_000007_create_listing_to_customers_table::Migration),
        ]
    }
}
