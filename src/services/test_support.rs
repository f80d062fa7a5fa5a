use image::{DynamicImage, ImageFormat, RgbImage};
use migration::Migrator;
use sea_orm::prelude::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;
use std::io::Cursor;

use crate::dtos::listing_dto::NewListing;
use crate::models::{address, country, listing_type, realtor, state};
use crate::services::connection_db::connect;
use crate::services::media_service::MediaStorage;

pub struct Fixture {
    pub listing_type: listing_type::Model,
    pub realtor: realtor::Model,
    pub address: address::Model,
}

pub async fn setup_db() -> DatabaseConnection {
    let db = connect("sqlite::memory:").await.expect("in-memory database");
    Migrator::up(&db, None).await.expect("migrations");
    db
}

pub async fn seed(db: &DatabaseConnection) -> Fixture {
    let listing_type = listing_type::ActiveModel {
        name: Set("Boarding school".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    let realtor = realtor::ActiveModel {
        name: Set("Aline Uwase".to_string()),
        email: Set("aline@example.rw".to_string()),
        phone: Set("+250 788 000 000".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    let rwanda = country::ActiveModel {
        name: Set("Rwanda".to_string()),
        shortcut: Set("RW".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    let kigali_city = state::ActiveModel {
        name: Set("Kigali City".to_string()),
        country_id: Set(rwanda.id),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    let address = address::ActiveModel {
        street: Set("KG 7 Ave".to_string()),
        hn: Set("12".to_string()),
        zipcode: Set("00000".to_string()),
        city: Set("Kigali".to_string()),
        state_id: Set(Some(kigali_city.id)),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    Fixture {
        listing_type,
        realtor,
        address,
    }
}

pub fn new_listing(fixture: &Fixture, title: &str) -> NewListing {
    NewListing::new(
        fixture.listing_type.id,
        fixture.realtor.id,
        title,
        Decimal::new(1_500_000, 0),
    )
}

/// Storage rooted in a fresh, not yet created, temp directory.
pub fn temp_storage() -> MediaStorage {
    let root = std::env::temp_dir().join(format!("media-{}", uuid::Uuid::new_v4().simple()));
    MediaStorage::new(root, 100, 75)
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, image::Rgb([30, 120, 60])));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("png encoding");
    bytes
}
