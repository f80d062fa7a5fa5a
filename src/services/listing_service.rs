use log::{debug, info, warn};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, ModelTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::prelude::Decimal;

use crate::dtos::listing_dto::{ListingSummary, ListingUpdate, NewListing, Upload};
use crate::errors::ListingError;
use crate::models::filter::{Filter, SortOrder};
use crate::models::listing::{self, ActiveModel, Entity, Model};
use crate::models::page::Page;
use crate::models::{listing_image, listing_type};
use crate::services::image_format_service::ImageFormatter;
use crate::services::media_service::{MediaStorage, listing_dir_path};

const MAX_TITLE_LEN: usize = 100;

fn validate_title(title: &str) -> Result<String, ListingError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ListingError::Empty("title"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ListingError::TooLong {
            field: "title",
            max: MAX_TITLE_LEN,
        });
    }
    Ok(title.to_string())
}

fn validate_price(price: Decimal) -> Result<Decimal, ListingError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ListingError::NegativePrice(price));
    }
    Ok(price)
}

/// Inserts the listing, then stores its main image under the id it was given.
pub async fn create_listing(
    db: &DatabaseConnection,
    storage: &MediaStorage,
    new: NewListing,
    image: Option<Upload>,
) -> Result<Model, ListingError> {
    let title = validate_title(&new.title)?;
    let price = validate_price(new.price)?;

    let txn = db.begin().await?;

    let active = ActiveModel {
        listing_type_id: Set(new.listing_type_id),
        realtor_id: Set(new.realtor_id),
        address_id: Set(new.address_id),
        title: Set(title),
        description: Set(new.description),
        price: Set(price),
        school_level: Set(new.school_level),
        religion: Set(new.religion),
        is_boarding: Set(new.is_boarding),
        languages_offered: Set(new.languages_offered),
        facilities: Set(new.facilities),
        bedrooms: Set(new.bedrooms),
        bathrooms: Set(new.bathrooms),
        garage: Set(new.garage),
        sqft: Set(new.sqft),
        lot_size: Set(new.lot_size),
        image: Set(String::new()),
        listing_for: Set(new.listing_for),
        protected: Set(new.protected),
        is_published: Set(new.is_published),
        free_from: new.free_from.map_or(NotSet, Set),
        ..Default::default()
    };

    let model = active.insert(&txn).await?;

    let model = match image {
        Some(upload) => {
            let path = listing_dir_path(Some(model.id), &upload.filename);
            let staged = storage.stage_image("", &path, &upload.bytes)?;

            match attach_main_image(txn, model, path).await {
                Ok(model) => model,
                Err(e) => {
                    storage.rollback_image(&staged);
                    return Err(e.into());
                }
            }
        }
        None => {
            txn.commit().await?;
            model
        }
    };

    info!("Created listing '{}' ({})", model.title, model.id);
    Ok(model)
}

async fn attach_main_image(
    txn: DatabaseTransaction,
    model: Model,
    path: String,
) -> Result<Model, DbErr> {
    let mut active: ActiveModel = model.into();
    active.image = Set(path);
    let model = active.update(&txn).await?;
    txn.commit().await?;
    Ok(model)
}

pub async fn update_listing(
    db: &DatabaseConnection,
    storage: &MediaStorage,
    id: i64,
    changes: ListingUpdate,
    image: Option<Upload>,
) -> Result<Model, ListingError> {
    let existing = find_by_id(db, id).await?;
    let previous_image = existing.image.clone();
    let mut active: ActiveModel = existing.into();

    if let Some(v) = changes.listing_type_id {
        active.listing_type_id = Set(v);
    }
    if let Some(v) = changes.address_id {
        active.address_id = Set(v);
    }
    if let Some(v) = changes.title {
        active.title = Set(validate_title(&v)?);
    }
    if let Some(v) = changes.description {
        active.description = Set(v);
    }
    if let Some(v) = changes.price {
        active.price = Set(validate_price(v)?);
    }
    if let Some(v) = changes.school_level {
        active.school_level = Set(v);
    }
    if let Some(v) = changes.religion {
        active.religion = Set(v);
    }
    if let Some(v) = changes.is_boarding {
        active.is_boarding = Set(v);
    }
    if let Some(v) = changes.languages_offered {
        active.languages_offered = Set(v);
    }
    if let Some(v) = changes.facilities {
        active.facilities = Set(v);
    }
    if let Some(v) = changes.bedrooms {
        active.bedrooms = Set(v);
    }
    if let Some(v) = changes.bathrooms {
        active.bathrooms = Set(v);
    }
    if let Some(v) = changes.garage {
        active.garage = Set(v);
    }
    if let Some(v) = changes.sqft {
        active.sqft = Set(v);
    }
    if let Some(v) = changes.lot_size {
        active.lot_size = Set(v);
    }
    if let Some(v) = changes.listing_for {
        active.listing_for = Set(v);
    }
    if let Some(v) = changes.protected {
        active.protected = Set(v);
    }
    if let Some(v) = changes.is_published {
        active.is_published = Set(v);
    }
    if let Some(v) = changes.free_from {
        active.free_from = Set(v);
    }

    let staged = match image {
        Some(upload) => {
            let path = listing_dir_path(Some(id), &upload.filename);
            let staged = storage.stage_image(&previous_image, &path, &upload.bytes)?;
            active.image = Set(path);
            Some(staged)
        }
        None => None,
    };

    match active.update(db).await {
        Ok(model) => {
            if let Some(staged) = &staged {
                storage.commit_image(staged);
            }
            debug!("Updated listing {}", model.id);
            Ok(model)
        }
        Err(e) => {
            if let Some(staged) = &staged {
                warn!("Update of listing {} failed, restoring its image", id);
                storage.rollback_image(staged);
            }
            Err(e.into())
        }
    }
}

/// Deletes the listing row only. Gallery images, files and customer links
/// keep pointing at the removed id.
pub async fn delete_listing<C>(db: &C, id: i64) -> Result<(), ListingError>
where
    C: ConnectionTrait,
{
    let model = find_by_id(db, id).await?;

    let orphaned = model.find_related(listing_image::Entity).count(db).await?;
    if orphaned > 0 {
        warn!(
            "Deleting listing {} leaves {} gallery image(s) without a listing",
            id, orphaned
        );
    }

    Entity::delete_by_id(id).exec(db).await?;
    info!("Deleted listing '{}' ({})", model.title, id);
    Ok(())
}

pub async fn find_by_id<C>(db: &C, id: i64) -> Result<Model, ListingError>
where
    C: ConnectionTrait,
{
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ListingError::NotFound {
            entity: "listing",
            id,
        })
}

/// One page of published listings matching `filter`; `page` is zero-based.
pub async fn find_published<C>(
    db: &C,
    filter: &Filter,
    page: u64,
    size: u64,
) -> Result<Page<Model>, ListingError>
where
    C: ConnectionTrait,
{
    let size = size.max(1);
    let mut query = Entity::find().filter(listing::Column::IsPublished.eq(true));

    if let Some(cond) = build_title_condition(&filter.query) {
        query = query.filter(cond);
    }
    if let Some(listing_for) = filter.listing_for {
        query = query.filter(listing::Column::ListingFor.eq(listing_for));
    }
    if let Some(type_id) = filter.listing_type_id {
        query = query.filter(listing::Column::ListingTypeId.eq(type_id));
    }

    let total_items = query.clone().count(db).await?;
    let total_pages = total_items.div_ceil(size);

    let order = if filter.sort_order == SortOrder::CreatedDesc {
        Order::Desc
    } else {
        Order::Asc
    };

    let content = query
        .order_by(listing::Column::Created, order.clone())
        .order_by(listing::Column::Id, order)
        .limit(size)
        .offset(page * size)
        .all(db)
        .await?;

    Ok(Page {
        content,
        total_items,
        total_pages,
        page_number: page,
    })
}

fn build_title_condition(query: &str) -> Option<Condition> {
    let q = query.trim();
    if q.is_empty() {
        return None;
    }

    if q.contains('+') {
        let mut cond = Condition::any();
        for term in q.split('+').map(str::trim).filter(|t| !t.is_empty()) {
            cond = cond.add(listing::Column::Title.contains(term));
        }
        Some(cond)
    } else {
        Some(Condition::all().add(listing::Column::Title.contains(q)))
    }
}

/// Resolves every derived display value of a listing.
pub async fn to_summary<C>(
    db: &C,
    model: &Model,
    formatter: &dyn ImageFormatter,
) -> Result<ListingSummary, ListingError>
where
    C: ConnectionTrait,
{
    let listing_type = model
        .find_related(listing_type::Entity)
        .one(db)
        .await?
        .map(|t| t.name)
        .unwrap_or_default();

    let address = match model.get_address(db).await {
        Ok(address) => Some(address),
        Err(ListingError::MissingAddress(_) | ListingError::MissingReference { .. }) => None,
        Err(e) => return Err(e),
    };

    Ok(ListingSummary {
        id: model.id,
        title: model.title.clone(),
        listing_type,
        listing_for: model.listing_for.to_string(),
        price: model.get_price(),
        total_rooms: model.get_total_rooms(),
        sqft: model.get_sqft(),
        availability: model.free_date().to_string(),
        address,
        images: model.get_images(db).await?,
        files: model.get_nr_files(db).await?,
        image_url: model.get_image(formatter),
        headshot_url: model.headshot_image(formatter),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::ListingFor;
    use crate::models::{address, listing_to_customer};
    use crate::services::geocoding_service::{Coordinates, GazetteerGeocoder};
    use crate::services::image_format_service::MediaImageFormatter;
    use crate::services::listing_image_service;
    use crate::services::media_service::thumbnail_path;
    use crate::services::test_support::{new_listing, png_bytes, seed, setup_db, temp_storage};
    use chrono::{Duration, Local};

    #[tokio::test]
    async fn create_fills_defaults_and_timestamps() {
        let db = setup_db().await;
        let fixture = seed(&db).await;
        let storage = temp_storage();

        let model = create_listing(&db, &storage, new_listing(&fixture, "Green Hills"), None)
            .await
            .unwrap();

        assert_eq!(model.free_from, Local::now().date_naive());
        assert!(model.created.is_some());
        assert!(model.updated.is_some());
        assert_eq!(model.image, "");
        assert_eq!(model.listing_for, ListingFor::Sell);
        assert_eq!(model.get_images(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn main_image_is_named_after_the_new_id() {
        let db = setup_db().await;
        let fixture = seed(&db).await;
        let storage = temp_storage();

        let model = create_listing(
            &db,
            &storage,
            new_listing(&fixture, "Green Hills"),
            Some(Upload::new("front.png", png_bytes(640, 480))),
        )
        .await
        .unwrap();

        assert_eq!(model.image, format!("listings/{}.png", model.id));
        assert!(storage.exists(&model.image));
        assert!(storage.exists(&thumbnail_path(&model.image)));
        assert_eq!(model.get_images(&db).await.unwrap(), 1);
        assert_eq!(find_by_id(&db, model.id).await.unwrap().image, model.image);
    }

    #[tokio::test]
    async fn failed_upload_rolls_back_the_insert() {
        let db = setup_db().await;
        let fixture = seed(&db).await;
        let storage = temp_storage();

        let result = create_listing(
            &db,
            &storage,
            new_listing(&fixture, "Broken upload"),
            Some(Upload::new("front.jpg", b"not an image".to_vec())),
        )
        .await;

        assert!(matches!(result, Err(ListingError::Image(_))));
        assert_eq!(Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_changes_only_given_fields_and_replaces_image() {
        let db = setup_db().await;
        let fixture = seed(&db).await;
        let storage = temp_storage();
        let created = create_listing(
            &db,
            &storage,
            new_listing(&fixture, "Green Hills"),
            Some(Upload::new("front.png", png_bytes(64, 64))),
        )
        .await
        .unwrap();
        let old_image = created.image.clone();

        let changes = ListingUpdate {
            price: Some(Decimal::new(250_000, 0)),
            bedrooms: Some(30),
            listing_for: Some(ListingFor::Rent),
            ..Default::default()
        };
        let updated = update_listing(
            &db,
            &storage,
            created.id,
            changes,
            Some(Upload::new("front.jpeg", png_bytes(64, 64))),
        )
        .await
        .unwrap();

        assert_eq!(updated.title, "Green Hills");
        assert_eq!(updated.get_price(), "250000.00 RWF");
        assert_eq!(updated.bedrooms, 30);
        assert_eq!(updated.listing_for, ListingFor::Rent);
        assert_eq!(updated.image, format!("listings/{}.jpeg", created.id));
        assert!(storage.exists(&updated.image));
        assert!(!storage.exists(&old_image));
        assert!(storage.exists(&thumbnail_path(&updated.image)));
    }

    #[tokio::test]
    async fn rejected_update_keeps_the_previous_image() {
        let db = setup_db().await;
        let fixture = seed(&db).await;
        let storage = temp_storage();
        let created = create_listing(
            &db,
            &storage,
            new_listing(&fixture, "Green Hills"),
            Some(Upload::new("front.png", png_bytes(64, 64))),
        )
        .await
        .unwrap();

        let changes = ListingUpdate {
            listing_type_id: Some(9999),
            ..Default::default()
        };
        let result = update_listing(
            &db,
            &storage,
            created.id,
            changes,
            Some(Upload::new("front.jpeg", png_bytes(32, 32))),
        )
        .await;

        assert!(matches!(result, Err(ListingError::Db(_))));
        let stored = find_by_id(&db, created.id).await.unwrap();
        assert_eq!(stored.image, created.image);
        assert!(storage.exists(&stored.image));
        assert!(storage.exists(&thumbnail_path(&stored.image)));
        assert!(!storage.exists(&format!("listings/{}.jpeg", created.id)));
    }

    #[tokio::test]
    async fn rejected_update_restores_an_overwritten_image() {
        let db = setup_db().await;
        let fixture = seed(&db).await;
        let storage = temp_storage();
        let original = png_bytes(64, 64);
        let created = create_listing(
            &db,
            &storage,
            new_listing(&fixture, "Green Hills"),
            Some(Upload::new("front.png", original.clone())),
        )
        .await
        .unwrap();
        let before = std::fs::read(storage.path_of(&created.image)).unwrap();

        let changes = ListingUpdate {
            listing_type_id: Some(9999),
            ..Default::default()
        };
        let result = update_listing(
            &db,
            &storage,
            created.id,
            changes,
            Some(Upload::new("other.png", png_bytes(16, 16))),
        )
        .await;

        assert!(result.is_err());
        let after = std::fs::read(storage.path_of(&created.image)).unwrap();
        assert_eq!(before, after);
        assert!(storage.exists(&thumbnail_path(&created.image)));
    }

    #[tokio::test]
    async fn title_and_price_are_validated() {
        let db = setup_db().await;
        let fixture = seed(&db).await;
        let storage = temp_storage();

        let blank = create_listing(&db, &storage, new_listing(&fixture, "   "), None).await;
        assert!(matches!(blank, Err(ListingError::Empty("title"))));

        let long = create_listing(&db, &storage, new_listing(&fixture, &"a".repeat(101)), None).await;
        assert!(matches!(
            long,
            Err(ListingError::TooLong { field: "title", max: 100 })
        ));

        let mut negative = new_listing(&fixture, "Green Hills");
        negative.price = Decimal::new(-1, 0);
        assert!(matches!(
            create_listing(&db, &storage, negative, None).await,
            Err(ListingError::NegativePrice(_))
        ));
        assert_eq!(Entity::find().count(&db).await.unwrap(), 0);

        let model = create_listing(&db, &storage, new_listing(&fixture, "  Green Hills "), None)
            .await
            .unwrap();
        assert_eq!(model.title, "Green Hills");

        let changes = ListingUpdate {
            price: Some(Decimal::new(-500, 2)),
            ..Default::default()
        };
        assert!(matches!(
            update_listing(&db, &storage, model.id, changes, None).await,
            Err(ListingError::NegativePrice(_))
        ));
        let changes = ListingUpdate {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            update_listing(&db, &storage, model.id, changes, None).await,
            Err(ListingError::Empty("title"))
        ));
    }

    #[tokio::test]
    async fn price_survives_a_database_round_trip() {
        let db = setup_db().await;
        let fixture = seed(&db).await;
        let storage = temp_storage();

        let mut new = new_listing(&fixture, "Green Hills");
        new.price = Decimal::new(150_000_050, 2);
        let model = create_listing(&db, &storage, new, None).await.unwrap();

        let stored = find_by_id(&db, model.id).await.unwrap();
        assert_eq!(stored.price, Decimal::new(150_000_050, 2));
        assert_eq!(stored.get_price(), "1500000.50 RWF");
    }

    #[tokio::test]
    async fn deleting_a_listing_orphans_its_images() {
        let db = setup_db().await;
        let fixture = seed(&db).await;
        let storage = temp_storage();
        let model = create_listing(&db, &storage, new_listing(&fixture, "Green Hills"), None)
            .await
            .unwrap();

        listing_image_service::add_image(&db, &storage, model.id, "Library", None)
            .await
            .unwrap();
        listing_image_service::add_image(&db, &storage, model.id, "Science lab", None)
            .await
            .unwrap();
        listing_to_customer::ActiveModel {
            listing_id: Set(model.id),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        delete_listing(&db, model.id).await.unwrap();

        assert!(matches!(
            find_by_id(&db, model.id).await,
            Err(ListingError::NotFound { .. })
        ));
        let orphans = listing_image::Entity::find()
            .filter(listing_image::Column::ListingId.eq(model.id))
            .all(&db)
            .await
            .unwrap();
        assert_eq!(orphans.len(), 2);
        assert_eq!(orphans[0].get_listing_title(&db).await.unwrap(), None);
        assert_eq!(listing_to_customer::Entity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn address_is_formatted_from_the_location_chain() {
        let db = setup_db().await;
        let fixture = seed(&db).await;
        let storage = temp_storage();

        let mut new = new_listing(&fixture, "Green Hills");
        new.address_id = Some(fixture.address.id);
        let model = create_listing(&db, &storage, new, None).await.unwrap();

        assert_eq!(
            model.get_address(&db).await.unwrap(),
            "KG 7 Ave 12, Kigali, RW"
        );
    }

    #[tokio::test]
    async fn address_fails_without_address_or_state() {
        let db = setup_db().await;
        let fixture = seed(&db).await;
        let storage = temp_storage();

        let model = create_listing(&db, &storage, new_listing(&fixture, "No address"), None)
            .await
            .unwrap();
        assert!(matches!(
            model.get_address(&db).await,
            Err(ListingError::MissingAddress(id)) if id == model.id
        ));

        let stateless = address::ActiveModel {
            street: Set("KN 3 Rd".to_string()),
            hn: Set("4".to_string()),
            zipcode: Set("00000".to_string()),
            city: Set("Kigali".to_string()),
            state_id: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        let mut new = new_listing(&fixture, "Stateless");
        new.address_id = Some(stateless.id);
        let model = create_listing(&db, &storage, new, None).await.unwrap();

        assert!(matches!(
            model.get_address(&db).await,
            Err(ListingError::MissingReference { missing: "state", .. })
        ));
    }

    #[tokio::test]
    async fn coordinates_use_the_full_street_line() {
        let db = setup_db().await;
        let fixture = seed(&db).await;
        let storage = temp_storage();
        let mut new = new_listing(&fixture, "Green Hills");
        new.address_id = Some(fixture.address.id);
        let model = create_listing(&db, &storage, new, None).await.unwrap();

        let mut geocoder = GazetteerGeocoder::new();
        let kigali = Coordinates {
            latitude: -1.9441,
            longitude: 30.0619,
        };
        geocoder.insert("KG 7 Ave 12 00000 Kigali", kigali);

        assert_eq!(model.get_coordinates(&db, &geocoder).await.unwrap(), kigali);

        let empty = GazetteerGeocoder::new();
        assert!(matches!(
            model.get_coordinates(&db, &empty).await,
            Err(ListingError::Geocode(_))
        ));
    }

    #[tokio::test]
    async fn published_listings_are_filtered_and_paged() {
        let db = setup_db().await;
        let fixture = seed(&db).await;
        let storage = temp_storage();

        for title in ["Green Hills", "Riviera High", "Green Valley", "Hidden"] {
            let mut new = new_listing(&fixture, title);
            new.is_published = title != "Hidden";
            if title == "Riviera High" {
                new.listing_for = ListingFor::Rent;
            }
            create_listing(&db, &storage, new, None).await.unwrap();
        }

        let all = find_published(&db, &Filter::new(), 0, 2).await.unwrap();
        assert_eq!(all.total_items, 3);
        assert_eq!(all.total_pages, 2);
        assert_eq!(all.content.len(), 2);
        // newest first
        assert_eq!(all.content[0].title, "Green Valley");

        let second = find_published(&db, &Filter::new(), 1, 2).await.unwrap();
        assert_eq!(second.content.len(), 1);
        assert_eq!(second.content[0].title, "Green Hills");

        let mut filter = Filter::new();
        filter.query = "green".to_string();
        filter.sort_order = SortOrder::CreatedAsc;
        let green = find_published(&db, &filter, 0, 10).await.unwrap();
        let titles: Vec<_> = green.content.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["Green Hills", "Green Valley"]);

        let mut filter = Filter::new();
        filter.query = "Valley + Riviera".to_string();
        assert_eq!(find_published(&db, &filter, 0, 10).await.unwrap().total_items, 2);

        let mut filter = Filter::new();
        filter.listing_for = Some(ListingFor::Rent);
        let rent = find_published(&db, &filter, 0, 10).await.unwrap();
        assert_eq!(rent.content.len(), 1);
        assert_eq!(rent.content[0].title, "Riviera High");
    }

    #[tokio::test]
    async fn summary_resolves_derived_values() {
        let db = setup_db().await;
        let fixture = seed(&db).await;
        let storage = temp_storage();

        let mut new = new_listing(&fixture, "Green Hills");
        new.address_id = Some(fixture.address.id);
        new.bedrooms = 20;
        new.bathrooms = 6;
        new.sqft = 4200.0;
        new.free_from = Some(Local::now().date_naive() + Duration::days(10));
        let model = create_listing(
            &db,
            &storage,
            new,
            Some(Upload::new("main.png", png_bytes(32, 32))),
        )
        .await
        .unwrap();
        listing_image_service::add_image(&db, &storage, model.id, "Dorms", None)
            .await
            .unwrap();

        let formatter = MediaImageFormatter::new("/media/");
        let summary = to_summary(&db, &model, &formatter).await.unwrap();

        assert_eq!(summary.title, "Green Hills");
        assert_eq!(summary.listing_type, "Boarding school");
        assert_eq!(summary.listing_for, "Sell");
        assert_eq!(summary.price, "1500000.00 RWF");
        assert_eq!(summary.total_rooms, 26);
        assert_eq!(summary.sqft, "4200 m²");
        assert_eq!(summary.availability, model.free_from.format("%Y-%m-%d").to_string());
        assert_eq!(summary.address.as_deref(), Some("KG 7 Ave 12, Kigali, RW"));
        assert_eq!(summary.images, 2);
        assert_eq!(summary.files, 0);
        assert_eq!(
            summary.image_url,
            Some(format!("/media/listings/{}.png", model.id))
        );
        assert_eq!(
            summary.headshot_url,
            Some(format!("/media/listings/thumbs/{}.jpg", model.id))
        );
    }
}
