use log::{info, warn};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::dtos::listing_dto::Upload;
use crate::errors::ListingError;
use crate::models::listing_image::{self, ActiveModel, Entity, Model};
use crate::services::listing_service;
use crate::services::media_service::{MediaStorage, listing_dir_path};

const MAX_DESCRIPTION_LEN: usize = 255;

/// Attaches a gallery image to a listing. The upload is stored before the row
/// exists, so it is given a random name.
pub async fn add_image<C>(
    db: &C,
    storage: &MediaStorage,
    listing_id: i64,
    short_description: &str,
    image: Option<Upload>,
) -> Result<Model, ListingError>
where
    C: ConnectionTrait,
{
    let short_description = short_description.trim().to_string();
    if short_description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ListingError::TooLong {
            field: "short description",
            max: MAX_DESCRIPTION_LEN,
        });
    }

    listing_service::find_by_id(db, listing_id).await?;

    let path = match image {
        Some(upload) => {
            let path = listing_dir_path(None, &upload.filename);
            storage.save_image(&path, &upload.bytes)?;
            Some(path)
        }
        None => None,
    };

    let inserted = ActiveModel {
        listing_id: Set(listing_id),
        image: Set(path.clone()),
        short_description: Set(short_description),
        ..Default::default()
    }
    .insert(db)
    .await;

    match inserted {
        Ok(model) => {
            info!("Added image {} to listing {}", model.id, listing_id);
            Ok(model)
        }
        Err(e) => {
            if let Some(path) = path {
                if let Err(cleanup) = storage.delete(&path) {
                    warn!("Could not remove {} after failed insert: {}", path, cleanup);
                }
            }
            Err(e.into())
        }
    }
}

pub async fn list_images<C>(db: &C, listing_id: i64) -> Result<Vec<Model>, ListingError>
where
    C: ConnectionTrait,
{
    Ok(Entity::find()
        .filter(listing_image::Column::ListingId.eq(listing_id))
        .order_by_asc(listing_image::Column::Created)
        .order_by_asc(listing_image::Column::Id)
        .all(db)
        .await?)
}

/// Removes the row and its stored file.
pub async fn delete_image<C>(db: &C, storage: &MediaStorage, id: i64) -> Result<(), ListingError>
where
    C: ConnectionTrait,
{
    let model = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ListingError::NotFound {
            entity: "listing image",
            id,
        })?;

    Entity::delete_by_id(id).exec(db).await?;

    if let Some(path) = model.image.as_deref() {
        storage.delete(path)?;
    }
    info!("Deleted image {} of listing {}", id, model.listing_id);
    Ok(())
}
