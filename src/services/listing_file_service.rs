use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::dtos::listing_dto::Upload;
use crate::errors::ListingError;
use crate::models::listing_file::{self, ActiveModel, Entity, Model};
use crate::services::listing_service;
use crate::services::media_service::{MediaStorage, listing_file_path};

pub async fn attach_file<C>(
    db: &C,
    storage: &MediaStorage,
    listing_id: i64,
    description: &str,
    upload: Upload,
) -> Result<Model, ListingError>
where
    C: ConnectionTrait,
{
    listing_service::find_by_id(db, listing_id).await?;

    let path = listing_file_path(&upload.filename);
    storage.save_file(&path, &upload.bytes)?;

    let model = ActiveModel {
        listing_id: Set(listing_id),
        file: Set(path),
        description: Set(description.trim().to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Attached file {} to listing {}", model.file, listing_id);
    Ok(model)
}

pub async fn list_files<C>(db: &C, listing_id: i64) -> Result<Vec<Model>, ListingError>
where
    C: ConnectionTrait,
{
    Ok(Entity::find()
        .filter(listing_file::Column::ListingId.eq(listing_id))
        .order_by_asc(listing_file::Column::Id)
        .all(db)
        .await?)
}
