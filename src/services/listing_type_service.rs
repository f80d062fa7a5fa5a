use log::{info, warn};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::ListingError;
use crate::models::listing_type::{self, ActiveModel, Entity, Model};

const MAX_NAME_LEN: usize = 100;

fn validate_name(name: &str) -> Result<String, ListingError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ListingError::InvalidName("name must not be empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ListingError::InvalidName(format!(
            "name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(name.to_string())
}

async fn ensure_unique<C>(db: &C, name: &str, except: Option<i64>) -> Result<(), ListingError>
where
    C: ConnectionTrait,
{
    let mut query = Entity::find().filter(listing_type::Column::Name.eq(name));
    if let Some(id) = except {
        query = query.filter(listing_type::Column::Id.ne(id));
    }
    match query.one(db).await? {
        Some(_) => Err(ListingError::DuplicateName(name.to_string())),
        None => Ok(()),
    }
}

pub async fn create<C>(db: &C, name: &str) -> Result<Model, ListingError>
where
    C: ConnectionTrait,
{
    let name = validate_name(name)?;
    ensure_unique(db, &name, None).await?;

    let model = ActiveModel {
        name: Set(name),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created listing type '{}' ({})", model.name, model.id);
    Ok(model)
}

pub async fn rename<C>(db: &C, id: i64, name: &str) -> Result<Model, ListingError>
where
    C: ConnectionTrait,
{
    let name = validate_name(name)?;
    let existing = find_by_id(db, id).await?;
    ensure_unique(db, &name, Some(id)).await?;

    let mut active: ActiveModel = existing.into();
    active.name = Set(name);
    Ok(active.update(db).await?)
}

pub async fn find_by_id<C>(db: &C, id: i64) -> Result<Model, ListingError>
where
    C: ConnectionTrait,
{
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ListingError::NotFound {
            entity: "listing type",
            id,
        })
}

pub async fn find_all<C>(db: &C) -> Result<Vec<Model>, ListingError>
where
    C: ConnectionTrait,
{
    Ok(Entity::find()
        .order_by_asc(listing_type::Column::Name)
        .all(db)
        .await?)
}

/// Refuses while any listing is filed under the type.
pub async fn delete<C>(db: &C, id: i64) -> Result<(), ListingError>
where
    C: ConnectionTrait,
{
    let model = find_by_id(db, id).await?;

    let referenced_by = model.get_nr_listings(db).await?;
    if referenced_by > 0 {
        warn!(
            "Refusing to delete listing type '{}': {} listing(s) still use it",
            model.name, referenced_by
        );
        return Err(ListingError::Protected {
            entity: "listing type",
            id,
            referenced_by,
        });
    }

    Entity::delete_by_id(id).exec(db).await?;
    info!("Deleted listing type '{}' ({})", model.name, id);
    Ok(())
}
