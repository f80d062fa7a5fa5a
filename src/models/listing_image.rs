use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::services::image_format_service::ImageFormatter;

/// Gallery image attached to a listing. Rows outlive their listing: nothing
/// removes them when the listing is deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "listing_images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub listing_id: i64,
    pub image: Option<String>,
    pub short_description: String,
    pub created: DateTime,
}

impl Model {
    pub fn get_image(&self, formatter: &dyn ImageFormatter) -> Option<String> {
        self.image.as_deref().and_then(|image| formatter.format(image))
    }

    pub fn headshot_image(&self, formatter: &dyn ImageFormatter) -> Option<String> {
        self.image.as_deref().and_then(|image| formatter.headshot(image))
    }

    /// Title of the owning listing, `None` once the listing is gone.
    pub async fn get_listing_title<C>(&self, db: &C) -> Result<Option<String>, DbErr>
    where
        C: ConnectionTrait,
    {
        Ok(self
            .find_related(super::listing::Entity)
            .one(db)
            .await?
            .map(|listing| listing.title))
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::listing::Entity",
        from = "Column::ListingId",
        to = "super::listing::Column::Id",
        on_delete = "NoAction"
    )]
    Listing,
}

impl Related<super::listing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Listing.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert {
            self.created = Set(chrono::Local::now().naive_local());
        }
        Ok(self)
    }
}
