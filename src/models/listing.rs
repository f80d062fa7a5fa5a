use chrono::{Local, NaiveDate};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use std::fmt;

use crate::errors::ListingError;
use crate::models::enums::{ListingFor, Religion, SchoolLevel};
use crate::models::{address, country, state};
use crate::services::geocoding_service::{Coordinates, Geocoder};
use crate::services::image_format_service::ImageFormatter;

/// Currency every fee is quoted in.
pub const CURRENCY_SUFFIX: &str = "RWF";
/// Unit campus sizes are recorded in.
pub const AREA_UNIT: &str = "m²";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "listings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub listing_type_id: i64,
    pub realtor_id: i64,
    pub title: String,
    pub address_id: Option<i64>,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Tuition or fee estimate.
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub price: Decimal,
    pub school_level: Option<SchoolLevel>,
    pub religion: Option<Religion>,
    pub is_boarding: bool,
    pub languages_offered: String,
    #[sea_orm(column_type = "Text")]
    pub facilities: String,
    /// Dorm rooms.
    pub bedrooms: u32,
    pub bathrooms: u32,
    /// Parking capacity.
    pub garage: i32,
    /// Campus size in square metres.
    pub sqft: f64,
    pub lot_size: f64,
    /// Media-relative path of the main image, empty when none was uploaded.
    pub image: String,
    pub listing_for: ListingFor,
    /// Heritage site.
    pub protected: bool,
    pub is_published: bool,
    pub free_from: Date,
    pub created: Option<DateTime>,
    pub updated: Option<DateTime>,
}

/// When a school starts accepting applications.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Availability {
    Immediately,
    From(NaiveDate),
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Immediately => write!(f, "{}", t!("listing.immediately")),
            Availability::From(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// Derived values shown as columns next to a listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accessor {
    TotalRooms,
    Address,
    Price,
    Sqft,
    Image,
    Headshot,
    Images,
    Files,
}

impl Accessor {
    pub fn short_description(&self) -> String {
        let label = match self {
            Accessor::TotalRooms => t!("listing.label.total_rooms"),
            Accessor::Address => t!("listing.label.address"),
            Accessor::Price => t!("listing.label.price"),
            Accessor::Sqft => t!("listing.label.sqft"),
            Accessor::Image => t!("listing.label.image"),
            Accessor::Headshot => t!("listing.label.headshot"),
            Accessor::Images => t!("listing.label.images"),
            Accessor::Files => t!("listing.label.files"),
        };
        label.to_string()
    }
}

/// "{street} {hn}, {city}, {country shortcut}"
pub fn format_address(address: &address::Model, country: &country::Model) -> String {
    format!(
        "{} {}, {}, {}",
        address.street, address.hn, address.city, country.shortcut
    )
}

impl Model {
    pub fn free_date(&self) -> Availability {
        self.free_date_on(Local::now().date_naive())
    }

    pub fn free_date_on(&self, today: NaiveDate) -> Availability {
        if self.free_from <= today {
            Availability::Immediately
        } else {
            Availability::From(self.free_from)
        }
    }

    pub fn get_total_rooms(&self) -> u64 {
        u64::from(self.bedrooms) + u64::from(self.bathrooms)
    }

    pub fn get_price(&self) -> String {
        format!("{:.2} {}", self.price, CURRENCY_SUFFIX)
    }

    pub fn get_sqft(&self) -> String {
        format!("{} {}", self.sqft, AREA_UNIT)
    }

    pub fn has_image(&self) -> bool {
        !self.image.trim().is_empty()
    }

    pub fn get_image(&self, formatter: &dyn ImageFormatter) -> Option<String> {
        formatter.format(&self.image)
    }

    pub fn headshot_image(&self, formatter: &dyn ImageFormatter) -> Option<String> {
        formatter.headshot(&self.image)
    }

    /// Total image count given the number of attached gallery rows; the main
    /// image counts as one more when present.
    pub fn count_images(&self, attached: u64) -> u64 {
        if self.has_image() { attached + 1 } else { attached }
    }

    pub async fn get_images<C>(&self, db: &C) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let attached = self.find_related(super::listing_image::Entity).count(db).await?;
        Ok(self.count_images(attached))
    }

    pub async fn get_nr_files<C>(&self, db: &C) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        self.find_related(super::listing_file::Entity).count(db).await
    }

    async fn load_address<C>(&self, db: &C) -> Result<address::Model, ListingError>
    where
        C: ConnectionTrait,
    {
        self.find_related(address::Entity)
            .one(db)
            .await?
            .ok_or(ListingError::MissingAddress(self.id))
    }

    /// Fails when the address, its state or the state's country is missing.
    pub async fn get_address<C>(&self, db: &C) -> Result<String, ListingError>
    where
        C: ConnectionTrait,
    {
        let address = self.load_address(db).await?;

        let state = address
            .find_related(state::Entity)
            .one(db)
            .await?
            .ok_or(ListingError::MissingReference {
                address_id: address.id,
                missing: "state",
            })?;

        let country = state
            .find_related(country::Entity)
            .one(db)
            .await?
            .ok_or(ListingError::MissingReference {
                address_id: address.id,
                missing: "country",
            })?;

        Ok(format_address(&address, &country))
    }

    pub async fn get_coordinates<C>(
        &self,
        db: &C,
        geocoder: &dyn Geocoder,
    ) -> Result<Coordinates, ListingError>
    where
        C: ConnectionTrait,
    {
        let address = self.load_address(db).await?;
        Ok(geocoder.lookup(&address.geocode_query())?)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::listing_type::Entity",
        from = "Column::ListingTypeId",
        to = "super::listing_type::Column::Id",
        on_delete = "Restrict"
    )]
    ListingType,
    #[sea_orm(
        belongs_to = "super::realtor::Entity",
        from = "Column::RealtorId",
        to = "super::realtor::Column::Id"
    )]
    Realtor,
    #[sea_orm(
        belongs_to = "super::address::Entity",
        from = "Column::AddressId",
        to = "super::address::Column::Id",
        on_delete = "Restrict"
    )]
    Address,
    #[sea_orm(has_many = "super::listing_image::Entity")]
    ListingImage,
    #[sea_orm(has_many = "super::listing_file::Entity")]
    ListingFile,
    #[sea_orm(has_many = "super::listing_to_customer::Entity")]
    ListingToCustomer,
}

impl Related<super::listing_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ListingType.def()
    }
}

impl Related<super::realtor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Realtor.def()
    }
}

impl Related<super::address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Address.def()
    }
}

impl Related<super::listing_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ListingImage.def()
    }
}

impl Related<super::listing_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ListingFile.def()
    }
}

impl Related<super::listing_to_customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ListingToCustomer.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Local::now().naive_local();
        if insert {
            self.created = Set(Some(now));
            if self.free_from.is_not_set() {
                self.free_from = Set(now.date());
            }
        }
        self.updated = Set(Some(now));
        Ok(self)
    }
}
