use chrono::NaiveDate;
use sea_orm::prelude::Decimal;

use crate::models::enums::{ListingFor, Religion, SchoolLevel};

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(filename: &str, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.to_string(),
            bytes,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewListing {
    pub listing_type_id: i64,
    pub realtor_id: i64,
    pub address_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub school_level: Option<SchoolLevel>,
    pub religion: Option<Religion>,
    pub is_boarding: bool,
    pub languages_offered: String,
    pub facilities: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub garage: i32,
    pub sqft: f64,
    pub lot_size: f64,
    pub listing_for: ListingFor,
    pub protected: bool,
    pub is_published: bool,
    /// Defaults to the creation date.
    pub free_from: Option<NaiveDate>,
}

impl NewListing {
    pub fn new(listing_type_id: i64, realtor_id: i64, title: &str, price: Decimal) -> Self {
        Self {
            listing_type_id,
            realtor_id,
            address_id: None,
            title: title.to_string(),
            description: String::new(),
            price,
            school_level: None,
            religion: None,
            is_boarding: false,
            languages_offered: String::new(),
            facilities: String::new(),
            bedrooms: 0,
            bathrooms: 0,
            garage: 0,
            sqft: 0.0,
            lot_size: 0.0,
            listing_for: ListingFor::default(),
            protected: false,
            is_published: true,
            free_from: None,
        }
    }
}

/// Partial edit of a listing; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ListingUpdate {
    pub listing_type_id: Option<i64>,
    pub address_id: Option<Option<i64>>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub school_level: Option<Option<SchoolLevel>>,
    pub religion: Option<Option<Religion>>,
    pub is_boarding: Option<bool>,
    pub languages_offered: Option<String>,
    pub facilities: Option<String>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub garage: Option<i32>,
    pub sqft: Option<f64>,
    pub lot_size: Option<f64>,
    pub listing_for: Option<ListingFor>,
    pub protected: Option<bool>,
    pub is_published: Option<bool>,
    pub free_from: Option<NaiveDate>,
}

/// A listing with its derived display values resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSummary {
    pub id: i64,
    pub title: String,
    pub listing_type: String,
    pub listing_for: String,
    pub price: String,
    pub total_rooms: u64,
    pub sqft: String,
    pub availability: String,
    /// `None` when the address chain is incomplete.
    pub address: Option<String>,
    pub images: u64,
    pub files: u64,
    pub image_url: Option<String>,
    pub headshot_url: Option<String>,
}
