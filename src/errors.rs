use sea_orm::DbErr;
use sea_orm::prelude::Decimal;
use std::io;
use thiserror::Error;

use crate::services::geocoding_service::GeocodeError;

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("database error: {0}")]
    Db(#[from] DbErr),

    #[error("media storage error: {0}")]
    Io(#[from] io::Error),

    #[error("uploaded file is not a readable image: {0}")]
    Image(#[from] image::ImageError),

    #[error("{0}")]
    Geocode(#[from] GeocodeError),

    #[error("listing {0} has no address")]
    MissingAddress(i64),

    #[error("address {address_id} is missing its {missing}")]
    MissingReference {
        address_id: i64,
        missing: &'static str,
    },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{entity} {id} is still referenced by {referenced_by} listing(s)")]
    Protected {
        entity: &'static str,
        id: i64,
        referenced_by: u64,
    },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("price must not be negative, got {0}")]
    NegativePrice(Decimal),

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("a listing type named '{0}' already exists")]
    DuplicateName(String),
}
