#[macro_use]
extern crate rust_i18n;

pub mod config;
pub mod dtos;
pub mod errors;
pub mod models;
pub mod services;
pub mod utils;

i18n!("locales", fallback = "en");

pub use errors::ListingError;
