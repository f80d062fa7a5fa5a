pub mod connection_db;
pub mod database_service;
pub mod geocoding_service;
pub mod image_format_service;
pub mod listing_file_service;
pub mod listing_image_service;
pub mod listing_service;
pub mod listing_type_service;
pub mod logger_service;
pub mod media_service;
pub mod thumbnail_service;

#[cfg(test)]
pub(crate) mod test_support;
