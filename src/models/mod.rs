pub mod address;
pub mod country;
pub mod enums;
pub mod filter;
pub mod listing;
pub mod listing_file;
pub mod listing_image;
pub mod listing_to_customer;
pub mod listing_type;
pub mod page;
pub mod realtor;
pub mod state;
