pub mod listing_for;
pub mod religion;
pub mod school_level;

pub use listing_for::ListingFor;
pub use religion::Religion;
pub use school_level::SchoolLevel;
