use crate::models::enums::ListingFor;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SortOrder {
    CreatedAsc,
    CreatedDesc,
}

/// Criteria for browsing published listings.
#[derive(Clone, Debug)]
pub struct Filter {
    /// Matched against the title; `+` separates alternatives.
    pub query: String,
    pub listing_for: Option<ListingFor>,
    pub listing_type_id: Option<i64>,
    pub sort_order: SortOrder,
}

impl Filter {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            listing_for: None,
            listing_type_id: None,
            sort_order: SortOrder::CreatedDesc,
        }
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::new()
    }
}
