use sea_orm::entity::prelude::*;
use std::fmt;

/// Whether a listing is offered for rent or for sale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, DeriveActiveEnum, EnumIter)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum ListingFor {
    #[sea_orm(string_value = "R")]
    Rent,
    #[sea_orm(string_value = "S")]
    Sell,
}

impl Default for ListingFor {
    fn default() -> Self {
        ListingFor::Sell
    }
}

impl fmt::Display for ListingFor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ListingFor::Rent => t!("listing.for.rent"),
            ListingFor::Sell => t!("listing.for.sell"),
        };
        write!(f, "{}", s)
    }
}
