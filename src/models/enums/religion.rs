use sea_orm::entity::prelude::*;
use std::fmt;

/// Religious affiliation of a school. `None` is an explicit "no affiliation",
/// distinct from leaving the field blank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, DeriveActiveEnum, EnumIter)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Religion {
    #[sea_orm(string_value = "Catholic")]
    Catholic,
    #[sea_orm(string_value = "Muslim")]
    Muslim,
    #[sea_orm(string_value = "None")]
    None,
}

impl fmt::Display for Religion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Religion::Catholic => t!("listing.religion.catholic"),
            Religion::Muslim => t!("listing.religion.muslim"),
            Religion::None => t!("listing.religion.none"),
        };
        write!(f, "{}", s)
    }
}
