use sea_orm::entity::prelude::*;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, DeriveActiveEnum, EnumIter)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum SchoolLevel {
    #[sea_orm(string_value = "Primary")]
    Primary,
    #[sea_orm(string_value = "Secondary")]
    Secondary,
    #[sea_orm(string_value = "High")]
    High,
}

impl fmt::Display for SchoolLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SchoolLevel::Primary => t!("listing.level.primary"),
            SchoolLevel::Secondary => t!("listing.level.secondary"),
            SchoolLevel::High => t!("listing.level.high"),
        };
        write!(f, "{}", s)
    }
}
