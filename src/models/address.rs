use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "addresses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub street: String,
    /// House number.
    pub hn: String,
    pub zipcode: String,
    pub city: String,
    pub state_id: Option<i64>,
}

impl Model {
    /// Address line handed to the coordinate lookup.
    pub fn geocode_query(&self) -> String {
        format!("{} {} {} {}", self.street, self.hn, self.zipcode, self.city)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::state::Entity",
        from = "Column::StateId",
        to = "super::state::Column::Id",
        on_delete = "SetNull"
    )]
    State,
    #[sea_orm(has_many = "super::listing::Entity")]
    Listing,
}

impl Related<super::state::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::State.def()
    }
}

impl Related<super::listing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Listing.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
