use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub storage: Option<i64>,
    pub ram: Option<i64>,
    pub screen_size: Option<String>,
    pub camera: Option<String>,
    pub processor: Option<String>,
    pub battery: Option<i64>,
    pub price: Option<f64>,
    pub color: Option<String>,
    pub availability: Option<String>,
    pub rating: Option<f64>,
    pub reviews: Option<i64>,
    pub image_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
