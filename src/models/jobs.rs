use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `jobs` table.
///
/// `average_rating` is a denormalized copy of the owner's aggregate rating:
/// set from the owner at creation time and refreshed in bulk on every rating
/// submission. `views` and `orders` are counters bumped with atomic column
/// expressions, never read-modify-write.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "jobs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub freelancer_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: Categories,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    /// Promised delivery time in days; orders snapshot it into a delivery date.
    pub delivery_time: i32,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    #[sea_orm(column_type = "Text", nullable)]
    pub requirements: Option<String>,
    pub is_active: bool,
    /// Only the maintenance identity can set this; pinned jobs sort first.
    pub is_pinned: bool,
    pub views: i32,
    pub orders: i32,
    #[sea_orm(column_type = "Double")]
    pub average_rating: f64,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum Categories {
    #[sea_orm(string_value = "web_development")]
    WebDevelopment,
    #[sea_orm(string_value = "mobile_development")]
    MobileDevelopment,
    #[sea_orm(string_value = "data_science")]
    DataScience,
    #[sea_orm(string_value = "design")]
    Design,
    #[sea_orm(string_value = "video_editing")]
    VideoEditing,
    #[sea_orm(string_value = "content_writing")]
    ContentWriting,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::FreelancerId",
        to = "super::users::Column::Id"
    )]
    Freelancer,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Freelancer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateJob {
    pub title: String,
    pub description: String,
    pub category: Categories,
    pub price: f64,
    pub delivery_time: i32,
    pub tags: Option<Vec<String>>,
    pub requirements: Option<String>,
}

/// `is_pinned` is silently dropped for non-maintenance callers.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateJob {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Categories>,
    pub price: Option<f64>,
    pub delivery_time: Option<i32>,
    pub tags: Option<Vec<String>>,
    pub requirements: Option<String>,
    pub is_active: Option<bool>,
    pub is_pinned: Option<bool>,
}

/// Sort keys for the public job listing. Pinned jobs always sort first
/// regardless of the chosen key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Newest,
    PriceLow,
    PriceHigh,
    Popular,
    Rating,
}

/// Query parameters for `GET /api/jobs`.
#[derive(Debug, Clone, Deserialize)]
pub struct JobListQuery {
    pub category: Option<Categories>,
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    pub sort: Option<SortKey>,
}

impl JobListQuery {
    pub fn sort(&self) -> SortKey {
        self.sort.unwrap_or(SortKey::Newest)
    }
}

/// Admin listing row: a job plus its owner's display fields.
#[derive(Debug, Clone, Serialize)]
pub struct AdminJobView {
    #[serde(flatten)]
    pub job: Model,
    pub freelancer_name: Option<String>,
    pub freelancer_email: Option<String>,
}
