use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The `Roles` enum maps to a Postgres TEXT column stored as lowercase strings.
///
/// `Admin` and `Maintenance` accounts are seeded at startup and can never be
/// self-registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum Roles {
    #[sea_orm(string_value = "client")]
    Client,
    #[sea_orm(string_value = "freelancer")]
    Freelancer,
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "maintenance")]
    Maintenance,
}

/// SeaORM entity for the `users` table.
///
/// The aggregate rating columns (`rating`, `total_ratings`, the star buckets)
/// are owned by the recomputation in `db::ratings` and must not be written
/// through profile updates. Accounts are soft-deleted via `is_deleted` and
/// never physically removed.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub user_type: Roles,
    pub profile_picture: Option<String>,
    pub field_of_work: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub profile_description: Option<String>,
    pub ccp: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub skills: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub portfolio: Json,
    pub is_approved: bool,
    pub is_deleted: bool,
    #[sea_orm(column_type = "Double")]
    pub rating: f64,
    pub total_ratings: i32,
    pub five_star: i32,
    pub four_star: i32,
    pub three_star: i32,
    pub two_star: i32,
    pub one_star: i32,
    pub completed_jobs: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::jobs::Entity")]
    Jobs,
}

impl Related<super::jobs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Jobs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Star-bucket counts in the public API shape.
    pub fn breakdown(&self) -> RatingBreakdown {
        RatingBreakdown {
            five_star: self.five_star,
            four_star: self.four_star,
            three_star: self.three_star,
            two_star: self.two_star,
            one_star: self.one_star,
        }
    }
}

// ── DTOs (not stored in DB, used for request/response bodies) ──

/// Used by `POST /api/auth/register`. Only `client` and `freelancer` are
/// accepted as `user_type`; the remaining fields are freelancer profile data.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub user_type: Roles,
    pub name: String,
    pub profile_picture: Option<String>,
    pub field_of_work: Option<String>,
    pub profile_description: Option<String>,
    pub ccp: Option<String>,
    pub skills: Option<Vec<String>>,
    pub portfolio: Option<Vec<String>>,
}

/// Used by `POST /api/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Used by `PUT /api/users/me`. Email, password and the aggregate rating
/// fields cannot be changed through this path.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub profile_picture: Option<String>,
    pub field_of_work: Option<String>,
    pub profile_description: Option<String>,
    pub ccp: Option<String>,
    pub skills: Option<Vec<String>>,
    pub portfolio: Option<Vec<String>>,
}

/// Star-bucket counts for a freelancer. Serialized in camelCase to match the
/// public API contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingBreakdown {
    pub five_star: i32,
    pub four_star: i32,
    pub three_star: i32,
    pub two_star: i32,
    pub one_star: i32,
}

impl RatingBreakdown {
    pub fn total(&self) -> i32 {
        self.five_star + self.four_star + self.three_star + self.two_star + self.one_star
    }
}

/// A safe user representation for API responses (never leaks the password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub user_type: Roles,
    pub profile_picture: Option<String>,
    pub field_of_work: Option<String>,
    pub profile_description: Option<String>,
    pub ccp: Option<String>,
    pub skills: Json,
    pub portfolio: Json,
    pub is_approved: bool,
    pub rating: f64,
    pub total_ratings: i32,
    pub rating_breakdown: RatingBreakdown,
    pub completed_jobs: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

impl From<Model> for UserResponse {
    fn from(m: Model) -> Self {
        let rating_breakdown = m.breakdown();
        Self {
            id: m.id,
            email: m.email,
            name: m.name,
            user_type: m.user_type,
            profile_picture: m.profile_picture,
            field_of_work: m.field_of_work,
            profile_description: m.profile_description,
            ccp: m.ccp,
            skills: m.skills,
            portfolio: m.portfolio,
            is_approved: m.is_approved,
            rating: m.rating,
            total_ratings: m.total_ratings,
            rating_breakdown,
            completed_jobs: m.completed_jobs,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Response body for register and login: `{token, user}`.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}
