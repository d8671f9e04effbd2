use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The settings row is a process-wide singleton with a fixed primary key,
/// lazily created with defaults on first read.
pub const SETTINGS_ID: i32 = 1;

/// SeaORM entity for the `app_settings` table (single row).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "app_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub maintenance_mode: bool,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub feature_job_posting: bool,
    pub feature_messaging: bool,
    pub feature_payments: bool,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Features {
    pub job_posting: bool,
    pub messaging: bool,
    pub payments: bool,
}

/// Settings in the nested API shape.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsResponse {
    pub maintenance_mode: bool,
    pub theme: Theme,
    pub features: Features,
    pub updated_at: DateTimeUtc,
}

impl From<Model> for SettingsResponse {
    fn from(m: Model) -> Self {
        Self {
            maintenance_mode: m.maintenance_mode,
            theme: Theme {
                primary_color: m.primary_color,
                secondary_color: m.secondary_color,
                accent_color: m.accent_color,
            },
            features: Features {
                job_posting: m.feature_job_posting,
                messaging: m.feature_messaging,
                payments: m.feature_payments,
            },
            updated_at: m.updated_at,
        }
    }
}

/// Partial update for `PUT /api/maintenance/settings`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSettings {
    pub maintenance_mode: Option<bool>,
    pub theme: Option<ThemeUpdate>,
    pub features: Option<FeaturesUpdate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThemeUpdate {
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeaturesUpdate {
    pub job_posting: Option<bool>,
    pub messaging: Option<bool>,
    pub payments: Option<bool>,
}
