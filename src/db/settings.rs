use sea_orm::*;

use crate::models::settings::{self, SETTINGS_ID, UpdateSettings};

/// Fetch the settings singleton, creating it with defaults on first read.
pub async fn get_or_init(db: &DatabaseConnection) -> Result<settings::Model, DbErr> {
    if let Some(existing) = settings::Entity::find_by_id(SETTINGS_ID).one(db).await? {
        return Ok(existing);
    }

    let defaults = settings::ActiveModel {
        id: Set(SETTINGS_ID),
        maintenance_mode: Set(false),
        primary_color: Set("#000000".to_string()),
        secondary_color: Set("#FFFFFF".to_string()),
        accent_color: Set("#1a1a1a".to_string()),
        feature_job_posting: Set(true),
        feature_messaging: Set(true),
        feature_payments: Set(true),
        updated_at: Set(chrono::Utc::now()),
    };

    defaults.insert(db).await
}

/// Apply a partial update to the singleton, creating it first if needed.
pub async fn update(
    db: &DatabaseConnection,
    input: UpdateSettings,
) -> Result<settings::Model, DbErr> {
    let current = get_or_init(db).await?;
    let mut active: settings::ActiveModel = current.into();

    if let Some(maintenance_mode) = input.maintenance_mode {
        active.maintenance_mode = Set(maintenance_mode);
    }
    if let Some(theme) = input.theme {
        if let Some(primary) = theme.primary_color {
            active.primary_color = Set(primary);
        }
        if let Some(secondary) = theme.secondary_color {
            active.secondary_color = Set(secondary);
        }
        if let Some(accent) = theme.accent_color {
            active.accent_color = Set(accent);
        }
    }
    if let Some(features) = input.features {
        if let Some(job_posting) = features.job_posting {
            active.feature_job_posting = Set(job_posting);
        }
        if let Some(messaging) = features.messaging {
            active.feature_messaging = Set(messaging);
        }
        if let Some(payments) = features.payments {
            active.feature_payments = Set(payments);
        }
    }
    active.updated_at = Set(chrono::Utc::now());

    active.update(db).await
}
