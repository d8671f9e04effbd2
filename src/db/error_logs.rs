use sea_orm::*;
use uuid::Uuid;

use crate::models::error_logs;

/// Persist one server-error occurrence for later maintenance review.
pub async fn record(
    db: &DatabaseConnection,
    message: &str,
    route: &str,
    method: &str,
    user_email: Option<String>,
) -> Result<error_logs::Model, DbErr> {
    let entry = error_logs::ActiveModel {
        id: Set(Uuid::new_v4()),
        message: Set(message.to_string()),
        route: Set(route.to_string()),
        method: Set(method.to_string()),
        user_email: Set(user_email),
        created_at: Set(chrono::Utc::now()),
    };

    entry.insert(db).await
}

/// The most recent log entries, newest first.
pub async fn recent(
    db: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<error_logs::Model>, DbErr> {
    error_logs::Entity::find()
        .order_by_desc(error_logs::Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await
}

/// Clear the whole log.
pub async fn clear(db: &DatabaseConnection) -> Result<DeleteResult, DbErr> {
    error_logs::Entity::delete_many().exec(db).await
}

/// How many errors were recorded at or after `cutoff`.
pub async fn count_since(
    db: &DatabaseConnection,
    cutoff: chrono::DateTime<chrono::Utc>,
) -> Result<u64, DbErr> {
    error_logs::Entity::find()
        .filter(error_logs::Column::CreatedAt.gte(cutoff))
        .count(db)
        .await
}
