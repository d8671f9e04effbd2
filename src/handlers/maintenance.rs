use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::auth::middleware::MaintenanceUser;
use crate::db::error_logs as error_log_db;
use crate::db::jobs as job_db;
use crate::db::orders as order_db;
use crate::db::settings as settings_db;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::orders::{AdminOrderView, Status};
use crate::models::settings::{SettingsResponse, UpdateSettings};
use crate::models::users::Roles;

/// GET /api/maintenance/settings — the settings singleton, created with
/// defaults on first read.
pub async fn get_settings(
    _maint: MaintenanceUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let settings = settings_db::get_or_init(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(SettingsResponse::from(settings)))
}

/// PUT /api/maintenance/settings — partial update of the singleton.
pub async fn update_settings(
    _maint: MaintenanceUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<UpdateSettings>,
) -> Result<HttpResponse, ApiError> {
    let settings = settings_db::update(db.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(SettingsResponse::from(settings)))
}

/// GET /api/maintenance/errors — the 100 most recent error-log entries.
pub async fn get_errors(
    _maint: MaintenanceUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let errors = error_log_db::recent(db.get_ref(), 100).await?;
    Ok(HttpResponse::Ok().json(errors))
}

/// DELETE /api/maintenance/errors — clear the error log.
pub async fn clear_errors(
    _maint: MaintenanceUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    error_log_db::clear(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "All error logs cleared",
    })))
}

#[derive(Debug, Serialize)]
struct StatsResponse {
    total_users: u64,
    total_freelancers: u64,
    total_clients: u64,
    pending_approvals: u64,
    total_jobs: u64,
    total_orders: u64,
    active_orders: u64,
    completed_orders: u64,
    total_revenue: f64,
    recent_errors: u64,
}

/// GET /api/maintenance/stats — platform counters for the dashboard.
/// Soft-deleted accounts are excluded everywhere; revenue sums the price
/// snapshots of completed orders.
pub async fn get_stats(
    _maint: MaintenanceUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let db = db.get_ref();
    let day_ago = chrono::Utc::now() - chrono::Duration::hours(24);

    let stats = StatsResponse {
        total_users: user_db::count_active(db).await?,
        total_freelancers: user_db::count_active_by_type(db, Roles::Freelancer).await?,
        total_clients: user_db::count_active_by_type(db, Roles::Client).await?,
        pending_approvals: user_db::count_pending_approvals(db).await?,
        total_jobs: job_db::count_active(db).await?,
        total_orders: order_db::count_all(db).await?,
        active_orders: order_db::count_by_statuses(db, &[Status::Pending, Status::InProgress])
            .await?,
        completed_orders: order_db::count_by_statuses(db, &[Status::Completed]).await?,
        total_revenue: order_db::completed_revenue(db).await?,
        recent_errors: error_log_db::count_since(db, day_ago).await?,
    };

    Ok(HttpResponse::Ok().json(stats))
}

#[derive(Debug, Serialize)]
struct PaymentStatsResponse {
    total_orders: u64,
    approved_payments: u64,
    pending_payments: u64,
    recent_approvals: Vec<AdminOrderView>,
}

/// GET /api/maintenance/payment-stats — payment-approval counters plus the
/// ten most recent approvals with display fields.
pub async fn payment_stats(
    _maint: MaintenanceUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let db = db.get_ref();

    let recent = order_db::recent_payment_approvals(db, 10).await?;
    let recent_approvals = super::admin::join_order_views(db, recent).await?;

    let stats = PaymentStatsResponse {
        total_orders: order_db::count_all(db).await?,
        approved_payments: order_db::count_payment_approved(db, true).await?,
        pending_payments: order_db::count_payment_approved(db, false).await?,
        recent_approvals,
    };

    Ok(HttpResponse::Ok().json(stats))
}
