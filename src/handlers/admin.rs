use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AdminUser;
use crate::db::jobs as job_db;
use crate::db::orders as order_db;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::jobs::AdminJobView;
use crate::models::orders::{self, AdminOrderView};
use crate::models::users::{self, UserResponse};

/// GET /api/admin/users — all non-deleted accounts, newest first. The
/// password hash never leaves the database layer.
pub async fn get_all_users(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let accounts = user_db::list_active(db.get_ref()).await?;
    let response: Vec<UserResponse> = accounts.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// PUT /api/admin/users/{id}/approve — approve a freelancer account.
pub async fn approve_user(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let Some(user) = user_db::approve(db.get_ref(), id).await? else {
        return Err(ApiError::NotFound("User not found".to_string()));
    };

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// DELETE /api/admin/users/{id} — soft-delete an account. The row stays; the
/// account just stops resolving for login and auth.
pub async fn delete_user(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    if user_db::soft_delete(db.get_ref(), id).await?.is_none() {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "User deleted successfully",
    })))
}

/// GET /api/admin/orders — every order with joined display fields.
pub async fn get_all_orders(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let orders = order_db::list_all(db.get_ref()).await?;
    let views = join_order_views(db.get_ref(), orders).await?;
    Ok(HttpResponse::Ok().json(views))
}

/// GET /api/admin/jobs — every job (active or not) with its owner's display
/// fields.
pub async fn get_all_jobs(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let jobs = job_db::list_all(db.get_ref()).await?;

    let owner_ids: Vec<Uuid> = jobs.iter().map(|j| j.freelancer_id).collect();
    let owners: HashMap<Uuid, users::Model> = user_db::find_by_ids(db.get_ref(), owner_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let views: Vec<AdminJobView> = jobs
        .into_iter()
        .map(|job| {
            let owner = owners.get(&job.freelancer_id);
            AdminJobView {
                freelancer_name: owner.map(|o| o.name.clone()),
                freelancer_email: owner.map(|o| o.email.clone()),
                job,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(views))
}

/// Join job title and participant display fields onto a batch of orders.
/// Shared with the maintenance payment dashboard.
pub(crate) async fn join_order_views(
    db: &DatabaseConnection,
    orders: Vec<orders::Model>,
) -> Result<Vec<AdminOrderView>, ApiError> {
    let mut user_ids: Vec<Uuid> = Vec::with_capacity(orders.len() * 2);
    let mut job_ids: Vec<Uuid> = Vec::with_capacity(orders.len());
    for order in &orders {
        user_ids.push(order.client_id);
        user_ids.push(order.freelancer_id);
        job_ids.push(order.job_id);
    }

    let people: HashMap<Uuid, users::Model> = user_db::find_by_ids(db, user_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();
    let jobs: HashMap<Uuid, String> = job_db::find_by_ids(db, job_ids)
        .await?
        .into_iter()
        .map(|j| (j.id, j.title))
        .collect();

    Ok(orders
        .into_iter()
        .map(|order| {
            let client = people.get(&order.client_id);
            let freelancer = people.get(&order.freelancer_id);
            AdminOrderView {
                job_title: jobs.get(&order.job_id).cloned(),
                client_name: client.map(|c| c.name.clone()),
                client_email: client.map(|c| c.email.clone()),
                freelancer_name: freelancer.map(|f| f.name.clone()),
                freelancer_email: freelancer.map(|f| f.email.clone()),
                order,
            }
        })
        .collect())
}
