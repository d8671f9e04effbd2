use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::jobs as job_db;
use crate::error::ApiError;
use crate::models::jobs::{CreateJob, JobListQuery, UpdateJob};
use crate::models::users::Roles;

/// POST /api/jobs — post a new job.
///
/// Only approved freelancers may post; the maintenance identity may also
/// post, and its jobs are auto-pinned.
pub async fn create_job(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateJob>,
) -> Result<HttpResponse, ApiError> {
    let is_maintenance = user.0.user_type == Roles::Maintenance;

    if user.0.user_type != Roles::Freelancer && !is_maintenance {
        return Err(ApiError::Forbidden(
            "Only freelancers can create jobs".to_string(),
        ));
    }
    if !user.0.is_approved && !is_maintenance {
        return Err(ApiError::Forbidden(
            "Your account needs admin approval to post jobs".to_string(),
        ));
    }

    let job = job_db::insert_job(db.get_ref(), body.into_inner(), &user.0).await?;
    Ok(HttpResponse::Created().json(job))
}

/// GET /api/jobs — public listing with filters and sorting.
pub async fn get_jobs(
    db: web::Data<DatabaseConnection>,
    query: web::Query<JobListQuery>,
) -> Result<HttpResponse, ApiError> {
    let jobs = job_db::list_jobs(db.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(jobs))
}

/// GET /api/jobs/categories/list — distinct categories of active jobs.
pub async fn get_categories(
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let categories = job_db::distinct_categories(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(categories))
}

/// GET /api/jobs/{id} — public detail view. Every read bumps the view
/// counter.
pub async fn get_job(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let Some(mut job) = job_db::get_job_by_id(db.get_ref(), id).await? else {
        return Err(ApiError::NotFound("Job not found".to_string()));
    };

    job_db::record_view(db.get_ref(), id).await?;
    job.views += 1;

    Ok(HttpResponse::Ok().json(job))
}

/// PUT /api/jobs/{id} — owner or maintenance only. A missing job and a job
/// owned by someone else are both reported as the same 404 so callers cannot
/// probe other freelancers' inventory. Non-maintenance callers cannot pin.
pub async fn update_job(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateJob>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let is_maintenance = user.0.user_type == Roles::Maintenance;

    let job = job_db::get_job_by_id(db.get_ref(), id)
        .await?
        .filter(|j| is_maintenance || j.freelancer_id == user.0.id);
    let Some(job) = job else {
        return Err(ApiError::NotFound(
            "Job not found or unauthorized".to_string(),
        ));
    };

    let updated = job_db::update_job(db.get_ref(), job, body.into_inner(), is_maintenance).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/jobs/{id} — owner or maintenance only, same 404 policy as
/// update.
pub async fn delete_job(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let is_maintenance = user.0.user_type == Roles::Maintenance;

    let job = job_db::get_job_by_id(db.get_ref(), id)
        .await?
        .filter(|j| is_maintenance || j.freelancer_id == user.0.id);
    if job.is_none() {
        return Err(ApiError::NotFound(
            "Job not found or unauthorized".to_string(),
        ));
    }

    job_db::delete_job(db.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Job deleted successfully",
    })))
}

/// GET /api/jobs/freelancer/{freelancer_id} — a freelancer's active jobs.
pub async fn get_freelancer_jobs(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let freelancer_id = path.into_inner();
    let jobs = job_db::list_by_freelancer(db.get_ref(), freelancer_id).await?;
    Ok(HttpResponse::Ok().json(jobs))
}
