use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::users::{UpdateProfile, UserResponse};

/// GET /api/users/me — own profile.
pub async fn get_profile(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(UserResponse::from(user.0))
}

/// PUT /api/users/me — update own profile. Email, password and the aggregate
/// rating fields are not writable here.
pub async fn update_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<UpdateProfile>,
) -> Result<HttpResponse, ApiError> {
    let updated = user_db::update_profile(db.get_ref(), user.0, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

/// GET /api/users/freelancer/{id} — public profile of an approved freelancer.
pub async fn get_freelancer(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let Some(freelancer) = user_db::find_public_freelancer(db.get_ref(), id).await? else {
        return Err(ApiError::NotFound("Freelancer not found".to_string()));
    };

    Ok(HttpResponse::Ok().json(UserResponse::from(freelancer)))
}
