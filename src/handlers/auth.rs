use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::{AuthenticatedUser, JwtSecret};
use crate::auth::{jwt, password};
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::users::{AuthResponse, LoginRequest, RegisterRequest, Roles, UserResponse};

/// POST /api/auth/register — create an account and hand back `{token, user}`.
///
/// Only `client` and `freelancer` can be self-registered; clients are
/// approved immediately, freelancers wait for admin approval.
pub async fn register(
    db: web::Data<DatabaseConnection>,
    secret: web::Data<JwtSecret>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let mut input = body.into_inner();

    if !matches!(input.user_type, Roles::Client | Roles::Freelancer) {
        return Err(ApiError::InvalidInput("Invalid account type".to_string()));
    }

    input.email = input.email.trim().to_lowercase();
    if user_db::email_taken(db.get_ref(), &input.email).await? {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let password_hash = password::hash_password(&input.password).map_err(ApiError::Internal)?;
    let user = user_db::register(db.get_ref(), input, password_hash).await?;

    let token = jwt::issue_token(user.id, &user.email, &secret.0).map_err(ApiError::Internal)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user: UserResponse::from(user),
    }))
}

/// POST /api/auth/login — verify credentials and hand back `{token, user}`.
///
/// Unknown email, deleted account and wrong password all produce the same
/// 401 so the endpoint cannot be used to probe for registered emails.
pub async fn login(
    db: web::Data<DatabaseConnection>,
    secret: web::Data<JwtSecret>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    let email = input.email.trim().to_lowercase();

    let Some(user) = user_db::find_live_by_email(db.get_ref(), &email).await? else {
        return Err(ApiError::Unauthenticated("Invalid credentials".to_string()));
    };

    let valid =
        password::verify_password(&input.password, &user.password_hash).map_err(ApiError::Internal)?;
    if !valid {
        return Err(ApiError::Unauthenticated("Invalid credentials".to_string()));
    }

    let token = jwt::issue_token(user.id, &user.email, &secret.0).map_err(ApiError::Internal)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: UserResponse::from(user),
    }))
}

/// GET /api/auth/me — the authenticated account's own profile.
pub async fn me(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(UserResponse::from(user.0))
}
