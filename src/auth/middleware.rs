use actix_web::FromRequest;
use actix_web::{Error, HttpRequest, dev::Payload, web};
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::pin::Pin;

use crate::auth::jwt;
use crate::db::users::find_live_by_id;
use crate::error::ApiError;
use crate::models::users::{self, Roles};

/// Wrapper type to store the JWT signing secret in Actix app data.
#[derive(Clone)]
pub struct JwtSecret(pub String);

/// Extractor: the bearer credential resolved to a live, non-deleted account.
///
/// Fails with 401 for a missing/invalid token and for tokens whose account no
/// longer exists or has been soft-deleted.
pub struct AuthenticatedUser(pub users::Model);

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // 1. Extract the Bearer token from the Authorization header.
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| ApiError::Unauthenticated("Access denied".to_string()))?;

            let token = auth_header
                .strip_prefix("Bearer ")
                .ok_or_else(|| ApiError::Unauthenticated("Access denied".to_string()))?;

            // 2. Get the signing secret from app data and validate the token.
            let secret = req
                .app_data::<web::Data<JwtSecret>>()
                .ok_or_else(|| ApiError::Internal("JWT secret not configured".to_string()))?;

            let claims = jwt::validate_token(token, &secret.0)
                .map_err(|_| ApiError::Unauthenticated("Invalid token".to_string()))?;

            let user_id = claims
                .user_id()
                .map_err(|_| ApiError::Unauthenticated("Invalid token".to_string()))?;

            // 3. Resolve the claim to a live account.
            let db = req
                .app_data::<web::Data<DatabaseConnection>>()
                .ok_or_else(|| ApiError::Internal("Database not configured".to_string()))?;

            let user = find_live_by_id(db.get_ref(), user_id)
                .await
                .map_err(ApiError::Database)?
                .ok_or_else(|| ApiError::Unauthenticated("Access denied".to_string()))?;

            Ok(AuthenticatedUser(user))
        })
    }
}

/// Extractor: an authenticated account holding the `admin` role.
pub struct AdminUser(pub users::Model);

impl FromRequest for AdminUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let inner = AuthenticatedUser::from_request(req, payload);

        Box::pin(async move {
            let user = inner.await?.0;
            if user.user_type != Roles::Admin {
                return Err(ApiError::Forbidden("Admin access required".to_string()).into());
            }
            Ok(AdminUser(user))
        })
    }
}

/// Extractor: an authenticated account holding the `maintenance` role.
///
/// The role column is the single source of truth; there is no email
/// allow-list fallback.
pub struct MaintenanceUser(pub users::Model);

impl FromRequest for MaintenanceUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let inner = AuthenticatedUser::from_request(req, payload);

        Box::pin(async move {
            let user = inner.await?.0;
            if user.user_type != Roles::Maintenance {
                return Err(ApiError::Forbidden("Maintenance access required".to_string()).into());
            }
            Ok(MaintenanceUser(user))
        })
    }
}
