use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::middleware::Next;
use actix_web::{HttpResponse, web};
use sea_orm::{DatabaseConnection, DbErr};
use thiserror::Error;

/// The error taxonomy every handler speaks.
///
/// Each variant maps to one HTTP status and a `{"error": "<message>"}` body.
/// `Database`/`Internal` never leak their cause to the client; the cause goes
/// to the log and, via [`persist_server_errors`], to the `error_logs` table.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthenticated(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InvalidState(String),
    #[error("{0}")]
    Database(#[from] DbErr),
    #[error("{0}")]
    Internal(String),
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidInput(_) | ApiError::Conflict(_) | ApiError::InvalidState(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::Database(e) => {
                tracing::error!("database error: {e}");
                "Something went wrong!".to_string()
            }
            ApiError::Internal(e) => {
                tracing::error!("internal error: {e}");
                "Something went wrong!".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": message,
        }))
    }
}

/// Middleware: whenever a handler answers with a 5xx, persist the failure to
/// the `error_logs` table for later maintenance review. The insert runs on a
/// detached task so the response is never delayed, and a failed insert only
/// warns.
pub async fn persist_server_errors(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let db = req.app_data::<web::Data<DatabaseConnection>>().cloned();
    let route = req.path().to_string();
    let method = req.method().to_string();

    let res = next.call(req).await?;

    if res.status().is_server_error() {
        if let Some(db) = db {
            let message = res
                .response()
                .error()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unhandled server error".to_string());
            actix_web::rt::spawn(async move {
                if let Err(e) =
                    crate::db::error_logs::record(db.get_ref(), &message, &route, &method, None)
                        .await
                {
                    tracing::warn!("failed to persist error log: {e}");
                }
            });
        }
    }

    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    #[test]
    fn taxonomy_maps_to_expected_statuses() {
        assert_eq!(
            ApiError::Unauthenticated("Access denied".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden("no".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound("gone".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::InvalidInput("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict("dup".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidState("nope".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn internal_errors_do_not_leak_their_cause() {
        let res = ApiError::Internal("connection pool exhausted".into()).error_response();
        let body = actix_web::body::to_bytes(res.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Something went wrong!");
    }

    #[actix_web::test]
    async fn domain_errors_carry_their_message() {
        let res = ApiError::Unauthenticated("Access denied".into()).error_response();
        let body = actix_web::body::to_bytes(res.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Access denied");
    }
}
