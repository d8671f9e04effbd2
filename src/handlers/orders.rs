use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::jobs as job_db;
use crate::db::orders as order_db;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::order_messages::SendMessage;
use crate::models::orders::{
    CreateOrder, OrderWithMessages, ReviewRequest, Status, UpdateOrderStatus,
};
use crate::models::users::Roles;

/// POST /api/orders — a client places an order on a job.
///
/// The job price is snapshotted into the order and the delivery date is
/// computed from the job's promised delivery time; the job's order counter
/// is bumped.
pub async fn create_order(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateOrder>,
) -> Result<HttpResponse, ApiError> {
    if user.0.user_type != Roles::Client {
        return Err(ApiError::Forbidden(
            "Only clients can create orders".to_string(),
        ));
    }

    let input = body.into_inner();
    let Some(job) = job_db::get_job_by_id(db.get_ref(), input.job_id).await? else {
        return Err(ApiError::NotFound("Job not found".to_string()));
    };

    let order = order_db::insert_order(db.get_ref(), &job, user.0.id, input.requirements).await?;
    job_db::increment_orders(db.get_ref(), job.id).await?;

    Ok(HttpResponse::Created().json(order))
}

/// GET /api/orders/my — orders the caller participates in, newest first.
pub async fn get_my_orders(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let orders = order_db::list_for_user(db.get_ref(), &user.0).await?;
    Ok(HttpResponse::Ok().json(orders))
}

/// GET /api/orders/{id} — a single order with its message thread.
/// Participants only.
pub async fn get_order(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let Some(order) = order_db::get_order_by_id(db.get_ref(), id).await? else {
        return Err(ApiError::NotFound("Order not found".to_string()));
    };
    if !order.is_participant(user.0.id) {
        return Err(ApiError::Forbidden(
            "Unauthorized to view this order".to_string(),
        ));
    }

    let messages = order_db::get_messages(db.get_ref(), order.id).await?;
    Ok(HttpResponse::Ok().json(OrderWithMessages { order, messages }))
}

/// PUT /api/orders/{id}/status — advance the order lifecycle.
///
/// Either participant may move the order, but only along the transition
/// table; anything else is rejected. Reaching `completed` bumps the
/// freelancer's completed-jobs counter.
pub async fn update_status(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateOrderStatus>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let next = body.into_inner().status;

    let Some(order) = order_db::get_order_by_id(db.get_ref(), id).await? else {
        return Err(ApiError::NotFound("Order not found".to_string()));
    };
    if !order.is_participant(user.0.id) {
        return Err(ApiError::Forbidden("Unauthorized".to_string()));
    }

    if !order.status.can_transition_to(next) {
        return Err(ApiError::InvalidState(format!(
            "Cannot change status from {} to {}",
            order.status.as_str(),
            next.as_str()
        )));
    }

    let freelancer_id = order.freelancer_id;
    let updated = order_db::set_status(db.get_ref(), order, next).await?;

    if next == Status::Completed {
        user_db::increment_completed_jobs(db.get_ref(), freelancer_id).await?;
    }

    Ok(HttpResponse::Ok().json(updated))
}

/// POST /api/orders/{id}/message — append to the order's message thread.
/// Participants only.
pub async fn send_message(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<SendMessage>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let Some(order) = order_db::get_order_by_id(db.get_ref(), id).await? else {
        return Err(ApiError::NotFound("Order not found".to_string()));
    };
    if !order.is_participant(user.0.id) {
        return Err(ApiError::Forbidden("Unauthorized".to_string()));
    }

    let message =
        order_db::append_message(db.get_ref(), &order, &user.0, body.into_inner().message).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Message sent",
        "new_message": message,
    })))
}

/// POST /api/orders/{id}/approve-payment — freelancer releases payment.
/// One-way: a second call is rejected and the flag stays set.
pub async fn approve_payment(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let Some(order) = order_db::get_order_by_id(db.get_ref(), id).await? else {
        return Err(ApiError::NotFound("Order not found".to_string()));
    };
    if order.freelancer_id != user.0.id {
        return Err(ApiError::Forbidden(
            "Only freelancer can approve payment".to_string(),
        ));
    }
    if order.payment_approved {
        return Err(ApiError::InvalidState(
            "Payment already approved".to_string(),
        ));
    }

    let order = order_db::approve_payment(db.get_ref(), order).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Payment approved successfully",
        "order": order,
    })))
}

/// POST /api/orders/{id}/review — rate the completed order.
///
/// Same flow as POST /api/ratings/rate; there is exactly one aggregator.
pub async fn add_review(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<ReviewRequest>,
) -> Result<HttpResponse, ApiError> {
    let order_id = path.into_inner();
    let input = body.into_inner();

    let (rating, summary) =
        super::ratings::submit_for_order(db.get_ref(), &user.0, order_id, input.rating, input.comment)
            .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Rating submitted successfully",
        "rating": rating,
        "averageRating": summary.average,
    })))
}
