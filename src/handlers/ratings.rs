use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::jobs as job_db;
use crate::db::orders as order_db;
use crate::db::ratings as rating_db;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::PaginationQuery;
use crate::models::orders::Status;
use crate::models::ratings::{
    self, ClientRatingView, FreelancerRatingsPage, RatingEligibility, RatingSummary, RatingView,
    SubmitRating,
};
use crate::models::users;

/// Shared submission flow behind both POST /api/ratings/rate and
/// POST /api/orders/{id}/review.
///
/// Validates the stars range, ownership, completion and the one-rating rule,
/// then hands off to the transactional aggregator in `db::ratings`.
pub(crate) async fn submit_for_order(
    db: &DatabaseConnection,
    client: &users::Model,
    order_id: Uuid,
    stars: i16,
    review: Option<String>,
) -> Result<(ratings::Model, RatingSummary), ApiError> {
    if !(1..=5).contains(&stars) {
        return Err(ApiError::InvalidInput(
            "Rating must be between 1 and 5".to_string(),
        ));
    }

    let order = order_db::get_order_by_id(db, order_id)
        .await?
        .filter(|o| o.client_id == client.id && o.status == Status::Completed);
    let Some(order) = order else {
        return Err(ApiError::NotFound(
            "Order not found or not completed".to_string(),
        ));
    };

    if order.is_rated {
        return Err(ApiError::Conflict("Order already rated".to_string()));
    }

    rating_db::submit(db, order, stars, review)
        .await
        .map_err(ApiError::from)
}

/// POST /api/ratings/rate — a client rates a completed order.
pub async fn rate_freelancer(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<SubmitRating>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();

    let (rating, summary) =
        submit_for_order(db.get_ref(), &user.0, input.order_id, input.rating, input.review).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Rating submitted successfully",
        "rating": rating,
        "averageRating": summary.average,
    })))
}

/// GET /api/ratings/freelancer/{freelancer_id} — public, paginated, newest
/// first, with client and job display fields joined onto each row.
pub async fn get_freelancer_ratings(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    query: web::Query<PaginationQuery>,
) -> Result<HttpResponse, ApiError> {
    let freelancer_id = path.into_inner();

    let Some(freelancer) = user_db::find_by_id(db.get_ref(), freelancer_id).await? else {
        return Err(ApiError::NotFound("Freelancer not found".to_string()));
    };

    let page = query.page();
    let (items, totals) =
        rating_db::page_for_freelancer(db.get_ref(), freelancer_id, page, query.limit()).await?;

    let client_ids: Vec<Uuid> = items.iter().map(|r| r.client_id).collect();
    let job_ids: Vec<Uuid> = items.iter().map(|r| r.job_id).collect();
    let clients: HashMap<Uuid, users::Model> = user_db::find_by_ids(db.get_ref(), client_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();
    let jobs: HashMap<Uuid, String> = job_db::find_by_ids(db.get_ref(), job_ids)
        .await?
        .into_iter()
        .map(|j| (j.id, j.title))
        .collect();

    let views = items
        .into_iter()
        .map(|r| RatingView {
            id: r.id,
            stars: r.stars,
            review: r.review,
            created_at: r.created_at,
            client_name: clients.get(&r.client_id).map(|c| c.name.clone()),
            client_picture: clients
                .get(&r.client_id)
                .and_then(|c| c.profile_picture.clone()),
            job_title: jobs.get(&r.job_id).cloned(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(FreelancerRatingsPage {
        ratings: views,
        total_pages: totals.number_of_pages,
        current_page: page,
        total_ratings: totals.number_of_items,
        average_rating: freelancer.rating,
        rating_breakdown: freelancer.breakdown(),
    }))
}

/// GET /api/ratings/my-ratings — ratings the calling client has submitted.
pub async fn get_my_ratings(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let items = rating_db::list_by_client(db.get_ref(), user.0.id).await?;

    let freelancer_ids: Vec<Uuid> = items.iter().map(|r| r.freelancer_id).collect();
    let job_ids: Vec<Uuid> = items.iter().map(|r| r.job_id).collect();
    let freelancers: HashMap<Uuid, users::Model> =
        user_db::find_by_ids(db.get_ref(), freelancer_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();
    let jobs: HashMap<Uuid, String> = job_db::find_by_ids(db.get_ref(), job_ids)
        .await?
        .into_iter()
        .map(|j| (j.id, j.title))
        .collect();

    let views: Vec<ClientRatingView> = items
        .into_iter()
        .map(|r| ClientRatingView {
            id: r.id,
            stars: r.stars,
            review: r.review,
            created_at: r.created_at,
            freelancer_name: freelancers.get(&r.freelancer_id).map(|f| f.name.clone()),
            freelancer_rating: freelancers.get(&r.freelancer_id).map(|f| f.rating),
            job_title: jobs.get(&r.job_id).cloned(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({ "ratings": views })))
}

/// GET /api/ratings/check/{order_id} — can the calling client still rate
/// this order?
pub async fn check_eligibility(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let order_id = path.into_inner();

    let order = order_db::get_order_by_id(db.get_ref(), order_id)
        .await?
        .filter(|o| o.client_id == user.0.id);
    let Some(order) = order else {
        return Err(ApiError::NotFound("Order not found".to_string()));
    };

    Ok(HttpResponse::Ok().json(RatingEligibility {
        can_rate: order.status == Status::Completed && !order.is_rated,
        is_rated: order.is_rated,
        status: order.status,
    }))
}
