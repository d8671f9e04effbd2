use sea_orm::*;
use uuid::Uuid;

use crate::db::{jobs as job_db, orders as order_db, users as user_db};
use crate::models::orders;
use crate::models::ratings::{self, RatingSummary};

/// Persist a rating for a completed order and propagate the freelancer's
/// recomputed aggregate, all inside one transaction:
///
/// 1. insert the rating row,
/// 2. mark the order rated and mirror the review onto it,
/// 3. recompute the freelancer's mean and star breakdown by re-scanning all
///    of their ratings (never incremental),
/// 4. write the aggregate onto the account and every job they own.
///
/// The caller has already validated the stars range, ownership, completion
/// and the `is_rated` flag. The unique index on `order_id` backs the
/// at-most-one-rating invariant against concurrent submissions.
pub async fn submit(
    db: &DatabaseConnection,
    order: orders::Model,
    stars: i16,
    review: Option<String>,
) -> Result<(ratings::Model, RatingSummary), DbErr> {
    let freelancer_id = order.freelancer_id;
    let txn = db.begin().await?;

    let new_rating = ratings::ActiveModel {
        id: Set(Uuid::new_v4()),
        freelancer_id: Set(freelancer_id),
        client_id: Set(order.client_id),
        order_id: Set(order.id),
        job_id: Set(order.job_id),
        stars: Set(stars),
        review: Set(review.clone()),
        created_at: Set(chrono::Utc::now()),
    };
    let rating = new_rating.insert(&txn).await?;

    order_db::apply_review(&txn, order, stars, review).await?;

    let stars_history: Vec<i16> = ratings::Entity::find()
        .select_only()
        .column(ratings::Column::Stars)
        .filter(ratings::Column::FreelancerId.eq(freelancer_id))
        .into_tuple()
        .all(&txn)
        .await?;
    let summary = RatingSummary::from_stars(&stars_history);

    user_db::apply_rating_summary(&txn, freelancer_id, &summary).await?;
    job_db::refresh_average_rating(&txn, freelancer_id, summary.average).await?;

    txn.commit().await?;
    Ok((rating, summary))
}

/// One page of a freelancer's ratings, newest first, plus the total item and
/// page counts.
pub async fn page_for_freelancer(
    db: &DatabaseConnection,
    freelancer_id: Uuid,
    page: u64,
    limit: u64,
) -> Result<(Vec<ratings::Model>, ItemsAndPagesNumber), DbErr> {
    let paginator = ratings::Entity::find()
        .filter(ratings::Column::FreelancerId.eq(freelancer_id))
        .order_by_desc(ratings::Column::CreatedAt)
        .paginate(db, limit);

    let totals = paginator.num_items_and_pages().await?;
    let items = paginator.fetch_page(page.saturating_sub(1)).await?;

    Ok((items, totals))
}

/// Every rating submitted by one client, newest first.
pub async fn list_by_client(
    db: &DatabaseConnection,
    client_id: Uuid,
) -> Result<Vec<ratings::Model>, DbErr> {
    ratings::Entity::find()
        .filter(ratings::Column::ClientId.eq(client_id))
        .order_by_desc(ratings::Column::CreatedAt)
        .all(db)
        .await
}
