use sea_orm::prelude::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::order_messages;
use crate::models::orders::{self, Status};
use crate::models::{jobs, users};

/// Insert a new order for `client` against `job`.
///
/// The job price is snapshotted here and never changes afterwards; the
/// delivery date is creation time plus the job's promised delivery days.
pub async fn insert_order(
    db: &DatabaseConnection,
    job: &jobs::Model,
    client_id: Uuid,
    requirements: Option<String>,
) -> Result<orders::Model, DbErr> {
    let now = chrono::Utc::now();

    let new_order = orders::ActiveModel {
        id: Set(Uuid::new_v4()),
        job_id: Set(job.id),
        client_id: Set(client_id),
        freelancer_id: Set(job.freelancer_id),
        status: Set(Status::Pending),
        price: Set(job.price),
        requirements: Set(requirements),
        delivery_date: Set(now + chrono::Duration::days(i64::from(job.delivery_time))),
        is_rated: Set(false),
        payment_approved: Set(false),
        payment_approved_at: Set(None),
        review_rating: Set(None),
        review_comment: Set(None),
        review_created_at: Set(None),
        created_at: Set(now),
        updated_at: Set(None),
    };

    new_order.insert(db).await
}

/// Fetch a single order by ID.
pub async fn get_order_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<orders::Model>, DbErr> {
    orders::Entity::find_by_id(id).one(db).await
}

/// Orders relevant to the caller: clients see orders they placed, everyone
/// else sees orders where they are the freelancer. Newest first.
pub async fn list_for_user(
    db: &DatabaseConnection,
    user: &users::Model,
) -> Result<Vec<orders::Model>, DbErr> {
    let filter = if user.user_type == users::Roles::Client {
        orders::Column::ClientId.eq(user.id)
    } else {
        orders::Column::FreelancerId.eq(user.id)
    };

    orders::Entity::find()
        .filter(filter)
        .order_by_desc(orders::Column::CreatedAt)
        .all(db)
        .await
}

/// Write an already-validated status transition.
pub async fn set_status(
    db: &DatabaseConnection,
    order: orders::Model,
    status: Status,
) -> Result<orders::Model, DbErr> {
    let mut active: orders::ActiveModel = order.into();
    active.status = Set(status);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Append to an order's message thread with a server-assigned timestamp and
/// the sender's name denormalized at append time.
pub async fn append_message(
    db: &DatabaseConnection,
    order: &orders::Model,
    sender: &users::Model,
    text: String,
) -> Result<order_messages::Model, DbErr> {
    let message = order_messages::ActiveModel {
        id: Set(Uuid::new_v4()),
        order_id: Set(order.id),
        sender_id: Set(sender.id),
        sender_name: Set(sender.name.clone()),
        content: Set(text),
        created_at: Set(chrono::Utc::now()),
    };
    let message = message.insert(db).await?;

    orders::Entity::update_many()
        .col_expr(
            orders::Column::UpdatedAt,
            Expr::value(Some(chrono::Utc::now())),
        )
        .filter(orders::Column::Id.eq(order.id))
        .exec(db)
        .await?;

    Ok(message)
}

/// The full message thread of an order, oldest first.
pub async fn get_messages(
    db: &DatabaseConnection,
    order_id: Uuid,
) -> Result<Vec<order_messages::Model>, DbErr> {
    order_messages::Entity::find()
        .filter(order_messages::Column::OrderId.eq(order_id))
        .order_by_asc(order_messages::Column::CreatedAt)
        .all(db)
        .await
}

/// Set the one-way payment-approval flag. The caller has already verified it
/// is not set.
pub async fn approve_payment(
    db: &DatabaseConnection,
    order: orders::Model,
) -> Result<orders::Model, DbErr> {
    let now = chrono::Utc::now();
    let mut active: orders::ActiveModel = order.into();
    active.payment_approved = Set(true);
    active.payment_approved_at = Set(Some(now));
    active.updated_at = Set(Some(now));

    active.update(db).await
}

/// Mark an order rated and mirror the review onto it. Runs inside the
/// rating-submission transaction.
pub async fn apply_review<C: ConnectionTrait>(
    conn: &C,
    order: orders::Model,
    stars: i16,
    comment: Option<String>,
) -> Result<orders::Model, DbErr> {
    let now = chrono::Utc::now();
    let mut active: orders::ActiveModel = order.into();
    active.is_rated = Set(true);
    active.review_rating = Set(Some(stars));
    active.review_comment = Set(comment);
    active.review_created_at = Set(Some(now));
    active.updated_at = Set(Some(now));

    active.update(conn).await
}

/// Every order, newest first (admin listing).
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<orders::Model>, DbErr> {
    orders::Entity::find()
        .order_by_desc(orders::Column::CreatedAt)
        .all(db)
        .await
}

// ── Stats helpers (maintenance dashboard) ──

pub async fn count_all(db: &DatabaseConnection) -> Result<u64, DbErr> {
    orders::Entity::find().count(db).await
}

pub async fn count_by_statuses(
    db: &DatabaseConnection,
    statuses: &[Status],
) -> Result<u64, DbErr> {
    orders::Entity::find()
        .filter(orders::Column::Status.is_in(statuses.iter().copied()))
        .count(db)
        .await
}

pub async fn count_payment_approved(
    db: &DatabaseConnection,
    approved: bool,
) -> Result<u64, DbErr> {
    orders::Entity::find()
        .filter(orders::Column::PaymentApproved.eq(approved))
        .count(db)
        .await
}

/// Revenue: the sum of price snapshots over completed orders.
pub async fn completed_revenue(db: &DatabaseConnection) -> Result<f64, DbErr> {
    let prices: Vec<f64> = orders::Entity::find()
        .select_only()
        .column(orders::Column::Price)
        .filter(orders::Column::Status.eq(Status::Completed))
        .into_tuple()
        .all(db)
        .await?;

    Ok(prices.into_iter().sum())
}

/// The most recently approved payments (maintenance dashboard).
pub async fn recent_payment_approvals(
    db: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<orders::Model>, DbErr> {
    orders::Entity::find()
        .filter(orders::Column::PaymentApproved.eq(true))
        .order_by_desc(orders::Column::PaymentApprovedAt)
        .limit(limit)
        .all(db)
        .await
}
