use sea_orm::prelude::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Alias, ExprTrait};
use sea_orm::*;
use uuid::Uuid;

use crate::models::jobs::{self, CreateJob, JobListQuery, SortKey, UpdateJob};
use crate::models::users::{self, Roles};

/// Insert a new job owned by `owner`.
///
/// The denormalized `average_rating` is copied from the owner's current
/// aggregate; jobs created by the maintenance identity are auto-pinned.
pub async fn insert_job(
    db: &DatabaseConnection,
    input: CreateJob,
    owner: &users::Model,
) -> Result<jobs::Model, DbErr> {
    let new_job = jobs::ActiveModel {
        id: Set(Uuid::new_v4()),
        freelancer_id: Set(owner.id),
        title: Set(input.title),
        description: Set(input.description),
        category: Set(input.category),
        price: Set(input.price),
        delivery_time: Set(input.delivery_time),
        tags: Set(serde_json::json!(input.tags.unwrap_or_default())),
        requirements: Set(input.requirements),
        is_active: Set(true),
        is_pinned: Set(owner.user_type == Roles::Maintenance),
        views: Set(0),
        orders: Set(0),
        average_rating: Set(owner.rating),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_job.insert(db).await
}

/// Fetch a single job by ID.
pub async fn get_job_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<jobs::Model>, DbErr> {
    jobs::Entity::find_by_id(id).one(db).await
}

/// Public listing: active jobs, filtered and sorted. Pinned jobs always sort
/// first regardless of the chosen key.
pub async fn list_jobs(
    db: &DatabaseConnection,
    query: &JobListQuery,
) -> Result<Vec<jobs::Model>, DbErr> {
    let mut select = jobs::Entity::find().filter(jobs::Column::IsActive.eq(true));

    if let Some(category) = query.category {
        select = select.filter(jobs::Column::Category.eq(category));
    }
    if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{search}%");
        select = select.filter(
            Condition::any()
                .add(Expr::col(jobs::Column::Title).ilike(pattern.clone()))
                .add(Expr::col(jobs::Column::Description).ilike(pattern.clone()))
                .add(
                    Expr::col(jobs::Column::Tags)
                        .cast_as(Alias::new("text"))
                        .ilike(pattern),
                ),
        );
    }
    if let Some(min_price) = query.min_price {
        select = select.filter(jobs::Column::Price.gte(min_price));
    }
    if let Some(max_price) = query.max_price {
        select = select.filter(jobs::Column::Price.lte(max_price));
    }
    if let Some(min_rating) = query.min_rating {
        select = select.filter(jobs::Column::AverageRating.gte(min_rating));
    }

    select = select.order_by_desc(jobs::Column::IsPinned);
    select = match query.sort() {
        SortKey::Newest => select.order_by_desc(jobs::Column::CreatedAt),
        SortKey::PriceLow => select.order_by_asc(jobs::Column::Price),
        SortKey::PriceHigh => select.order_by_desc(jobs::Column::Price),
        SortKey::Popular => select.order_by_desc(jobs::Column::Orders),
        SortKey::Rating => select.order_by_desc(jobs::Column::AverageRating),
    };

    select.all(db).await
}

/// Distinct categories currently in use by active jobs.
pub async fn distinct_categories(db: &DatabaseConnection) -> Result<Vec<String>, DbErr> {
    jobs::Entity::find()
        .select_only()
        .column(jobs::Column::Category)
        .filter(jobs::Column::IsActive.eq(true))
        .distinct()
        .into_tuple::<String>()
        .all(db)
        .await
}

/// Bump the view counter. Every read of the detail endpoint counts.
pub async fn record_view(db: &DatabaseConnection, id: Uuid) -> Result<(), DbErr> {
    jobs::Entity::update_many()
        .col_expr(jobs::Column::Views, Expr::col(jobs::Column::Views).add(1))
        .filter(jobs::Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(())
}

/// Bump the order counter on order placement.
pub async fn increment_orders(db: &DatabaseConnection, id: Uuid) -> Result<(), DbErr> {
    jobs::Entity::update_many()
        .col_expr(jobs::Column::Orders, Expr::col(jobs::Column::Orders).add(1))
        .filter(jobs::Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(())
}

/// Apply a partial update to an already-authorized job. `allow_pin` is only
/// true for the maintenance identity; other callers' `is_pinned` is dropped.
pub async fn update_job(
    db: &DatabaseConnection,
    job: jobs::Model,
    input: UpdateJob,
    allow_pin: bool,
) -> Result<jobs::Model, DbErr> {
    let mut active: jobs::ActiveModel = job.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(category) = input.category {
        active.category = Set(category);
    }
    if let Some(price) = input.price {
        active.price = Set(price);
    }
    if let Some(delivery_time) = input.delivery_time {
        active.delivery_time = Set(delivery_time);
    }
    if let Some(tags) = input.tags {
        active.tags = Set(serde_json::json!(tags));
    }
    if let Some(requirements) = input.requirements {
        active.requirements = Set(Some(requirements));
    }
    if let Some(is_active) = input.is_active {
        active.is_active = Set(is_active);
    }
    if allow_pin {
        if let Some(is_pinned) = input.is_pinned {
            active.is_pinned = Set(is_pinned);
        }
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a job by ID. Authorization happens at the handler.
pub async fn delete_job(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    jobs::Entity::delete_by_id(id).exec(db).await
}

/// Batch fetch jobs by ID (display-field joins on the read side).
pub async fn find_by_ids(
    db: &DatabaseConnection,
    ids: Vec<Uuid>,
) -> Result<Vec<jobs::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    jobs::Entity::find()
        .filter(jobs::Column::Id.is_in(ids))
        .all(db)
        .await
}

/// Active jobs for one freelancer, newest first.
pub async fn list_by_freelancer(
    db: &DatabaseConnection,
    freelancer_id: Uuid,
) -> Result<Vec<jobs::Model>, DbErr> {
    jobs::Entity::find()
        .filter(jobs::Column::FreelancerId.eq(freelancer_id))
        .filter(jobs::Column::IsActive.eq(true))
        .order_by_desc(jobs::Column::CreatedAt)
        .all(db)
        .await
}

/// Every job regardless of active flag, newest first (admin listing).
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<jobs::Model>, DbErr> {
    jobs::Entity::find()
        .order_by_desc(jobs::Column::CreatedAt)
        .all(db)
        .await
}

/// Propagate a freshly recomputed aggregate rating to every job owned by the
/// freelancer. Runs inside the rating-submission transaction.
pub async fn refresh_average_rating<C: ConnectionTrait>(
    conn: &C,
    freelancer_id: Uuid,
    average: f64,
) -> Result<(), DbErr> {
    jobs::Entity::update_many()
        .col_expr(jobs::Column::AverageRating, Expr::value(average))
        .filter(jobs::Column::FreelancerId.eq(freelancer_id))
        .exec(conn)
        .await?;
    Ok(())
}

pub async fn count_active(db: &DatabaseConnection) -> Result<u64, DbErr> {
    jobs::Entity::find()
        .filter(jobs::Column::IsActive.eq(true))
        .count(db)
        .await
}
