use sea_orm::prelude::Expr;
use sea_orm::sea_query::ExprTrait;
use sea_orm::*;
use uuid::Uuid;

use crate::auth::password;
use crate::models::ratings::RatingSummary;
use crate::models::users::{self, RegisterRequest, Roles, UpdateProfile};

/// Fetch a user by ID, excluding soft-deleted accounts.
pub async fn find_live_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id)
        .filter(users::Column::IsDeleted.eq(false))
        .one(db)
        .await
}

/// Fetch a user by email, excluding soft-deleted accounts.
pub async fn find_live_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .filter(users::Column::IsDeleted.eq(false))
        .one(db)
        .await
}

/// Whether any account (deleted or not) already holds this email.
pub async fn email_taken(db: &DatabaseConnection, email: &str) -> Result<bool, DbErr> {
    let count = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Insert a new account from a registration request.
///
/// Clients are approved immediately; freelancers wait for admin approval, and
/// only freelancers keep the profile extras from the request.
pub async fn register(
    db: &DatabaseConnection,
    input: RegisterRequest,
    password_hash: String,
) -> Result<users::Model, DbErr> {
    let is_freelancer = input.user_type == Roles::Freelancer;
    let skills: Vec<String> = if is_freelancer {
        input.skills.unwrap_or_default()
    } else {
        Vec::new()
    };
    let portfolio: Vec<String> = if is_freelancer {
        input.portfolio.unwrap_or_default()
    } else {
        Vec::new()
    };

    let new_user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(input.email.to_lowercase()),
        password_hash: Set(password_hash),
        name: Set(input.name),
        user_type: Set(input.user_type),
        profile_picture: Set(input.profile_picture),
        field_of_work: Set(input.field_of_work.filter(|_| is_freelancer)),
        profile_description: Set(input.profile_description.filter(|_| is_freelancer)),
        ccp: Set(input.ccp.filter(|_| is_freelancer)),
        skills: Set(serde_json::json!(skills)),
        portfolio: Set(serde_json::json!(portfolio)),
        is_approved: Set(input.user_type == Roles::Client),
        is_deleted: Set(false),
        rating: Set(0.0),
        total_ratings: Set(0),
        five_star: Set(0),
        four_star: Set(0),
        three_star: Set(0),
        two_star: Set(0),
        one_star: Set(0),
        completed_jobs: Set(0),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_user.insert(db).await
}

/// Update a user's own profile. Email, password and the aggregate rating
/// fields are not touchable through this path.
pub async fn update_profile(
    db: &DatabaseConnection,
    user: users::Model,
    input: UpdateProfile,
) -> Result<users::Model, DbErr> {
    let mut active: users::ActiveModel = user.into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(picture) = input.profile_picture {
        active.profile_picture = Set(Some(picture));
    }
    if let Some(field) = input.field_of_work {
        active.field_of_work = Set(Some(field));
    }
    if let Some(description) = input.profile_description {
        active.profile_description = Set(Some(description));
    }
    if let Some(ccp) = input.ccp {
        active.ccp = Set(Some(ccp));
    }
    if let Some(skills) = input.skills {
        active.skills = Set(serde_json::json!(skills));
    }
    if let Some(portfolio) = input.portfolio {
        active.portfolio = Set(serde_json::json!(portfolio));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Fetch a public freelancer profile: approved, non-deleted, freelancer type.
pub async fn find_public_freelancer(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id)
        .filter(users::Column::UserType.eq(Roles::Freelancer))
        .filter(users::Column::IsApproved.eq(true))
        .filter(users::Column::IsDeleted.eq(false))
        .one(db)
        .await
}

/// Fetch any account by ID, including deleted ones (rating read side).
pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

/// Batch fetch accounts by ID (display-field joins on the read side).
pub async fn find_by_ids(
    db: &DatabaseConnection,
    ids: Vec<Uuid>,
) -> Result<Vec<users::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    users::Entity::find()
        .filter(users::Column::Id.is_in(ids))
        .all(db)
        .await
}

/// All non-deleted accounts, newest first (admin listing).
pub async fn list_active(db: &DatabaseConnection) -> Result<Vec<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::IsDeleted.eq(false))
        .order_by_desc(users::Column::CreatedAt)
        .all(db)
        .await
}

/// Approve an account (admin action).
pub async fn approve(db: &DatabaseConnection, id: Uuid) -> Result<Option<users::Model>, DbErr> {
    let Some(user) = users::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let mut active: users::ActiveModel = user.into();
    active.is_approved = Set(true);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await.map(Some)
}

/// Soft-delete an account (admin action). The row is never removed.
pub async fn soft_delete(db: &DatabaseConnection, id: Uuid) -> Result<Option<users::Model>, DbErr> {
    let Some(user) = users::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let mut active: users::ActiveModel = user.into();
    active.is_deleted = Set(true);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await.map(Some)
}

/// Bump the completed-jobs counter, used on the transition to `completed`.
pub async fn increment_completed_jobs(db: &DatabaseConnection, id: Uuid) -> Result<(), DbErr> {
    users::Entity::update_many()
        .col_expr(
            users::Column::CompletedJobs,
            Expr::col(users::Column::CompletedJobs).add(1),
        )
        .filter(users::Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(())
}

/// Write a freshly recomputed aggregate onto the freelancer's account.
/// Runs inside the rating-submission transaction.
pub async fn apply_rating_summary<C: ConnectionTrait>(
    conn: &C,
    freelancer_id: Uuid,
    summary: &RatingSummary,
) -> Result<(), DbErr> {
    users::Entity::update_many()
        .col_expr(users::Column::Rating, Expr::value(summary.average))
        .col_expr(users::Column::TotalRatings, Expr::value(summary.total))
        .col_expr(
            users::Column::FiveStar,
            Expr::value(summary.breakdown.five_star),
        )
        .col_expr(
            users::Column::FourStar,
            Expr::value(summary.breakdown.four_star),
        )
        .col_expr(
            users::Column::ThreeStar,
            Expr::value(summary.breakdown.three_star),
        )
        .col_expr(
            users::Column::TwoStar,
            Expr::value(summary.breakdown.two_star),
        )
        .col_expr(
            users::Column::OneStar,
            Expr::value(summary.breakdown.one_star),
        )
        .filter(users::Column::Id.eq(freelancer_id))
        .exec(conn)
        .await?;
    Ok(())
}

// ── Stats helpers (maintenance dashboard) ──

pub async fn count_active(db: &DatabaseConnection) -> Result<u64, DbErr> {
    users::Entity::find()
        .filter(users::Column::IsDeleted.eq(false))
        .count(db)
        .await
}

pub async fn count_active_by_type(db: &DatabaseConnection, role: Roles) -> Result<u64, DbErr> {
    users::Entity::find()
        .filter(users::Column::UserType.eq(role))
        .filter(users::Column::IsDeleted.eq(false))
        .count(db)
        .await
}

pub async fn count_pending_approvals(db: &DatabaseConnection) -> Result<u64, DbErr> {
    users::Entity::find()
        .filter(users::Column::UserType.eq(Roles::Freelancer))
        .filter(users::Column::IsApproved.eq(false))
        .filter(users::Column::IsDeleted.eq(false))
        .count(db)
        .await
}

/// Create the privileged admin/maintenance accounts on startup when the
/// corresponding env vars are set and the account does not exist yet.
/// Failures are logged, never fatal.
pub async fn seed_privileged_accounts(db: &DatabaseConnection) -> Result<(), DbErr> {
    let seeds = [
        ("ADMIN_EMAIL", "ADMIN_PASSWORD", "Admin", Roles::Admin),
        (
            "MAINTENANCE_EMAIL",
            "MAINTENANCE_PASSWORD",
            "Maintenance",
            Roles::Maintenance,
        ),
    ];

    for (email_var, password_var, name, role) in seeds {
        let (Ok(email), Ok(pass)) = (std::env::var(email_var), std::env::var(password_var)) else {
            continue;
        };

        let email = email.to_lowercase();
        if email_taken(db, &email).await? {
            continue;
        }

        let password_hash = match password::hash_password(&pass) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!("skipping {name} account seed: {e}");
                continue;
            }
        };

        let account = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.clone()),
            password_hash: Set(password_hash),
            name: Set(name.to_string()),
            user_type: Set(role),
            profile_picture: Set(None),
            field_of_work: Set(None),
            profile_description: Set(None),
            ccp: Set(None),
            skills: Set(serde_json::json!([])),
            portfolio: Set(serde_json::json!([])),
            is_approved: Set(true),
            is_deleted: Set(false),
            rating: Set(0.0),
            total_ratings: Set(0),
            five_star: Set(0),
            four_star: Set(0),
            three_star: Set(0),
            two_star: Set(0),
            one_star: Set(0),
            completed_jobs: Set(0),
            created_at: Set(chrono::Utc::now()),
            updated_at: Set(None),
        };
        account.insert(db).await?;
        tracing::info!("seeded {name} account {email}");
    }

    Ok(())
}
