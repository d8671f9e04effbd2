pub mod admin;
pub mod auth;
pub mod jobs;
pub mod maintenance;
pub mod orders;
pub mod ratings;
pub mod users;

use actix_web::{HttpResponse, web};

/// GET /api/health — liveness probe.
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));

    // ── Auth routes (register/login are public, /me requires a token) ──
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login))
            .route("/me", web::get().to(auth::me)),
    );

    // ── User routes ──
    cfg.service(
        web::scope("/users")
            .route("/me", web::get().to(users::get_profile))
            .route("/me", web::put().to(users::update_profile))
            .route("/freelancer/{id}", web::get().to(users::get_freelancer)),
    );

    // ── Job routes (listing and detail are public; mutations need a token) ──
    cfg.service(
        web::scope("/jobs")
            .route("", web::get().to(jobs::get_jobs))
            .route("", web::post().to(jobs::create_job))
            .route("/categories/list", web::get().to(jobs::get_categories))
            .route(
                "/freelancer/{freelancer_id}",
                web::get().to(jobs::get_freelancer_jobs),
            )
            .route("/{id}", web::get().to(jobs::get_job))
            .route("/{id}", web::put().to(jobs::update_job))
            .route("/{id}", web::delete().to(jobs::delete_job)),
    );

    // ── Order routes (all protected; specific paths registered before {id}) ──
    cfg.service(
        web::scope("/orders")
            .route("", web::post().to(orders::create_order))
            .route("/my", web::get().to(orders::get_my_orders))
            .route("/{id}", web::get().to(orders::get_order))
            .route("/{id}/status", web::put().to(orders::update_status))
            .route("/{id}/review", web::post().to(orders::add_review))
            .route("/{id}/message", web::post().to(orders::send_message))
            .route(
                "/{id}/approve-payment",
                web::post().to(orders::approve_payment),
            ),
    );

    // ── Rating routes (the freelancer read side is public) ──
    cfg.service(
        web::scope("/ratings")
            .route("/rate", web::post().to(ratings::rate_freelancer))
            .route("/my-ratings", web::get().to(ratings::get_my_ratings))
            .route("/check/{order_id}", web::get().to(ratings::check_eligibility))
            .route(
                "/freelancer/{freelancer_id}",
                web::get().to(ratings::get_freelancer_ratings),
            ),
    );

    // ── Admin routes (role-gated by the AdminUser extractor) ──
    cfg.service(
        web::scope("/admin")
            .route("/users", web::get().to(admin::get_all_users))
            .route("/users/{id}/approve", web::put().to(admin::approve_user))
            .route("/users/{id}", web::delete().to(admin::delete_user))
            .route("/orders", web::get().to(admin::get_all_orders))
            .route("/jobs", web::get().to(admin::get_all_jobs)),
    );

    // ── Maintenance routes (role-gated by the MaintenanceUser extractor) ──
    cfg.service(
        web::scope("/maintenance")
            .route("/settings", web::get().to(maintenance::get_settings))
            .route("/settings", web::put().to(maintenance::update_settings))
            .route("/errors", web::get().to(maintenance::get_errors))
            .route("/errors", web::delete().to(maintenance::clear_errors))
            .route("/stats", web::get().to(maintenance::get_stats))
            .route("/payment-stats", web::get().to(maintenance::payment_stats)),
    );
}
