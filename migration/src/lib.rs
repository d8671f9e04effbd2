pub use sea_orm_migration::prelude::*;

mod m20250406_000001_create_users_table;
mod m20250406_000002_create_jobs_table;
mod m20250406_000003_create_orders_table;
mod m20250406_000004_create_order_messages_table;
mod m20250406_000005_create_ratings_table;
mod m20250406_000006_create_app_settings_table;
mod m20250406_000007_create_error_logs_table;
mod m20250413_000001_add_unique_order_to_ratings;
mod m20250420_000001_add_pinned_to_jobs;
mod m20250427_000001_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250406_000001_create_users_table::Migration),
            Box::new(m20250406_000002_create_jobs_table::Migration),
            Box::new(m20250406_000003_create_orders_table::Migration),
            Box::new(m20250406_000004_create_order_messages_table::Migration),
            Box::new(m20250406_000005_create_ratings_table::Migration),
            Box::new(m20250406_000006_create_app_settings_table::Migration),
            Box::new(m20250406_000007_create_error_logs_table::Migration),
            Box::new(m20250413_000001_add_unique_order_to_ratings::Migration),
            Box::new(m20250420_000001_add_pinned_to_jobs::Migration),
            Box::new(m20250427_000001_add_indexes::Migration),
        ]
    }
}
