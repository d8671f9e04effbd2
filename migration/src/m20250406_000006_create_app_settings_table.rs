use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `app_settings` table (singleton row, fixed id 1).
#[derive(DeriveIden)]
enum AppSettings {
    Table,
    Id,
    MaintenanceMode,
    PrimaryColor,
    SecondaryColor,
    AccentColor,
    FeatureJobPosting,
    FeatureMessaging,
    FeaturePayments,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AppSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AppSettings::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AppSettings::MaintenanceMode)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AppSettings::PrimaryColor)
                            .string()
                            .not_null()
                            .default("#000000"),
                    )
                    .col(
                        ColumnDef::new(AppSettings::SecondaryColor)
                            .string()
                            .not_null()
                            .default("#FFFFFF"),
                    )
                    .col(
                        ColumnDef::new(AppSettings::AccentColor)
                            .string()
                            .not_null()
                            .default("#1a1a1a"),
                    )
                    .col(
                        ColumnDef::new(AppSettings::FeatureJobPosting)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(AppSettings::FeatureMessaging)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(AppSettings::FeaturePayments)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(AppSettings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AppSettings::Table).to_owned())
            .await
    }
}
