use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `ratings` table and its columns.
///
/// `job_id` carries no foreign key: jobs can be hard-deleted while their
/// ratings stay part of the freelancer's history.
#[derive(DeriveIden)]
enum Ratings {
    Table,
    Id,
    FreelancerId,
    ClientId,
    OrderId,
    JobId,
    Stars,
    Review,
    CreatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ratings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Ratings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Ratings::FreelancerId).uuid().not_null())
                    .col(ColumnDef::new(Ratings::ClientId).uuid().not_null())
                    .col(ColumnDef::new(Ratings::OrderId).uuid().not_null())
                    .col(ColumnDef::new(Ratings::JobId).uuid().not_null())
                    .col(ColumnDef::new(Ratings::Stars).small_integer().not_null())
                    .col(ColumnDef::new(Ratings::Review).text())
                    .col(
                        ColumnDef::new(Ratings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ratings_freelancer_id")
                            .from(Ratings::Table, Ratings::FreelancerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ratings_client_id")
                            .from(Ratings::Table, Ratings::ClientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ratings_order_id")
                            .from(Ratings::Table, Ratings::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ratings::Table).to_owned())
            .await
    }
}
