use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Ratings {
    Table,
    OrderId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One rating per order, enforced at the database so two concurrent
        // submissions cannot both land.
        manager
            .create_index(
                Index::create()
                    .name("idx_ratings_order_unique")
                    .table(Ratings::Table)
                    .col(Ratings::OrderId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_ratings_order_unique")
                    .table(Ratings::Table)
                    .to_owned(),
            )
            .await
    }
}
