use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Orders {
    Table,
    ClientId,
    FreelancerId,
}

#[derive(DeriveIden)]
enum Ratings {
    Table,
    FreelancerId,
}

#[derive(DeriveIden)]
enum Jobs {
    Table,
    FreelancerId,
}

#[derive(DeriveIden)]
enum OrderMessages {
    Table,
    OrderId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on orders.client_id for the client's order list
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_client_id")
                    .table(Orders::Table)
                    .col(Orders::ClientId)
                    .to_owned(),
            )
            .await?;

        // Index on orders.freelancer_id for the freelancer's order list
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_freelancer_id")
                    .table(Orders::Table)
                    .col(Orders::FreelancerId)
                    .to_owned(),
            )
            .await?;

        // Index on ratings.freelancer_id for aggregate recomputation
        manager
            .create_index(
                Index::create()
                    .name("idx_ratings_freelancer_id")
                    .table(Ratings::Table)
                    .col(Ratings::FreelancerId)
                    .to_owned(),
            )
            .await?;

        // Index on jobs.freelancer_id for owner listings and rating propagation
        manager
            .create_index(
                Index::create()
                    .name("idx_jobs_freelancer_id")
                    .table(Jobs::Table)
                    .col(Jobs::FreelancerId)
                    .to_owned(),
            )
            .await?;

        // Index on order_messages.order_id for thread fetches
        manager
            .create_index(
                Index::create()
                    .name("idx_order_messages_order_id")
                    .table(OrderMessages::Table)
                    .col(OrderMessages::OrderId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_orders_client_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_orders_freelancer_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_ratings_freelancer_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_jobs_freelancer_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_order_messages_order_id").to_owned())
            .await?;

        Ok(())
    }
}
