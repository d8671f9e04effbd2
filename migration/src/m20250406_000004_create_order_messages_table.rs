use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `order_messages` table and its columns.
#[derive(DeriveIden)]
enum OrderMessages {
    Table,
    Id,
    OrderId,
    SenderId,
    SenderName,
    Content,
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
                    .table(OrderMessages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderMessages::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OrderMessages::OrderId).uuid().not_null())
                    .col(ColumnDef::new(OrderMessages::SenderId).uuid().not_null())
                    .col(ColumnDef::new(OrderMessages::SenderName).string().not_null())
                    .col(ColumnDef::new(OrderMessages::Content).text().not_null())
                    .col(
                        ColumnDef::new(OrderMessages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_messages_order_id")
                            .from(OrderMessages::Table, OrderMessages::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_messages_sender_id")
                            .from(OrderMessages::Table, OrderMessages::SenderId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderMessages::Table).to_owned())
            .await
    }
}
