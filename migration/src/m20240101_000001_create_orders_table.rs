use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    OrderDate,
    Description,
    CustomerName,
    WasOrderInvoiced,
    WasOrderDeleted,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::OrderDate).date().not_null())
                    .col(ColumnDef::new(Orders::Description).string_len(100).not_null())
                    .col(ColumnDef::new(Orders::CustomerName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Orders::WasOrderInvoiced)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Orders::WasOrderDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // recent-orders lookups filter on date
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_orders_order_date")
                    .table(Orders::Table)
                    .col(Orders::OrderDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;
        Ok(())
    }
}
