use crate::entities::order_entity as orders;
use crate::error::AppResult;
use crate::models::*;
use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

/// Persistence operations for orders.
///
/// Reads never return soft-deleted rows. Absent rows are reported as `None`
/// (or silently ignored for deletes); only store failures are errors.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Every order that has not been soft-deleted.
    async fn list_active(&self) -> AppResult<Vec<Order>>;

    /// Active orders dated on or after `from_date`.
    async fn list_recent(&self, from_date: NaiveDate) -> AppResult<Vec<Order>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Order>>;

    /// Persists a new row and returns it with the id the store assigned.
    async fn add(&self, order: NewOrder) -> AppResult<Order>;

    /// Overwrites every field of the row with `order.id`. `None` when no such row exists.
    async fn update(&self, order: Order) -> AppResult<Option<Order>>;

    /// Flags the row as deleted. Unknown ids are a no-op.
    async fn soft_delete(&self, id: i32) -> AppResult<()>;
}

#[derive(Clone)]
pub struct OrderService {
    pool: DatabaseConnection,
}

impl OrderService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for OrderService {
    async fn list_active(&self) -> AppResult<Vec<Order>> {
        let rows = orders::Entity::find()
            .filter(orders::Column::WasOrderDeleted.eq(false))
            .order_by_asc(orders::Column::Id)
            .all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    async fn list_recent(&self, from_date: NaiveDate) -> AppResult<Vec<Order>> {
        let rows = orders::Entity::find()
            .filter(orders::Column::OrderDate.gte(from_date))
            .filter(orders::Column::WasOrderDeleted.eq(false))
            .order_by_asc(orders::Column::Id)
            .all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Order>> {
        let row = orders::Entity::find_by_id(id)
            .filter(orders::Column::WasOrderDeleted.eq(false))
            .one(&self.pool)
            .await?;

        Ok(row.map(Order::from))
    }

    async fn add(&self, order: NewOrder) -> AppResult<Order> {
        let created = orders::ActiveModel {
            order_date: Set(order.order_date),
            description: Set(order.description),
            customer_name: Set(order.customer_name),
            was_order_invoiced: Set(order.was_order_invoiced),
            was_order_deleted: Set(order.was_order_deleted),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Created order {}", created.id);
        Ok(Order::from(created))
    }

    async fn update(&self, order: Order) -> AppResult<Option<Order>> {
        // update_many reports affected rows instead of failing on a missing id
        let result = orders::Entity::update_many()
            .col_expr(orders::Column::OrderDate, Expr::value(order.order_date))
            .col_expr(
                orders::Column::Description,
                Expr::value(order.description.clone()),
            )
            .col_expr(
                orders::Column::CustomerName,
                Expr::value(order.customer_name.clone()),
            )
            .col_expr(
                orders::Column::WasOrderInvoiced,
                Expr::value(order.was_order_invoiced),
            )
            .col_expr(
                orders::Column::WasOrderDeleted,
                Expr::value(order.was_order_deleted),
            )
            .filter(orders::Column::Id.eq(order.id))
            .exec(&self.pool)
            .await?;

        if result.rows_affected == 0 {
            log::warn!("Update skipped, order {} does not exist", order.id);
            return Ok(None);
        }

        log::info!("Updated order {}", order.id);
        Ok(Some(order))
    }

    async fn soft_delete(&self, id: i32) -> AppResult<()> {
        let Some(row) = orders::Entity::find_by_id(id).one(&self.pool).await? else {
            log::debug!("Soft delete ignored, order {id} does not exist");
            return Ok(());
        };

        let mut model = row.into_active_model();
        model.was_order_deleted = Set(true);
        model.update(&self.pool).await?;

        log::info!("Soft-deleted order {id}");
        Ok(())
    }
}
