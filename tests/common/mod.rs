#![allow(dead_code)]

use chrono::{Days, NaiveDate, Utc};
use orders_api::config::DatabaseConfig;
use orders_api::database::{DbPool, create_pool, run_migrations};
use orders_api::models::{NewOrder, Order};
use orders_api::services::{OrderRepository, OrderService};

/// Fresh migrated SQLite database. One connection, so the in-memory
/// database lives as long as the pool.
pub async fn setup_db() -> DbPool {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    };
    let pool = create_pool(&config).await.expect("sqlite pool");
    run_migrations(&pool).await.expect("migrations");
    pool
}

pub fn days_ago(days: u64) -> NaiveDate {
    Utc::now()
        .date_naive()
        .checked_sub_days(Days::new(days))
        .unwrap()
}

pub fn new_order(order_date: NaiveDate, description: &str, customer_name: &str) -> NewOrder {
    NewOrder {
        order_date,
        description: description.to_string(),
        customer_name: customer_name.to_string(),
        was_order_invoiced: true,
        was_order_deleted: false,
    }
}

/// Two active orders dated five and three days back.
pub async fn seed(service: &OrderService) -> (Order, Order) {
    let first = service
        .add(NewOrder {
            was_order_invoiced: true,
            ..new_order(days_ago(5), "Order 1 Description", "Customer 1")
        })
        .await
        .unwrap();
    let second = service
        .add(NewOrder {
            was_order_invoiced: false,
            ..new_order(days_ago(3), "Order 2 Description", "Customer 2")
        })
        .await
        .unwrap();
    (first, second)
}
