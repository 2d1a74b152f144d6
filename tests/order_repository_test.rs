mod common;

use common::{days_ago, new_order, seed, setup_db};
use orders_api::entities::order_entity as orders;
use orders_api::services::{OrderRepository, OrderService};
use sea_orm::{EntityTrait, PaginatorTrait};

#[tokio::test]
async fn get_by_id_returns_existing_order() {
    let service = OrderService::new(setup_db().await);
    let (first, _) = seed(&service).await;

    let order = service.get_by_id(first.id).await.unwrap().unwrap();
    assert_eq!(order.id, first.id);
    assert_eq!(order.customer_name, "Customer 1");
}

#[tokio::test]
async fn get_by_id_returns_none_for_unknown_id() {
    let service = OrderService::new(setup_db().await);
    seed(&service).await;

    assert!(service.get_by_id(999).await.unwrap().is_none());
}

#[tokio::test]
async fn add_assigns_fresh_id_and_round_trips() {
    let service = OrderService::new(setup_db().await);
    let (first, second) = seed(&service).await;

    let added = service
        .add(new_order(days_ago(0), "Order 3 Description", "Customer 3"))
        .await
        .unwrap();

    assert_ne!(added.id, 0);
    assert_ne!(added.id, first.id);
    assert_ne!(added.id, second.id);
    let fetched = service.get_by_id(added.id).await.unwrap();
    assert_eq!(fetched, Some(added));
}

#[tokio::test]
async fn list_active_returns_all_seeded_orders() {
    let service = OrderService::new(setup_db().await);
    seed(&service).await;

    let orders = service.list_active().await.unwrap();
    assert_eq!(orders.len(), 2);
}

#[tokio::test]
async fn list_active_is_empty_on_empty_table() {
    let service = OrderService::new(setup_db().await);
    assert!(service.list_active().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_recent_applies_date_cutoff() {
    let service = OrderService::new(setup_db().await);
    seed(&service).await;

    let orders = service.list_recent(days_ago(4)).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].description, "Order 2 Description");
}

#[tokio::test]
async fn list_recent_includes_cutoff_day() {
    let service = OrderService::new(setup_db().await);
    seed(&service).await;

    let orders = service.list_recent(days_ago(3)).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_date, days_ago(3));
}

#[tokio::test]
async fn update_overwrites_every_field() {
    let service = OrderService::new(setup_db().await);
    let (first, _) = seed(&service).await;

    let mut changed = first.clone();
    changed.description = "Updated Description".to_string();
    changed.order_date = days_ago(1);
    changed.was_order_invoiced = false;

    let updated = service.update(changed.clone()).await.unwrap();
    assert_eq!(updated, Some(changed.clone()));
    assert_eq!(service.get_by_id(first.id).await.unwrap(), Some(changed));
}

#[tokio::test]
async fn update_unknown_id_creates_nothing() {
    let pool = setup_db().await;
    let service = OrderService::new(pool.clone());
    seed(&service).await;

    let ghost = new_order(days_ago(0), "Ghost", "Nobody").with_id(999);
    assert!(service.update(ghost).await.unwrap().is_none());

    assert!(orders::Entity::find_by_id(999).one(&pool).await.unwrap().is_none());
    assert_eq!(orders::Entity::find().count(&pool).await.unwrap(), 2);
}

#[tokio::test]
async fn soft_delete_flags_row_and_hides_it() {
    let pool = setup_db().await;
    let service = OrderService::new(pool.clone());
    let (first, second) = seed(&service).await;

    service.soft_delete(first.id).await.unwrap();

    assert!(service.get_by_id(first.id).await.unwrap().is_none());
    let row = orders::Entity::find_by_id(first.id)
        .one(&pool)
        .await
        .unwrap()
        .expect("row is kept");
    assert!(row.was_order_deleted);

    let active = service.list_active().await.unwrap();
    assert_eq!(active, vec![second]);
    assert!(service.list_recent(days_ago(10)).await.unwrap().iter().all(|o| o.id != first.id));
}

#[tokio::test]
async fn soft_delete_unknown_id_is_noop() {
    let pool = setup_db().await;
    let service = OrderService::new(pool.clone());
    seed(&service).await;
    let before = orders::Entity::find().all(&pool).await.unwrap();

    service.soft_delete(999).await.unwrap();

    let after = orders::Entity::find().all(&pool).await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn orders_added_as_deleted_are_never_listed() {
    let service = OrderService::new(setup_db().await);
    let hidden = service
        .add(orders_api::models::NewOrder {
            was_order_deleted: true,
            ..new_order(days_ago(0), "Archived", "Customer 9")
        })
        .await
        .unwrap();

    assert!(service.get_by_id(hidden.id).await.unwrap().is_none());
    assert!(service.list_active().await.unwrap().is_empty());
    assert!(service.list_recent(days_ago(1)).await.unwrap().is_empty());
}
