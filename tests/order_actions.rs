//! Order actions against a local backend stub: request shape, cache patching
//! on success, untouched cache on failure, session-expiry redirect.

mod common;

use std::sync::Arc;

use common::{order_row, orders_body, RecordingNavigator, StubResponse, StubServer};
use pizzashop::prelude::*;

fn status_in(page: &OrdersPage, id: &str) -> Option<OrderStatus> {
    page.get(&OrderId::from(id)).map(|o| o.status)
}

#[tokio::test]
async fn test_approve_patches_cached_list() {
    let server = StubServer::start(vec![
        StubResponse::json(
            200,
            orders_body(vec![
                order_row("ord_1", "pending", "Ana", 4590),
                order_row("ord_2", "pending", "Bia", 3200),
            ]),
        ),
        StubResponse::no_content(),
    ])
    .await;
    let client = server.client();
    let query = OrdersQuery::page(0);

    let page = client.orders().list(&query).await.unwrap();
    assert_eq!(page.orders.len(), 2);

    client.orders().approve(&OrderId::from("ord_1")).await.unwrap();

    assert_eq!(
        server.request_lines(),
        vec!["GET /orders?pageIndex=0", "PATCH /orders/ord_1/approve"]
    );
    let cached = client.orders().cached(&query).await.unwrap();
    assert_eq!(status_in(&cached, "ord_1"), Some(OrderStatus::Processing));
    assert_eq!(status_in(&cached, "ord_2"), Some(OrderStatus::Pending));
    assert_eq!(cached.orders[0].customer_name, "Ana");
    assert_eq!(cached.orders[0].total, Cents(4590));
}

#[tokio::test]
async fn test_action_patches_every_list_containing_the_order() {
    let server = StubServer::start(vec![
        StubResponse::json(
            200,
            orders_body(vec![order_row("ord_1", "processing", "Ana", 4590)]),
        ),
        StubResponse::json(
            200,
            orders_body(vec![
                order_row("ord_9", "pending", "Caio", 1000),
                order_row("ord_1", "processing", "Ana", 4590),
            ]),
        ),
        StubResponse::no_content(),
    ])
    .await;
    let client = server.client();
    let all = OrdersQuery::page(0);
    let by_name = OrdersQuery::page(0).customer_name("Ana");

    client.orders().list(&all).await.unwrap();
    client.orders().list(&by_name).await.unwrap();
    client.orders().dispatch(&OrderId::from("ord_1")).await.unwrap();

    for query in [&all, &by_name] {
        let page = client.orders().cached(query).await.unwrap();
        assert_eq!(status_in(&page, "ord_1"), Some(OrderStatus::Delivering));
    }
    let by_name_page = client.orders().cached(&by_name).await.unwrap();
    assert_eq!(status_in(&by_name_page, "ord_9"), Some(OrderStatus::Pending));
    assert_eq!(
        server.request_lines()[1],
        "GET /orders?pageIndex=0&customerName=Ana"
    );
}

#[tokio::test]
async fn test_failed_action_leaves_cache_untouched() {
    let server = StubServer::start(vec![
        StubResponse::json(
            200,
            orders_body(vec![order_row("ord_1", "delivered", "Ana", 4590)]),
        ),
        StubResponse::error(400, "NOT_ALLOWED", "You cannot cancel delivered orders."),
    ])
    .await;
    let client = server.client();
    let query = OrdersQuery::page(0);
    client.orders().list(&query).await.unwrap();
    let before = client.orders().cache().read().await.clone();

    let err = client
        .orders()
        .cancel(&OrderId::from("ord_1"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SdkError::Http(HttpError::BadRequest { ref code, .. }) if code.as_deref() == Some("NOT_ALLOWED")
    ));
    assert_eq!(*client.orders().cache().read().await, before);
    // Mutations are never retried.
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn test_cancel_is_sent_regardless_of_cached_status() {
    let server = StubServer::start(vec![
        StubResponse::json(
            200,
            orders_body(vec![order_row("ord_1", "delivering", "Ana", 4590)]),
        ),
        StubResponse::no_content(),
    ])
    .await;
    let client = server.client();
    let query = OrdersQuery::page(0);
    client.orders().list(&query).await.unwrap();

    client.orders().cancel(&OrderId::from("ord_1")).await.unwrap();

    assert_eq!(server.request_lines()[1], "PATCH /orders/ord_1/cancel");
    let page = client.orders().cached(&query).await.unwrap();
    assert_eq!(status_in(&page, "ord_1"), Some(OrderStatus::Canceled));
}

#[tokio::test]
async fn test_action_for_uncached_order_is_a_cache_no_op() {
    let server = StubServer::start(vec![
        StubResponse::json(
            200,
            orders_body(vec![order_row("ord_1", "pending", "Ana", 4590)]),
        ),
        StubResponse::no_content(),
    ])
    .await;
    let client = server.client();
    client.orders().list(&OrdersQuery::page(0)).await.unwrap();
    let before = client.orders().cache().read().await.clone();

    client.orders().deliver(&OrderId::from("ord_404")).await.unwrap();

    assert_eq!(*client.orders().cache().read().await, before);
}

#[tokio::test]
async fn test_expired_session_redirects_once_with_replace() {
    let server = StubServer::start(vec![
        StubResponse::json(
            200,
            orders_body(vec![order_row("ord_1", "pending", "Ana", 4590)]),
        ),
        StubResponse::error(401, "UNAUTHORIZED", "Unauthorized."),
    ])
    .await;
    let client = server.client();
    let navigator = Arc::new(RecordingNavigator::default());
    let _watch = client.auth().watch_session(navigator.clone()).await;
    let query = OrdersQuery::page(0);
    client.orders().list(&query).await.unwrap();
    let before = client.orders().cache().read().await.clone();

    let err = client
        .orders()
        .approve(&OrderId::from("ord_1"))
        .await
        .unwrap_err();

    assert!(err.is_session_expired());
    let calls = navigator.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "/sign-in");
    assert!(calls[0].1.replace);
    assert_eq!(*client.orders().cache().read().await, before);
}

#[tokio::test]
async fn test_other_unauthorized_codes_do_not_redirect() {
    let server = StubServer::start(vec![StubResponse::error(
        401,
        "INVALID_CREDENTIALS",
        "Invalid credentials.",
    )])
    .await;
    let client = server.client();
    let navigator = Arc::new(RecordingNavigator::default());
    let _watch = client.auth().watch_session(navigator.clone()).await;

    let err = client
        .orders()
        .approve(&OrderId::from("ord_1"))
        .await
        .unwrap_err();

    assert!(!err.is_session_expired());
    assert!(matches!(err, SdkError::Http(HttpError::Unauthorized { .. })));
    assert!(navigator.calls().is_empty());
}

#[tokio::test]
async fn test_detached_watch_stops_redirecting() {
    let server = StubServer::start(vec![StubResponse::error(
        401,
        "UNAUTHORIZED",
        "Unauthorized.",
    )])
    .await;
    let client = server.client();
    let navigator = Arc::new(RecordingNavigator::default());
    let watch = client.auth().watch_session(navigator.clone()).await;
    watch.detach().await;
    assert_eq!(client.http().interceptor_count().await, 0);

    let err = client
        .orders()
        .approve(&OrderId::from("ord_1"))
        .await
        .unwrap_err();

    assert!(err.is_session_expired());
    assert!(navigator.calls().is_empty());
}

#[tokio::test]
async fn test_dropped_watch_stops_redirecting() {
    let server = StubServer::start(vec![StubResponse::error(
        401,
        "UNAUTHORIZED",
        "Unauthorized.",
    )])
    .await;
    let client = server.client();
    let navigator = Arc::new(RecordingNavigator::default());
    drop(client.auth().watch_session(navigator.clone()).await);

    let _ = client.orders().approve(&OrderId::from("ord_1")).await;

    assert!(navigator.calls().is_empty());
}

#[tokio::test]
async fn test_remounting_without_detach_does_not_accumulate_interceptors() {
    let client = PizzaShopClient::builder().build().unwrap();
    let navigator = Arc::new(RecordingNavigator::default());

    for _ in 0..100 {
        let watch = client.auth().watch_session(navigator.clone()).await;
        assert_eq!(client.http().interceptor_count().await, 1);
        drop(watch);
    }

    assert_eq!(client.http().interceptor_count().await, 0);
}

#[tokio::test]
async fn test_order_details() {
    let server = StubServer::start(vec![StubResponse::json(
        200,
        serde_json::json!({
            "id": "ord_1",
            "createdAt": "2024-03-10T18:30:00.000Z",
            "status": "processing",
            "totalInCents": 9180,
            "customer": { "name": "Ana", "email": "ana@example.com", "phone": null },
            "orderItems": [
                { "id": "itm_1", "priceInCents": 4590, "quantity": 2, "product": { "name": "Calabresa" } }
            ]
        }),
    )])
    .await;
    let client = server.client();

    let details = client.orders().details(&OrderId::from("ord_1")).await.unwrap();

    assert_eq!(server.request_lines(), vec!["GET /orders/ord_1"]);
    assert_eq!(details.status, OrderStatus::Processing);
    assert_eq!(details.items[0].product_name, "Calabresa");
    assert_eq!(details.items[0].subtotal(), Cents(9180));
}

#[tokio::test]
async fn test_unknown_status_in_list_is_rejected() {
    let server = StubServer::start(vec![StubResponse::json(
        200,
        orders_body(vec![order_row("ord_1", "shipped", "Ana", 4590)]),
    )])
    .await;
    let client = server.client();
    let query = OrdersQuery::page(0);

    let err = client.orders().list(&query).await.unwrap_err();

    assert!(matches!(err, SdkError::InvalidStatus(InvalidStatus(ref s)) if s == "shipped"));
    assert!(client.orders().cached(&query).await.is_none());
}
