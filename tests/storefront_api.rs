//! Storefront operations end to end against mock backends.

use std::time::Duration;

use cotizer::fetch::{EndpointList, FailureReason};
use cotizer::session::{ProductCatalog, RefreshStatus, ScanResult, Scanner};
use cotizer::storefront::{
    ApiEndpoints, Credentials, DetailSection, StorefrontClient, StorefrontError,
};
use serde_json::Value;

mod common;
use common::{dead_url, endpoints, fetcher, MockBackend};

fn client(api: ApiEndpoints) -> StorefrontClient {
    StorefrontClient::new(fetcher(), api).with_timeout(Duration::from_secs(2))
}

#[tokio::test]
async fn test_login_posts_trimmed_credentials() {
    let auth = MockBackend::start(200, r#"{"success": true, "message": "Bienvenido"}"#).await;
    let client = client(ApiEndpoints {
        auth: endpoints(&[auth.url("/ApiMov/api/auth/login")]),
        ..Default::default()
    });

    let credentials = Credentials::new(" vendedor ", " clave ").unwrap();
    let receipt = client.login(&credentials).await.unwrap();
    assert!(receipt.success);
    assert_eq!(receipt.message.as_deref(), Some("Bienvenido"));

    let requests = auth.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/ApiMov/api/auth/login");
    let body: Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(body["username"], "vendedor");
    assert_eq!(body["password"], "clave");
}

#[tokio::test]
async fn test_login_rejection_stops_at_first_answer() {
    let a = MockBackend::start(200, r#"{"success": false, "message": "Usuario inactivo"}"#).await;
    let b = MockBackend::start(200, r#"{"success": true}"#).await;
    let client = client(ApiEndpoints {
        auth: endpoints(&[a.url("/login"), b.url("/login")]),
        ..Default::default()
    });

    let credentials = Credentials::new("vendedor", "clave").unwrap();
    match client.login(&credentials).await {
        Err(StorefrontError::Rejected { message }) => assert_eq!(message, "Usuario inactivo"),
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(b.hits(), 0);
}

#[tokio::test]
async fn test_login_falls_back_when_first_host_is_down() {
    let b = MockBackend::start(200, r#"{"success": true}"#).await;
    let client = client(ApiEndpoints {
        auth: endpoints(&[dead_url("/login").await, b.url("/login")]),
        ..Default::default()
    });

    let credentials = Credentials::new("vendedor", "clave").unwrap();
    assert!(client.login(&credentials).await.is_ok());
}

#[tokio::test]
async fn test_list_products_and_search() {
    let products = MockBackend::start(
        200,
        r#"[
            {"id": 1, "codigo": "TOR-001", "nombre": "Tornillo", "costoEstandar": 0.1},
            {"id": 2, "codigo": "MAR-002", "nombre": "Martillo", "costoEstandar": 12}
        ]"#,
    )
    .await;
    let client = client(ApiEndpoints {
        products: endpoints(&[products.url("/ctzrApi/api/productos")]),
        ..Default::default()
    });

    let mut catalog = ProductCatalog::new();
    assert_eq!(catalog.refresh(&client).await, RefreshStatus::Loaded(2));
    catalog.set_search("mar");
    let visible = catalog.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].display_cost(), "12.00");
}

#[tokio::test]
async fn test_undecodable_records_are_reported() {
    let products = MockBackend::start(200, r#"[{"id": 1}]"#).await;
    let client = client(ApiEndpoints {
        products: endpoints(&[products.url("/productos")]),
        ..Default::default()
    });

    match client.list_products().await {
        Err(StorefrontError::Decode { what, .. }) => assert_eq!(what, "products"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_inventory_code_is_one_encoded_segment() {
    let inventory =
        MockBackend::start(200, r#"[{"codigo": "AB/12", "nombre": "Tubo", "total": 7}]"#).await;
    let client = client(ApiEndpoints {
        inventory: endpoints(&[inventory.url("/ctzrApi/api/inventario")]),
        ..Default::default()
    });

    let records = client.lookup_inventory(" AB/12 ").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].total, 7.0);
    assert_eq!(
        inventory.requests()[0].path,
        "/ctzrApi/api/inventario/AB%2F12"
    );
}

#[tokio::test]
async fn test_scanner_pauses_after_a_hit() {
    let inventory =
        MockBackend::start(200, r#"[{"codigo": "A1", "nombre": "Martillo", "total": 3}]"#).await;
    let client = client(ApiEndpoints {
        inventory: endpoints(&[inventory.url("/inventario")]),
        ..Default::default()
    });

    let mut scanner = Scanner::new();
    assert!(matches!(
        scanner.scan(&client, "A1").await,
        ScanResult::Found(ref r) if r.len() == 1
    ));
    assert_eq!(scanner.scan(&client, "A1").await, ScanResult::Ignored);
    assert_eq!(inventory.hits(), 1);

    scanner.close();
    assert!(matches!(
        scanner.scan(&client, "A1").await,
        ScanResult::Found(_)
    ));
    assert_eq!(inventory.hits(), 2);
}

#[tokio::test]
async fn test_scanner_stays_enabled_after_failure() {
    let inventory = MockBackend::start(500, "").await;
    let client = client(ApiEndpoints {
        inventory: endpoints(&[inventory.url("/inventario")]),
        ..Default::default()
    });

    let mut scanner = Scanner::new();
    assert!(matches!(
        scanner.scan(&client, "A1").await,
        ScanResult::Failed(_)
    ));
    assert!(scanner.is_enabled());
}

#[tokio::test]
async fn test_product_detail_aggregates_sections() {
    let inventory = MockBackend::start(
        200,
        r#"[{"codigo": "A1", "nombre": "Martillo", "total": 3},
            {"codigo": "A1", "nombre": "Martillo", "total": 2}]"#,
    )
    .await;
    let prices = MockBackend::start(
        200,
        r#"[{"codigo": "A1", "lista": "Mayorista", "precio": 18.5}]"#,
    )
    .await;
    let costs = MockBackend::start(500, "").await;
    let client = client(ApiEndpoints {
        inventory: endpoints(&[inventory.url("/inventario")]),
        prices: endpoints(&[prices.url("/precios")]),
        costs: endpoints(&[costs.url("/costos")]),
        ..Default::default()
    });

    let detail = client.product_detail("A1").await.unwrap();
    assert_eq!(detail.code, "A1");
    assert_eq!(detail.total_stock(), 5.0);
    assert_eq!(detail.prices.len(), 1);
    assert_eq!(detail.prices[0].list, "Mayorista");
    assert!(detail.costs.is_empty());
    assert_eq!(detail.unavailable, vec![DetailSection::Costs]);

    assert_eq!(prices.requests()[0].path, "/precios/A1");
    assert_eq!(costs.requests()[0].path, "/costos/A1");
}

#[tokio::test]
async fn test_product_detail_requires_inventory() {
    let prices = MockBackend::start(200, "[]").await;
    let client = client(ApiEndpoints {
        inventory: EndpointList::default(),
        prices: endpoints(&[prices.url("/precios")]),
        ..Default::default()
    });

    match client.product_detail("A1").await {
        Err(StorefrontError::Fetch(e)) => {
            assert_eq!(e.reason(), FailureReason::AllEndpointsExhausted)
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(prices.hits(), 0);
}
