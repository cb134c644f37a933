//! End-to-end tests for the application context: auth gating, cached
//! reads, and invalidate-on-write, against a canned backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use prokat_core::models::{CreateRentalDto, RentalSource};
use prokat_core::{
    ApiClientConfig, ApiError, AppContext, FailoverPolicy, MemoryTokenStore,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

static RENTALS_LIST_CALLS: AtomicUsize = AtomicUsize::new(0);
static SUMMARY_CALLS: AtomicUsize = AtomicUsize::new(0);

const SUMMARY_JSON: &str = r#"{
    "total_revenue": 10000.0,
    "rental_revenue": 9000.0,
    "delivery_revenue": 1000.0,
    "total_costs": 4000.0,
    "delivery_costs": 500.0,
    "operational_expenses": 3500.0,
    "net_profit": 6000.0,
    "total_rentals": 4
}"#;

const EXPENSE_JSON: &str = r#"{
    "id": 5,
    "description": "Бензин",
    "amount": 2500.0,
    "date": "2024-06-01",
    "created_at": "2024-06-01T00:00:00",
    "updated_at": "2024-06-01T00:00:00"
}"#;

const RENTAL_JSON: &str = r#"{
    "id": 1,
    "equipment_id": 3,
    "equipment_instance": 1,
    "start_date": "2024-06-10T10:00:00",
    "end_date": "2024-06-12T10:00:00",
    "customer_name": "Иванов Иван",
    "customer_phone": "79991234567",
    "needs_delivery": false,
    "rental_price": 3000.0,
    "delivery_price": 0.0,
    "delivery_costs": 0.0,
    "source": "avito",
    "status": "active",
    "created_at": "2024-06-01T00:00:00",
    "updated_at": "2024-06-01T00:00:00"
}"#;

fn respond(request: &str) -> (u16, String) {
    if request.starts_with("GET /health") {
        return (200, r#"{"status":"healthy"}"#.to_string());
    }
    if request.starts_with("GET /rentals") {
        RENTALS_LIST_CALLS.fetch_add(1, Ordering::SeqCst);
        return (200, format!("[{RENTAL_JSON}]"));
    }
    if request.starts_with("POST /rentals") {
        return (200, RENTAL_JSON.to_string());
    }
    if request.starts_with("GET /analytics/financial-summary") {
        SUMMARY_CALLS.fetch_add(1, Ordering::SeqCst);
        return (200, SUMMARY_JSON.to_string());
    }
    if request.starts_with("POST /expenses") {
        return (200, EXPENSE_JSON.to_string());
    }
    (404, r#"{"error":"Not found"}"#.to_string())
}

async fn spawn_backend() -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let n = stream.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).to_string();
                let (status, body) = respond(&request);
                let reason = if status == 200 { "OK" } else { "Not Found" };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    (format!("http://{addr}"), handle)
}

fn config_for(base: String) -> ApiClientConfig {
    ApiClientConfig {
        candidates: vec![base],
        probe_timeout_seconds: 2,
        request_timeout_seconds: 5,
        health_path: "/health".to_string(),
        failover: FailoverPolicy::default(),
    }
}

fn booking_dto() -> CreateRentalDto {
    CreateRentalDto {
        equipment_id: 3,
        equipment_instance: Some(1),
        start_date: "2024-06-10T10:00".to_string(),
        end_date: "2024-06-12T10:00".to_string(),
        customer_name: "Иванов Иван".to_string(),
        customer_phone: "79991234567".to_string(),
        needs_delivery: false,
        delivery_address: None,
        rental_price: 3000.0,
        delivery_price: None,
        delivery_costs: None,
        source: RentalSource::Avito,
        comment: None,
    }
}

#[tokio::test]
async fn test_reads_are_gated_cached_and_invalidated_on_write() {
    let (base, _server) = spawn_backend().await;
    let ctx = Arc::new(
        AppContext::initialize(config_for(base), Box::new(MemoryTokenStore::new()), None)
            .await
            .unwrap(),
    );

    // Unauthenticated reads never touch the network.
    let gated = prokat_core::resources::rentals::list(&ctx).await;
    assert_eq!(gated.unwrap_err(), ApiError::NotAuthenticated);
    assert_eq!(RENTALS_LIST_CALLS.load(Ordering::SeqCst), 0);

    ctx.session.login("tok".to_string()).await;

    // First read fetches, second is served from the cache.
    let rentals = prokat_core::resources::rentals::list(&ctx).await.unwrap();
    assert_eq!(rentals.len(), 1);
    assert_eq!(rentals[0].customer_name, "Иванов Иван");

    let again = prokat_core::resources::rentals::list(&ctx).await.unwrap();
    assert_eq!(again.len(), 1);
    assert_eq!(RENTALS_LIST_CALLS.load(Ordering::SeqCst), 1);

    // A write invalidates the resource, so the next read refetches.
    prokat_core::resources::rentals::create(&ctx, &booking_dto())
        .await
        .unwrap();
    prokat_core::resources::rentals::list(&ctx).await.unwrap();
    assert_eq!(RENTALS_LIST_CALLS.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_expense_write_invalidates_cached_analytics() {
    let (base, _server) = spawn_backend().await;
    let ctx = AppContext::initialize(config_for(base), Box::new(MemoryTokenStore::new()), None)
        .await
        .unwrap();
    ctx.session.login("tok".to_string()).await;

    let summary = prokat_core::resources::analytics::financial_summary(&ctx, None, None)
        .await
        .unwrap();
    assert_eq!(summary.net_profit, 6000.0);
    prokat_core::resources::analytics::financial_summary(&ctx, None, None)
        .await
        .unwrap();
    assert_eq!(SUMMARY_CALLS.load(Ordering::SeqCst), 1);

    let dto = prokat_core::models::CreateExpenseDto {
        description: "Бензин".to_string(),
        amount: 2500.0,
        date: "2024-06-01".to_string(),
        category: None,
    };
    prokat_core::resources::expenses::create(&ctx, &dto)
        .await
        .unwrap();

    // The summary depends on expenses, so the next read refetches.
    prokat_core::resources::analytics::financial_summary(&ctx, None, None)
        .await
        .unwrap();
    assert_eq!(SUMMARY_CALLS.load(Ordering::SeqCst), 2);
}
