//! End-to-end donation workflow test: create an order, verify the payment,
//! observe the status transition and the donor-channel event.
//!
//! Runs the router in-process on an ephemeral port against the in-memory
//! store and a stub gateway, so no database or network credentials are
//! needed.

use async_trait::async_trait;
use ngo_donation_backend::infra::gateway::{GatewayError, Order, OrderRequest, PaymentGateway};
use ngo_donation_backend::storage::{NewUser, UserStore};
use ngo_donation_backend::{
    compute_signature, transport, DonationService, DonationStore, DonorNotifier,
    MemoryDonationStore, MemoryUserStore, PaymentStatus,
};
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const TEST_SECRET: &str = "test_key_secret";
const TEST_TOKEN: &str = "token-donor-1";

/// Gateway stub: hands out sequential order ids and verifies signatures
/// against the test secret, no network involved.
struct StubGateway {
    counter: AtomicU64,
}

impl StubGateway {
    fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_order(&self, request: OrderRequest) -> Result<Order, GatewayError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(Order {
            id: format!("order_test_{}", n),
            amount: request.amount,
            currency: request.currency,
        })
    }

    fn key_id(&self) -> &str {
        "rzp_test_key"
    }

    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        ngo_donation_backend::verify_signature(TEST_SECRET, order_id, payment_id, signature)
    }
}

struct TestApp {
    base_url: String,
    donations: Arc<MemoryDonationStore>,
    notifier: Arc<DonorNotifier>,
    user_id: i64,
}

async fn spawn_app(with_gateway: bool) -> TestApp {
    let donations = Arc::new(MemoryDonationStore::new());
    let users = Arc::new(MemoryUserStore::new());
    let notifier = Arc::new(DonorNotifier::new());

    let user = users
        .insert(NewUser {
            full_name: "Asha Donor".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            api_token: TEST_TOKEN.to_string(),
        })
        .await
        .unwrap();

    let gateway: Option<Arc<dyn PaymentGateway>> = if with_gateway {
        Some(Arc::new(StubGateway::new()))
    } else {
        None
    };

    let service = Arc::new(DonationService::new(
        donations.clone(),
        gateway,
        notifier.clone(),
    ));
    let app_state = transport::http::AppState {
        service,
        users,
        donations: donations.clone(),
        notifier: notifier.clone(),
    };
    let router = transport::http::create_router(app_state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp {
        base_url: format!("http://127.0.0.1:{}", port),
        donations,
        notifier,
        user_id: user.id,
    }
}

async fn create_order(app: &TestApp, amount: f64, mode: &str) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/api/donation/create-order", app.base_url))
        .bearer_auth(TEST_TOKEN)
        .json(&json!({ "amount": amount, "modeofDonation": mode }))
        .send()
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn create_order_persists_exactly_one_pending_record() {
    let app = spawn_app(true).await;

    let resp = create_order(&app, 500.0, "upi").await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);

    let order_id = body["data"]["orderId"].as_str().unwrap();
    assert!(!order_id.is_empty());
    assert_eq!(body["data"]["amount"], 50_000); // paise
    assert_eq!(body["data"]["currency"], "INR");
    assert_eq!(body["data"]["keyId"], "rzp_test_key");
    assert_eq!(body["data"]["details"]["enteredAmount"], 500.0);

    let record = app
        .donations
        .find_by_order_id(order_id)
        .await
        .unwrap()
        .expect("pending record should exist");
    assert_eq!(record.status, PaymentStatus::Pending);
    assert_eq!(record.amount, 500.0);
    assert_eq!(record.user_id, app.user_id);
    assert_eq!(record.donor_name, "Asha Donor");
    assert!(record.gateway_payment_id.is_none());

    let all = app.donations.list_by_user(app.user_id, None).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn create_order_rejects_bad_input() {
    let app = spawn_app(true).await;

    let resp = create_order(&app, 0.5, "upi").await;
    assert_eq!(resp.status(), 400);

    let resp = create_order(&app, 100.0, "cash").await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);

    // Nothing persisted for either rejection.
    assert!(app
        .donations
        .list_by_user(app.user_id, None)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn create_order_requires_authentication() {
    let app = spawn_app(true).await;

    let resp = reqwest::Client::new()
        .post(format!("{}/api/donation/create-order", app.base_url))
        .json(&json!({ "amount": 100.0, "modeofDonation": "upi" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn create_order_without_gateway_is_service_unavailable() {
    let app = spawn_app(false).await;

    let resp = create_order(&app, 100.0, "upi").await;
    assert_eq!(resp.status(), 503);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn verify_completes_donation_and_notifies_donor_channel() {
    let app = spawn_app(true).await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = create_order(&app, 500.0, "upi").await.json().await.unwrap();
    let order_id = body["data"]["orderId"].as_str().unwrap().to_string();

    // Subscribe before the event fires; the channel has no replay.
    let mut events = app.notifier.subscribe(app.user_id).await;

    let payment_id = "pay_123";
    let signature = compute_signature(TEST_SECRET, &order_id, payment_id);
    let resp = client
        .post(format!("{}/api/donation/verify", app.base_url))
        .json(&json!({
            "razorpay_order_id": order_id,
            "razorpay_payment_id": payment_id,
            "razorpay_signature": signature,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["donation"]["status"], "completed");

    let record = app
        .donations
        .find_by_order_id(&order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.status, PaymentStatus::Completed);
    assert_eq!(record.gateway_payment_id.as_deref(), Some(payment_id));
    assert_eq!(record.gateway_signature.as_deref(), Some(signature.as_str()));

    let event = tokio::time::timeout(std::time::Duration::from_secs(1), events.recv())
        .await
        .expect("event should arrive promptly")
        .unwrap();
    assert_eq!(event.event_type, "donation-completed");
    assert_eq!(event.data["donationId"], record.id);
    assert_eq!(event.data["amount"], 500.0);
    assert_eq!(event.data["status"], "completed");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn verify_with_bad_signature_leaves_record_untouched() {
    let app = spawn_app(true).await;

    let body: serde_json::Value = create_order(&app, 200.0, "bankTransfer")
        .await
        .json()
        .await
        .unwrap();
    let order_id = body["data"]["orderId"].as_str().unwrap().to_string();

    let resp = reqwest::Client::new()
        .post(format!("{}/api/donation/verify", app.base_url))
        .json(&json!({
            "razorpay_order_id": order_id,
            "razorpay_payment_id": "pay_123",
            "razorpay_signature": "deadbeef",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let record = app
        .donations
        .find_by_order_id(&order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.status, PaymentStatus::Pending);
    assert!(record.gateway_payment_id.is_none());
    assert!(record.gateway_signature.is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn verify_unknown_order_is_not_found_and_creates_nothing() {
    let app = spawn_app(true).await;

    let signature = compute_signature(TEST_SECRET, "order_unknown", "pay_123");
    let resp = reqwest::Client::new()
        .post(format!("{}/api/donation/verify", app.base_url))
        .json(&json!({
            "razorpay_order_id": "order_unknown",
            "razorpay_payment_id": "pay_123",
            "razorpay_signature": signature,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    assert!(app
        .donations
        .find_by_order_id("order_unknown")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn repeat_verification_re_persists_completed_state() {
    let app = spawn_app(true).await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = create_order(&app, 300.0, "upi").await.json().await.unwrap();
    let order_id = body["data"]["orderId"].as_str().unwrap().to_string();
    let signature = compute_signature(TEST_SECRET, &order_id, "pay_9");

    for _ in 0..2 {
        let resp = client
            .post(format!("{}/api/donation/verify", app.base_url))
            .json(&json!({
                "razorpay_order_id": order_id,
                "razorpay_payment_id": "pay_9",
                "razorpay_signature": signature,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    let record = app
        .donations
        .find_by_order_id(&order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.status, PaymentStatus::Completed);
}
