// API server entrypoint.

use ngo_donation_backend::infra::{config, gateway::PaymentGateway};
use ngo_donation_backend::storage::{
    DonationStore, MemoryDonationStore, MemoryUserStore, PgDonationStore, PgUserStore, UserStore,
};
use ngo_donation_backend::transport;
use ngo_donation_backend::{DonationService, DonorNotifier, RazorpayClient};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // --- Record store ---
    let (donations, users): (Arc<dyn DonationStore>, Arc<dyn UserStore>) =
        match config::database_url() {
            Some(database_url) => {
                println!("> Connecting to PostgreSQL...");
                let pool = ngo_donation_backend::storage::postgres::connect(&database_url).await?;
                println!("> Store tables ready.");
                (
                    Arc::new(PgDonationStore::new(pool.clone())),
                    Arc::new(PgUserStore::new(pool)),
                )
            }
            None => {
                println!("> DATABASE_URL not set; using in-memory store (non-durable).");
                (
                    Arc::new(MemoryDonationStore::new()),
                    Arc::new(MemoryUserStore::new()),
                )
            }
        };

    // --- Payment gateway ---
    // Constructed once from environment credentials and injected below;
    // a missing key pair leaves order creation returning 503.
    let gateway: Option<Arc<dyn PaymentGateway>> = match config::razorpay_config() {
        Some(creds) => {
            println!("> Razorpay gateway configured (key id {}).", creds.key_id);
            Some(Arc::new(RazorpayClient::new(creds.key_id, creds.key_secret)))
        }
        None => {
            println!("> RAZORPAY_KEY_ID/RAZORPAY_KEY_SECRET not set; gateway disabled.");
            None
        }
    };

    // --- Workflow + notification fan-out ---
    let notifier = Arc::new(DonorNotifier::new());
    let service = Arc::new(DonationService::new(
        donations.clone(),
        gateway,
        notifier.clone(),
    ));

    let app_state = transport::http::AppState {
        service,
        users,
        donations,
        notifier,
    };

    // --- API server ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()),
        )
        .layer(cors);

    let addr = format!("0.0.0.0:{}", config::port());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    println!("> API server listening on http://{}", addr);
    println!("> Swagger UI available at /swagger-ui");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\n> Shutdown signal received (Ctrl+C), exiting.");
        }
    }

    Ok(())
}
