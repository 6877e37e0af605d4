//! # Hatrack
//!
//! Headwear storefront backend.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export DATABASE_URL=postgres://...
//! export JWT_SECRET=...
//! export RAZORPAY_KEY_ID=rzp_test_...
//! export RAZORPAY_KEY_SECRET=...
//! export RAZORPAY_WEBHOOK_SECRET=...
//!
//! # Run the server
//! hatrack
//! ```

use shop_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Print banner
    print_banner();

    // Initialize application state (connects and migrates the database)
    let state = AppState::new().await?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("🎩 Hatrack starting on http://{}", addr);

    if !is_prod {
        info!("📝 Health: http://{}/health", addr);
        info!("🛒 Checkout: POST http://{}/checkout/create", addr);
        info!("🔔 Webhook: POST http://{}/checkout/webhook", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  🎩 Hatrack 🎩
  ━━━━━━━━━━━━━━━━━━━━━━━
  Headwear storefront backend
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
