use hrms_backend_mock::{AppState, router};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let state = Arc::new(AppState::seeded());
    let app = router(state);

    let addr = std::env::var("HRMS_MOCK_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("HRMS mock backend listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
