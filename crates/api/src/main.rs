#[tokio::main]
async fn main() {
    stockroom_observability::init();

    let port = std::env::var("PORT").unwrap_or_else(|_| {
        tracing::warn!("PORT not set; defaulting to 8080");
        "8080".to_string()
    });

    let app = stockroom_api::app::build_app();

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .unwrap_or_else(|e| panic!("failed to bind 0.0.0.0:{port}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
