mod db;
mod hla;
mod rate_limit;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    // Development login bootstrap (no-op unless DEV_EMPLOYEE_CODE is set).
    if let Ok(code) = std::env::var("DEV_EMPLOYEE_CODE") {
        match services::auth::ensure_dev_employee(&pool, &code).await {
            Ok(()) => tracing::warn!("DEV_EMPLOYEE_CODE login enabled"),
            Err(e) => tracing::error!(error = %e, "dev employee bootstrap failed"),
        }
    }

    let state = state::AppState::new(pool);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "matchpro listening");
    axum::serve(listener, app).await.expect("server failed");
}
