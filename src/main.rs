use atelier::{config::Config, model::app::AppState, router, scheduler::cron::start_scheduler, startup};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("atelier=info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let gateway = startup::build_gateway_client(&config).unwrap();
    let db = startup::connect_to_database(&config).await.unwrap();
    let session = startup::connect_to_session(&config).await.unwrap();
    let _scheduler = start_scheduler(&db).await.unwrap();

    tracing::info!("Starting server on {}", config.listen_addr);

    let routes = router::routes()
        .with_state(AppState { db, gateway })
        .layer(session);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .unwrap();
    axum::serve(listener, routes).await.unwrap();
}
