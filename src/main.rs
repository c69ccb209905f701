mod config;
mod error;
mod handlers;
mod i18n;
mod models;
mod services;
mod web; // Local HTTP API for the browser front end

#[cfg(feature = "web-server")]
use web::server::create_router;

use anyhow::Result;
use dotenv::dotenv;
use std::sync::Arc;

use config::Config;
use handlers::AppHandler;
use services::{AIService, CameraDevice, JsonFileStore, OpenRouterService, SnapshotCamera, StateStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    env_logger::init();

    // Load environment variables
    dotenv().ok();

    log::info!("🚀 Starting Nonna Svuotafrigo AI...");

    let config = Config::from_env()?;

    let store = Arc::new(JsonFileStore::new(&config.data_dir).await?);
    log::info!("✅ Local store initialized at {}", store.dir().display());

    let ai = Arc::new(OpenRouterService::new(
        config.openrouter_api_key.clone(),
        config.openrouter_model.clone(),
    ));
    log::info!("✅ OpenRouter service initialized with model: {}", config.openrouter_model);

    let camera = Arc::new(SnapshotCamera::new(&config.camera_snapshot_path));
    log::info!("✅ Camera reads snapshots from {}", config.camera_snapshot_path.display());

    let app = Arc::new(
        AppHandler::new(
            store as Arc<dyn StateStore>,
            ai as Arc<dyn AIService>,
            camera as Arc<dyn CameraDevice>,
            config.language,
        )
        .await,
    );
    log::info!("✅ App state ready (language: {})", config.language);

    #[cfg(feature = "web-server")]
    {
        let router = create_router(app.clone());
        let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
        log::info!("🌐 API server listening on http://{}", config.bind_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                log::error!("❌ API server stopped: {}", e);
            }
        });
    }

    #[cfg(not(feature = "web-server"))]
    {
        log::warn!("⚠️ Built without the web-server feature, nothing to serve");
        drop(app);
    }

    log::info!("🎉 Nonna is ready!");

    // Keep running
    tokio::signal::ctrl_c().await?;

    log::info!("🛑 Shutting down...");
    Ok(())
}
