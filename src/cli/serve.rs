//! HTTP server command

use std::sync::Arc;

use anyhow::Result;

use crate::config::AppConfig;
use crate::engine::PredictionPipeline;
use crate::server;

/// Start the prediction server
pub async fn serve(mut config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting {} v{}", config.app_name, config.app_version);

    if !config.model.path.exists() {
        tracing::warn!(
            "Model artifact {} does not exist; predictions will fail until it is provided",
            config.model.path.display()
        );
    }

    let pipeline = PredictionPipeline::from_config(&config)?;
    tracing::info!(
        model_version = pipeline.model_version(),
        "Prediction service initialized successfully"
    );

    server::start(Arc::new(pipeline), config.app_name, config.server).await
}
