use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use neuralcare_core::{CoreConfig, DiagnosisEngine};

/// Main entry point for the NeuralCare server
///
/// Loads the reference tables and the classifier once, then serves the REST API.
/// A missing or malformed model does not stop startup: `/health` reports
/// `model_loaded: false` and `/diagnose` answers 503.
///
/// # Environment Variables
/// - `NEURALCARE_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `NEURALCARE_DATA_DIR`: Directory holding the reference CSV tables
/// - `NEURALCARE_MODEL_PATH`: Path to the classifier artifact
/// - `RUST_LOG`: Log filter
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("neuralcare_run=info".parse()?)
                .add_directive("neuralcare_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        std::env::var("NEURALCARE_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_dir = std::env::var_os("NEURALCARE_DATA_DIR").map(PathBuf::from);
    let model_path = std::env::var_os("NEURALCARE_MODEL_PATH").map(PathBuf::from);

    let cfg = CoreConfig::resolve(data_dir, model_path)?;
    tracing::info!(
        data_dir = %cfg.data_dir().display(),
        model = %cfg.model_path().display(),
        "resolved configuration"
    );

    let engine = DiagnosisEngine::load(&cfg);
    if !engine.is_model_loaded() {
        tracing::warn!("starting without a prediction model; diagnoses will be refused");
    }

    let app = router(AppState::new(engine));

    tracing::info!("++ Starting NeuralCare REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
