use agent_flow::OpenRouterClient;
use anyhow::{Context, Result};
use medical_agents::{AppState, Pipeline, Settings, build_router, init_tracing};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let settings = Settings::from_env()?;
    let model = OpenRouterClient::new(settings.model.clone())
        .context("Failed to create OpenRouter client")?;

    info!(
        model = %settings.model.model,
        intake_max_iterations = settings.pipeline.intake_max_iterations,
        diagnosis_max_iterations = settings.pipeline.diagnosis_max_iterations,
        "pipeline configured"
    );

    let pipeline = Pipeline::new(Arc::new(model), settings.pipeline);
    let app = build_router(AppState {
        pipeline: Arc::new(pipeline),
    });

    let address = format!("0.0.0.0:{}", settings.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("Server running on http://{}", address);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
