//! Three-agent medical pipeline: intake, diagnostic reasoning and care
//! planning over simulated patient, drug and literature tables.

pub mod config;
pub mod data;
pub mod models;
pub mod report;
pub mod service;
pub mod stages;
pub mod state;
pub mod tools;
pub mod workflow;

pub use config::{PipelineConfig, Settings};
pub use report::format_report;
pub use service::{AppState, build_router};
pub use state::PatientReport;
pub use workflow::Pipeline;

use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

const DEFAULT_LOG_FILTER: &str = "medical_agents=info,agent_flow=info,tower_http=info";

/// Initialize tracing from `RUST_LOG` and `LOG_FORMAT` (`json` or `pretty`).
///
/// Logs go to stderr so stdout carries only program output.
pub fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    log_subscriber(&log_format, env_filter, std::io::stderr).init();
}

/// Formatting subscriber writing every event to `writer`
pub fn log_subscriber<W>(
    log_format: &str,
    env_filter: EnvFilter,
    writer: W,
) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match log_format {
        // Human-readable logging for development
        "pretty" => Box::new(
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(writer)),
        ),
        _ => Box::new(
            tracing_subscriber::registry().with(env_filter).with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(writer),
            ),
        ),
    }
}
