//! Runtime settings read once from the environment at startup.

use agent_flow::OpenRouterConfig;
use agent_flow::openrouter::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT};
use anyhow::{Context, Result, bail};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_INTAKE_MAX_ITERATIONS: usize = 6;
pub const DEFAULT_DIAGNOSIS_MAX_ITERATIONS: usize = 8;
pub const DEFAULT_PORT: u16 = 8000;

/// Iteration ceilings for the two tool-using stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    pub intake_max_iterations: usize,
    pub diagnosis_max_iterations: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            intake_max_iterations: DEFAULT_INTAKE_MAX_ITERATIONS,
            diagnosis_max_iterations: DEFAULT_DIAGNOSIS_MAX_ITERATIONS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub model: OpenRouterConfig,
    pub pipeline: PipelineConfig,
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENROUTER_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .context("OPENROUTER_API_KEY not set")?;

        let timeout = parse_var::<u64, _>(&lookup, "MODEL_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        let model = OpenRouterConfig {
            api_key,
            model: lookup("OPENROUTER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: lookup("OPENROUTER_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            temperature: parse_var::<f32, _>(&lookup, "MODEL_TEMPERATURE")?.unwrap_or(DEFAULT_TEMPERATURE),
            timeout,
        };

        let pipeline = PipelineConfig {
            intake_max_iterations: iteration_cap(&lookup, "INTAKE_MAX_ITERATIONS", DEFAULT_INTAKE_MAX_ITERATIONS)?,
            diagnosis_max_iterations: iteration_cap(
                &lookup,
                "DIAGNOSIS_MAX_ITERATIONS",
                DEFAULT_DIAGNOSIS_MAX_ITERATIONS,
            )?,
        };

        let port = parse_var::<u16, _>(&lookup, "PORT")?.unwrap_or(DEFAULT_PORT);

        Ok(Self {
            model,
            pipeline,
            port,
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Failed to parse {}={:?}", key, raw))
        })
        .transpose()
}

fn iteration_cap<F>(lookup: &F, key: &str, default: usize) -> Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let cap = parse_var::<usize, _>(lookup, key)?.unwrap_or(default);
    if cap == 0 {
        bail!("{} must be at least 1", key);
    }
    Ok(cap)
}
