use agent_flow::OpenRouterClient;
use anyhow::{Context, Result};
use clap::Parser;
use medical_agents::report::processing_banner;
use medical_agents::{Pipeline, Settings, format_report, init_tracing};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

/// Run the intake, diagnosis and care-plan agents for one patient
#[derive(Debug, Parser)]
#[command(name = "medical-agents-cli", version)]
struct Cli {
    /// Patient ID (e.g. P-1001) or a free-text description of the case
    input: Vec<String>,
}

fn prompt_for_input() -> Result<String> {
    println!("Medical Multi-Agent System");
    println!("{}", "-".repeat(40));
    println!("Enter patient ID (e.g. P-1001) or describe the patient case.");
    println!("Available sample patients: P-1001, P-1002, P-1003, P-1004");
    println!();
    print!("Patient input: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read patient input")?;
    Ok(line.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    let input = if cli.input.is_empty() {
        prompt_for_input()?
    } else {
        cli.input.join(" ")
    };
    if input.is_empty() {
        println!("No input provided. Exiting.");
        return Ok(ExitCode::FAILURE);
    }

    let settings = Settings::from_env()?;
    let model = OpenRouterClient::new(settings.model).context("Failed to create OpenRouter client")?;
    let pipeline = Pipeline::new(Arc::new(model), settings.pipeline);

    println!("{}", processing_banner(&input));

    let report = pipeline.run(&input).await?;
    println!("{}", format_report(&report));

    Ok(ExitCode::SUCCESS)
}
