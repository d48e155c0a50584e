use anyhow::{Context, Result};
use clap::Parser;
use food_site_finder::utils::{logger, validation::Validate};
use food_site_finder::{handle_tool_call, CsvRowSource, LocatorConfig, LocatorService, ToolCallRequest};
use std::io::Read;

#[derive(Parser)]
#[command(name = "voice-tool")]
#[command(about = "Answer a voice-assistant getFoodSites tool call")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "food-site-finder.toml")]
    config: String,

    /// Tool-call JSON payload file; reads stdin when omitted
    #[arg(short, long)]
    payload: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日誌 (JSON 格式，輸出至 stderr)
    logger::init_tool_logger();

    let config = LocatorConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;
    config.validate().context("Configuration validation failed")?;

    let rows_path = config
        .rows_path()
        .context("data.rows_path must be set in the configuration")?
        .to_string();

    let payload = match &args.payload {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload '{}'", path))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let request = ToolCallRequest::from_json(&payload).context("Invalid tool-call payload")?;
    let service = LocatorService::new(config.build_geocoder()?, CsvRowSource::new(rows_path), &config);

    match handle_tool_call(&service, &request).await {
        Ok(response) => {
            println!("{}", serde_json::to_string(&response)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                category = ?e.category(),
                severity = ?e.severity(),
                "❌ Tool call failed: {}",
                e
            );
            println!("{}", serde_json::json!({ "error": e.to_string() }));
            std::process::exit(1);
        }
    }
}
