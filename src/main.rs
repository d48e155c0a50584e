use clap::Parser;
use food_site_finder::utils::error::ErrorSeverity;
use food_site_finder::utils::{logger, validation::Validate};
use food_site_finder::{CliConfig, CsvRowSource, LocatorError, LocatorService, OutputMode};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting food-site-finder");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證命令列參數
    if let Err(e) = cli.validate() {
        exit_with(&e);
    }

    match run(&cli).await {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}

async fn run(cli: &CliConfig) -> food_site_finder::Result<String> {
    let config = cli.load_locator_config()?;
    let rows_path = config
        .rows_path()
        .ok_or_else(|| LocatorError::MissingConfigError {
            field: "data.rows_path".to_string(),
        })?
        .to_string();

    tracing::info!("📁 Agency rows: {}", rows_path);

    // 建立地理編碼器與資料來源
    let geocoder = config.build_geocoder()?;
    let service = LocatorService::new(geocoder, CsvRowSource::new(rows_path), &config);

    let output = match cli.mode {
        OutputMode::Nearby => {
            let agencies = service.search(&cli.search_request()).await?;
            serde_json::to_string_pretty(&agencies)?
        }
        OutputMode::Expert => {
            let agencies = service
                .expert_query(cli.address.as_deref(), cli.day.as_deref(), cli.radius)
                .await?;
            serde_json::to_string_pretty(&agencies)?
        }
        OutputMode::Voice => {
            let address = cli.address.as_deref().unwrap_or_default();
            let day = cli.day.as_deref().unwrap_or_default();
            service.voice_summary(address, day, cli.radius).await?
        }
        OutputMode::Agencies => serde_json::to_string_pretty(&service.list_agencies().await?)?,
        OutputMode::Agency => {
            let agency_id = cli.agency_id.as_deref().unwrap_or_default();
            let profile = service
                .agency(agency_id)
                .await?
                .ok_or_else(|| LocatorError::AgencyNotFound {
                    agency_id: agency_id.to_string(),
                })?;
            serde_json::to_string_pretty(&profile)?
        }
    };

    Ok(output)
}

fn exit_with(e: &LocatorError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 4,      // 請求錯誤
        ErrorSeverity::Medium => 2,   // 可重試錯誤
        ErrorSeverity::High => 1,     // 處理錯誤
        ErrorSeverity::Critical => 3, // 系統錯誤
    };
    std::process::exit(exit_code);
}
