use clap::Parser;
use smu_bab::core::dates::parse_reference_date;
use smu_bab::core::export::{render_daily, render_weekly};
use smu_bab::core::ConfigProvider;
use smu_bab::utils::error::{ErrorSeverity, MenuError};
use smu_bab::utils::{logger, validation::Validate};
use smu_bab::{CliConfig, MenuConfig, MenuEngine, RotatingSampleProvider, SmuMenuSource};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting smu-bab CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match cli.config.as_deref() {
        Some(path) => match MenuConfig::from_file(path) {
            Ok(file_config) => {
                tracing::info!("📄 Loaded configuration from {}", path);
                run(file_config, &cli).await
            }
            Err(e) => Err(e),
        },
        None => run(cli.clone(), &cli).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Menu ingestion failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run<C>(config: C, cli: &CliConfig) -> Result<(), MenuError>
where
    C: ConfigProvider + Validate + 'static,
{
    config.validate()?;

    let reference = parse_reference_date(cli.date.as_deref())?;
    if cli.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let source = SmuMenuSource::new(config)?;
    let engine =
        MenuEngine::new(source, RotatingSampleProvider::default()).with_monitoring(cli.monitor);

    let rendered = if cli.today {
        render_daily(&engine.daily(reference).await, cli.format)?
    } else {
        render_weekly(&engine.weekly(reference).await, cli.format)?
    };

    match cli.output.as_deref() {
        Some(path) => {
            tokio::fs::write(path, rendered.as_bytes()).await?;
            tracing::info!("📁 Output saved to: {}", path);
            println!("📁 Output saved to: {}", path);
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
