use clap::Parser;
use sharelink_etl::core::etl::write_report;
use sharelink_etl::core::ConfigProvider;
use sharelink_etl::utils::error::{EtlError, ErrorSeverity};
use sharelink_etl::utils::{logger, validation::Validate};
use sharelink_etl::{CliConfig, EtlEngine, LocalStorage, RunSummary, SharePipeline};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting sharelink-etl");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    match run(config).await {
        Ok(summary) => {
            println!(
                "✅ {} of {} rows written ({} failed)",
                summary.succeeded,
                summary.total,
                summary.failure_count()
            );
            for (kind, count) in &summary.failed {
                println!("   {}: {}", kind, count);
            }
        }
        Err(e) => {
            tracing::error!(
                "Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

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
}

async fn run(config: CliConfig) -> Result<RunSummary, EtlError> {
    let storage = LocalStorage::new(config.output_path());
    storage.ensure_root().await?;

    let report_path = config.report_path().map(str::to_string);
    let engine = EtlEngine::new(SharePipeline::new(storage, config)?);
    let summary = engine.run().await?;

    if let Some(path) = report_path {
        write_report(&summary, &path).await?;
    }
    Ok(summary)
}
