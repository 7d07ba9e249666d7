use anyhow::Context;
use clap::Parser;
use sharelink_etl::core::etl::write_report;
use sharelink_etl::core::ConfigProvider;
use sharelink_etl::utils::{logger, validation::Validate};
use sharelink_etl::{EtlEngine, LocalStorage, SharePipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml_import")]
#[command(about = "Convert share links to config documents using a TOML configuration")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "sharelink.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Read the table and report what would be fetched without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose || config.verbose());
    }
    tracing::info!("Loaded configuration from: {}", args.config);

    config.validate().context("invalid configuration")?;

    let storage = LocalStorage::new(config.output_path());
    let report_path = config.report_path().map(str::to_string);
    let pipeline = SharePipeline::new(storage.clone(), config)?;

    if args.dry_run {
        return dry_run(&pipeline).await;
    }

    storage.ensure_root().await?;
    let summary = EtlEngine::new(pipeline).run().await?;
    if let Some(path) = report_path {
        write_report(&summary, &path).await?;
    }

    println!(
        "✅ {} of {} rows written ({} failed)",
        summary.succeeded,
        summary.total,
        summary.failure_count()
    );
    Ok(())
}

async fn dry_run<P: sharelink_etl::core::Pipeline>(pipeline: &P) -> anyhow::Result<()> {
    let rows = pipeline.extract().await?;
    println!("🔍 {} rows would be processed:", rows.len());
    for row in &rows {
        println!(
            "  [{}] {} <- {}",
            row.index,
            row.label(),
            row.viewer_link.as_deref().unwrap_or("<missing link>")
        );
    }
    Ok(())
}
