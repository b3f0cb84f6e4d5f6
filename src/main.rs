use clap::Parser;
use pair_overlap::adapters::discovery::discover_input;
use pair_overlap::utils::error::ErrorSeverity;
use pair_overlap::utils::{logger, validation::Validate};
use pair_overlap::{AnalysisEngine, CliConfig, LocalStorage, OverlapError, OverlapPipeline};
use std::path::Path;

fn exit_with(e: &OverlapError) -> ! {
    tracing::error!(
        "❌ Analysis failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if std::env::var("PAIR_OVERLAP_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting pair-overlap");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // The only clock read: open end dates resolve against this unless overridden.
    let today = chrono::Local::now().date_naive();
    let mut config = cli.resolve(today).unwrap_or_else(|e| exit_with(&e));
    tracing::info!("Open end dates resolve to {}", config.reference_date);

    if config.input_path.is_empty() {
        let stdin = std::io::stdin();
        let chosen = discover_input(Path::new(&config.data_dir), stdin.lock(), std::io::stdout())
            .unwrap_or_else(|e| exit_with(&e));
        config.input_path = chosen.to_string_lossy().into_owned();
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(".".to_string());
    let pipeline = OverlapPipeline::new(storage, config);
    let engine = AnalysisEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output) => {
            tracing::info!("✅ Analysis completed successfully");
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}
