use std::process::ExitCode;
use std::sync::Arc;

use error_stack::ResultExt;
use grade_roster::{
    adapters::sheets::{
        auth::CredentialProvider, http_client::http_client,
        spreadsheet_manager::SpreadsheetManager,
        spreadsheet_roster_sheet::SpreadsheetRosterSheet,
    },
    config::{app_config::AppConfig, log_config::LogConfig},
    prettyprint::PrettyFormatter,
    GradingRoutine, Routine,
};
use thiserror::Error;
use tracing::{instrument, Instrument};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

#[derive(Error, Debug)]
enum AppError {
    #[error("Invalid logging configuration")]
    Logging,
    #[error("Could not obtain Google Sheets credentials")]
    Authorization,
    #[error("Grading failed")]
    Grading,
}

#[instrument(skip(config))]
async fn run(config: AppConfig) -> error_stack::Result<(), AppError> {
    let client = http_client();

    let authenticator = CredentialProvider::new(config.auth.clone(), client.clone())
        .obtain()
        .await
        .change_context(AppError::Authorization)?;

    let spreadsheet_manager = Arc::new(SpreadsheetManager::new(
        config.sheets.clone(),
        client,
        authenticator,
    ));
    let roster_sheet = Arc::new(SpreadsheetRosterSheet::new(spreadsheet_manager));
    let routine = GradingRoutine::new(config.sheets.roster_range.clone(), roster_sheet);

    routine
        .run()
        .instrument(tracing::span!(
            tracing::Level::INFO,
            "routine",
            routine = routine.name()
        ))
        .await
        .change_context(AppError::Grading)?;

    tracing::info!("✅ {}: OK", routine.name());
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(report) => {
            eprintln!("[CONFIG ERROR] {:?}", report);
            return ExitCode::FAILURE;
        }
    };

    if let Err(report) = setup_tracing(&config.log) {
        eprintln!("{:?}", report);
        return ExitCode::FAILURE;
    }
    setup_panic_hook();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            tracing::error!("❌ {:?}", report);
            ExitCode::FAILURE
        }
    }
}

fn setup_tracing(config: &LogConfig) -> error_stack::Result<(), AppError> {
    let level = config
        .level
        .parse::<tracing::Level>()
        .change_context(AppError::Logging)
        .attach_printable_lazy(|| format!("Unknown log level {:?}", config.level))?;

    let log_file = std::fs::File::create(&config.file)
        .change_context(AppError::Logging)
        .attach_printable_lazy(|| format!("Cannot create log file {}", config.file.display()))?;

    let indicatif_layer = IndicatifLayer::new();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(indicatif_layer.get_stderr_writer());

    let log_file_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(false))
        .with_writer(log_file)
        .with_ansi(false);

    Registry::default()
        .with(tracing_subscriber::filter::Targets::new().with_target("grade_roster", level))
        .with(indicatif_layer)
        .with(log_file_layer)
        .with(stdout_layer)
        .init();

    Ok(())
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}
