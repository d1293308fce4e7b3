//! AdCraft campaign agent entry point.

use std::error::Error;
use std::process::ExitCode;

use adcraft_cli::app;
use adcraft_cli::config::AppConfig;
use adcraft_cli::logging;
use adcraft_cli::terminal::TerminalPrompter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // Read configuration from environment.
    let config = AppConfig::from_env()?;
    logging::init(config.log_format);

    tracing::info!(?config, "Starting AdCraft campaign agent");

    let gateway = app::build_gateway(&config);
    let mut prompter = TerminalPrompter::stdio();
    let report = app::run_conversation(&config, &gateway, &mut prompter).await?;

    let mut stdout = std::io::stdout().lock();
    app::render_report(&report, config.output, &mut stdout)?;

    Ok(if report.outcome.ad_id().is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
