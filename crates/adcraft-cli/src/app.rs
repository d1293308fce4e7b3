//! Wiring: builds the collaborators from configuration and runs one
//! conversation.

use std::io::Write;

use adcraft_campaign::application::orchestrator::{
    ConversationOrchestrator, ConversationOutcome, ConversationReport,
};
use adcraft_campaign::application::query::ConversationView;
use adcraft_core::clock::SystemClock;
use adcraft_core::gateway::AdsGateway;
use adcraft_core::prompt::Prompter;
use adcraft_core::rng::{DeterministicRng, SeededRng};
use adcraft_gateway::simulated::SimulatedAdsGateway;
use tracing::info;

use crate::config::{AppConfig, Format};
use crate::error::AppError;

/// Builds the simulated platform described by `config`.
#[must_use]
pub fn build_gateway(config: &AppConfig) -> SimulatedAdsGateway {
    let rng: Box<dyn DeterministicRng> = match config.rng_seed {
        Some(seed) => Box::new(SeededRng::from_seed(seed)),
        None => Box::new(SeededRng::from_entropy()),
    };

    if config.simulate_failures {
        SimulatedAdsGateway::new(rng)
    } else {
        SimulatedAdsGateway::reliable(rng)
    }
}

/// Runs one full conversation against `gateway`.
///
/// # Errors
///
/// Returns `AppError::Domain` if the conversation cannot reach an outcome,
/// e.g. because the input closed.
pub async fn run_conversation(
    config: &AppConfig,
    gateway: &dyn AdsGateway,
    prompter: &mut dyn Prompter,
) -> Result<ConversationReport, AppError> {
    let clock = SystemClock;
    let mut orchestrator = ConversationOrchestrator::new(gateway, &clock);
    if let Some(timeout) = config.call_timeout {
        orchestrator = orchestrator.with_call_timeout(timeout);
    }

    let report = orchestrator.run(prompter).await?;
    info!(
        conversation_id = %report.conversation_id,
        phase = report.outcome.phase().as_str(),
        "conversation finished"
    );
    Ok(report)
}

/// Writes the final report in the requested format.
///
/// # Errors
///
/// Returns `AppError::Io` or `AppError::Serialization` if writing fails.
pub fn render_report<W: Write>(
    report: &ConversationReport,
    format: Format,
    writer: &mut W,
) -> Result<(), AppError> {
    match format {
        Format::Json => {
            let view = ConversationView::from_report(report);
            serde_json::to_writer_pretty(&mut *writer, &view)?;
            writeln!(writer)?;
        }
        Format::Text => match &report.outcome {
            ConversationOutcome::Done {
                receipt, payload, ..
            } => writeln!(
                writer,
                "Campaign '{}' submitted as {} ({}).",
                payload.campaign_name, receipt.ad_id, receipt.status
            )?,
            ConversationOutcome::Aborted { phase, reason } => writeln!(
                writer,
                "Conversation aborted while {}: {reason}",
                phase.as_str().replace('_', " ")
            )?,
        },
    }
    Ok(())
}
