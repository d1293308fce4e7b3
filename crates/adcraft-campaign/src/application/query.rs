//! Read-only views over finished conversations.

use serde::Serialize;
use uuid::Uuid;

use crate::application::orchestrator::{AbortReason, ConversationOutcome, ConversationReport};

/// Read-only summary of a finished conversation.
#[derive(Debug, Serialize)]
pub struct ConversationView {
    /// The conversation identifier.
    pub conversation_id: Uuid,
    /// Final phase as a string (`done` or `aborted`).
    pub phase: String,
    /// Created ad identifier, if any.
    pub ad_id: Option<String>,
    /// Submission status, if any.
    pub status: Option<String>,
    /// Music identifier in the submitted payload, if any.
    pub music_id: Option<String>,
    /// Whether demo mode bypassed the platform.
    pub demo_mode: bool,
    /// Phase in which the conversation was aborted, if it was.
    pub aborted_in: Option<String>,
    /// Abort message, if aborted.
    pub abort_reason: Option<String>,
    /// Status code of the failed collaborator call, if any.
    pub error_code: Option<u16>,
    /// Event types in recorded order.
    pub events: Vec<String>,
}

impl ConversationView {
    /// Builds the view from a report.
    #[must_use]
    pub fn from_report(report: &ConversationReport) -> Self {
        let events = report
            .events
            .iter()
            .map(|event| event.metadata.event_type.clone())
            .collect();

        let mut view = Self {
            conversation_id: report.conversation_id,
            phase: report.outcome.phase().as_str().to_owned(),
            ad_id: None,
            status: None,
            music_id: None,
            demo_mode: false,
            aborted_in: None,
            abort_reason: None,
            error_code: None,
            events,
        };

        match &report.outcome {
            ConversationOutcome::Done {
                receipt,
                payload,
                demo_mode,
            } => {
                view.ad_id = Some(receipt.ad_id.clone());
                view.status = Some(receipt.status.clone());
                view.music_id.clone_from(&payload.creative.music_id);
                view.demo_mode = *demo_mode;
            }
            ConversationOutcome::Aborted { phase, reason } => {
                view.aborted_in = Some(phase.as_str().to_owned());
                view.abort_reason = Some(reason.to_string());
                if let AbortReason::Collaborator { failure, .. } = reason {
                    view.error_code = failure.code();
                }
            }
        }

        view
    }
}
