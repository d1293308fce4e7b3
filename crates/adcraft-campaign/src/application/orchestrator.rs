//! Conversation orchestration.
//!
//! Drives one conversation through its phases: collect the draft, validate it,
//! authenticate, resolve music, submit. Each stage returns a result and the
//! orchestrator picks the next phase from it. The first failure aborts the
//! conversation; nothing is retried.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use adcraft_core::ad::AdCampaign;
use adcraft_core::aggregate::AggregateRoot;
use adcraft_core::clock::Clock;
use adcraft_core::error::{CollaboratorFailure, DomainError, InputError};
use adcraft_core::gateway::{
    AUTHENTICATE, AccessToken, AdsGateway, SUBMISSION_SUCCESS, SUBMIT_AD, SubmissionReceipt,
    UPLOAD_CUSTOM_MUSIC, VALIDATE_MUSIC_ID,
};
use adcraft_core::prompt::Prompter;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::application::collector::FieldCollector;
use crate::application::interpreter::interpret_failure;
use crate::domain::aggregates::{Conversation, ConversationPhase};
use crate::domain::draft::{CompletedDraft, DraftCampaign, MusicChoice};
use crate::domain::events::ConversationEvent;
use crate::domain::music::{
    DEMO_ACCESS_TOKEN, DEMO_AD_ID, DEMO_MUSIC_ID, ResolvedMusic, build_ad_campaign,
};
use crate::domain::prompt_builder::build_configuration_prompt;
use crate::domain::validation::{ValidationFailure, validate_campaign};

const GREETING: [&str; 2] = [
    "Hello! I will help you create an ad campaign.",
    "Answer a few questions to get started.",
];

/// Why a conversation stopped before creating an ad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    /// The draft broke a business rule.
    Validation(ValidationFailure),
    /// A platform call failed.
    Collaborator {
        /// The gateway operation that failed.
        operation: &'static str,
        /// The classified failure.
        failure: CollaboratorFailure,
        /// The interpreted message shown to the user.
        explanation: String,
    },
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(failure) => f.write_str(failure.reason()),
            Self::Collaborator { explanation, .. } => f.write_str(explanation),
        }
    }
}

/// Final result of one conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationOutcome {
    /// The ad was created.
    Done {
        /// The platform's receipt (or the demo sentinel).
        receipt: SubmissionReceipt,
        /// The payload that was submitted.
        payload: AdCampaign,
        /// Whether every platform call was bypassed.
        demo_mode: bool,
    },
    /// A stage failed.
    Aborted {
        /// Phase in which the failure happened.
        phase: ConversationPhase,
        /// What went wrong.
        reason: AbortReason,
    },
}

impl ConversationOutcome {
    /// Returns the terminal phase this outcome corresponds to.
    #[must_use]
    pub fn phase(&self) -> ConversationPhase {
        match self {
            Self::Done { .. } => ConversationPhase::Done,
            Self::Aborted { .. } => ConversationPhase::Aborted,
        }
    }

    /// Returns the created ad identifier, if the conversation finished.
    #[must_use]
    pub fn ad_id(&self) -> Option<&str> {
        match self {
            Self::Done { receipt, .. } => Some(&receipt.ad_id),
            Self::Aborted { .. } => None,
        }
    }
}

/// Everything a finished conversation produced.
#[derive(Debug, Clone)]
pub struct ConversationReport {
    /// The conversation identifier.
    pub conversation_id: Uuid,
    /// How the conversation ended.
    pub outcome: ConversationOutcome,
    /// Events in the order they were recorded.
    pub events: Vec<ConversationEvent>,
}

/// Failure of a pipeline stage after validation.
#[derive(Debug)]
enum StageError {
    Collaborator {
        operation: &'static str,
        failure: CollaboratorFailure,
    },
    Domain(DomainError),
}

impl From<DomainError> for StageError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<InputError> for StageError {
    fn from(err: InputError) -> Self {
        Self::Domain(err.into())
    }
}

/// Drives conversations against a gateway.
///
/// Holds no per-conversation state, so one orchestrator can run any number of
/// independent conversations.
pub struct ConversationOrchestrator<'a> {
    gateway: &'a dyn AdsGateway,
    clock: &'a dyn Clock,
    call_timeout: Option<Duration>,
}

impl<'a> ConversationOrchestrator<'a> {
    /// Creates an orchestrator with no collaborator timeout.
    #[must_use]
    pub fn new(gateway: &'a dyn AdsGateway, clock: &'a dyn Clock) -> Self {
        Self {
            gateway,
            clock,
            call_timeout: None,
        }
    }

    /// Bounds every collaborator call by `timeout`. Expiry aborts the
    /// conversation with a `Timeout` failure.
    #[must_use]
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    /// Runs a full conversation: greeting, collection, then [`Self::process`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Input` if the input source closes or fails.
    pub async fn run(&self, prompter: &mut dyn Prompter) -> Result<ConversationReport, DomainError> {
        for line in GREETING {
            prompter.say(line);
        }
        prompter.say("");

        let draft = FieldCollector::new(prompter).collect_draft().await?;
        self.process(draft, prompter).await
    }

    /// Runs every stage after collection for an already collected draft.
    ///
    /// Validation failures and collaborator failures are reported as
    /// [`ConversationOutcome::Aborted`], not as errors.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IncompleteDraft` if any draft field is unset, and
    /// `DomainError::Input` if an existing music ID cannot be read.
    pub async fn process(
        &self,
        draft: DraftCampaign,
        prompter: &mut dyn Prompter,
    ) -> Result<ConversationReport, DomainError> {
        let conversation_id = Uuid::new_v4();
        let span = info_span!("conversation", %conversation_id);

        async move {
            let mut conversation = Conversation::new(conversation_id);
            debug!(prompt = %build_configuration_prompt(&draft), "configuration prompt");
            conversation.record_draft_collected(draft.clone(), self.clock)?;
            info!(
                objective = ?draft.objective,
                music_choice = ?draft.music_choice,
                "draft collected"
            );

            let outcome = self.advance(&mut conversation, &draft, prompter).await?;

            Ok::<_, DomainError>(ConversationReport {
                conversation_id,
                outcome,
                events: conversation.take_uncommitted_events(),
            })
        }
        .instrument(span)
        .await
    }

    async fn advance(
        &self,
        conversation: &mut Conversation,
        draft: &DraftCampaign,
        prompter: &mut dyn Prompter,
    ) -> Result<ConversationOutcome, DomainError> {
        prompter.say("Validating campaign data...");
        if let Err(failure) = validate_campaign(draft) {
            prompter.say(&format!("Validation failed: {failure}"));
            prompter.say("Please restart and correct the inputs.");
            return self.abort(conversation, AbortReason::Validation(failure));
        }
        prompter.say("Validation successful. Campaign data is valid.");
        conversation.record_validated(self.clock)?;
        info!("campaign validated");

        let campaign = draft.completed()?;
        match self.deliver(conversation, &campaign, prompter).await {
            Ok(outcome) => Ok(outcome),
            Err(StageError::Domain(err)) => Err(err),
            Err(StageError::Collaborator { operation, failure }) => {
                let explanation = interpret_failure(&failure);
                prompter.say(&format!("{}: {explanation}", failure_heading(operation)));
                self.abort(
                    conversation,
                    AbortReason::Collaborator {
                        operation,
                        failure,
                        explanation,
                    },
                )
            }
        }
    }

    /// Authenticates, resolves music and submits.
    ///
    /// Demo mode is an explicit shortcut: with `music_choice == demo` neither
    /// authentication nor submission reaches the gateway, so their failure
    /// paths cannot be taken.
    async fn deliver(
        &self,
        conversation: &mut Conversation,
        campaign: &CompletedDraft<'_>,
        prompter: &mut dyn Prompter,
    ) -> Result<ConversationOutcome, StageError> {
        let demo_mode = campaign.music_choice.is_demo();

        prompter.say("Authenticating with the ads platform...");
        let token = if demo_mode {
            prompter.say("Demo mode: OAuth auto-approved.");
            AccessToken::new(DEMO_ACCESS_TOKEN)
        } else {
            let token = self.call(AUTHENTICATE, self.gateway.authenticate()).await?;
            prompter.say("Authentication successful.");
            token
        };
        conversation.record_authenticated(demo_mode, self.clock)?;
        info!(demo_mode, "authenticated");

        let music = self
            .resolve_music(campaign.music_choice, &token, prompter)
            .await?;
        conversation.record_music_resolved(
            campaign.music_choice,
            music.music_id.clone(),
            self.clock,
        )?;
        info!(music_id = ?music.music_id, "music resolved");

        let payload = build_ad_campaign(campaign, music);

        prompter.say("Submitting ad to the ads platform...");
        let receipt = if demo_mode {
            prompter.say("Demo mode: Ad submitted successfully!");
            SubmissionReceipt {
                status: SUBMISSION_SUCCESS.to_owned(),
                ad_id: DEMO_AD_ID.to_owned(),
            }
        } else {
            self.call(SUBMIT_AD, self.gateway.submit_ad(&token, &payload))
                .await?
        };
        prompter.say(&format!("Ad created successfully! Ad ID: {}", receipt.ad_id));
        conversation.record_ad_submitted(receipt.clone(), demo_mode, self.clock)?;
        info!(ad_id = %receipt.ad_id, "ad submitted");

        Ok(ConversationOutcome::Done {
            receipt,
            payload,
            demo_mode,
        })
    }

    async fn resolve_music(
        &self,
        choice: MusicChoice,
        token: &AccessToken,
        prompter: &mut dyn Prompter,
    ) -> Result<ResolvedMusic, StageError> {
        match choice {
            MusicChoice::Existing => {
                let music_id = FieldCollector::new(prompter).collect_music_id().await?;
                self.call(
                    VALIDATE_MUSIC_ID,
                    self.gateway.validate_music_id(token, &music_id),
                )
                .await?;
                Ok(ResolvedMusic::track(music_id))
            }
            MusicChoice::Custom => {
                prompter.say("Uploading custom music...");
                let music_id = self
                    .call(UPLOAD_CUSTOM_MUSIC, self.gateway.upload_custom_music(token))
                    .await?;
                self.call(
                    VALIDATE_MUSIC_ID,
                    self.gateway.validate_music_id(token, &music_id),
                )
                .await?;
                Ok(ResolvedMusic::track(music_id))
            }
            MusicChoice::Demo => {
                prompter.say("Demo mode selected. Using auto-approved mock music.");
                Ok(ResolvedMusic::track(DEMO_MUSIC_ID))
            }
            MusicChoice::NoMusic => Ok(ResolvedMusic::absent()),
        }
    }

    /// Awaits one collaborator call, bounded by the configured timeout.
    async fn call<T, F>(&self, operation: &'static str, request: F) -> Result<T, StageError>
    where
        F: Future<Output = Result<T, CollaboratorFailure>>,
    {
        debug!(operation, "calling collaborator");
        let result = match self.call_timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .unwrap_or_else(|_| Err(CollaboratorFailure::timeout(operation, limit))),
            None => request.await,
        };

        result.map_err(|failure| {
            warn!(operation, %failure, "collaborator call failed");
            StageError::Collaborator { operation, failure }
        })
    }

    fn abort(
        &self,
        conversation: &mut Conversation,
        reason: AbortReason,
    ) -> Result<ConversationOutcome, DomainError> {
        let phase = conversation.phase();
        conversation.abort(reason.to_string(), self.clock)?;
        warn!(phase = phase.as_str(), %reason, "conversation aborted");
        Ok(ConversationOutcome::Aborted { phase, reason })
    }
}

fn failure_heading(operation: &str) -> &'static str {
    match operation {
        AUTHENTICATE => "OAuth Error",
        VALIDATE_MUSIC_ID | UPLOAD_CUSTOM_MUSIC => "Music Error",
        SUBMIT_AD => "Submission failed",
        _ => "Platform error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adcraft_core::ad::Objective;
    use adcraft_test_support::{FixedClock, GatewayCall, RecordingGateway, ScriptedPrompter};
    use chrono::{TimeZone, Utc};

    use crate::domain::validation::ValidationRule;

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    fn draft(objective: Objective, music_choice: MusicChoice) -> DraftCampaign {
        DraftCampaign {
            campaign_name: "Promo".to_owned(),
            objective: Some(objective),
            ad_text: "Buy now".to_owned(),
            cta: "Shop Now".to_owned(),
            music_choice: Some(music_choice),
        }
    }

    #[tokio::test]
    async fn test_validation_failure_aborts_before_any_gateway_call() {
        let gateway = RecordingGateway::succeeding();
        let clock = fixed_clock();
        let orchestrator = ConversationOrchestrator::new(&gateway, &clock);
        let mut prompter = ScriptedPrompter::empty();

        let report = orchestrator
            .process(draft(Objective::Conversions, MusicChoice::NoMusic), &mut prompter)
            .await
            .unwrap();

        match &report.outcome {
            ConversationOutcome::Aborted {
                phase,
                reason: AbortReason::Validation(failure),
            } => {
                assert_eq!(*phase, ConversationPhase::Validating);
                assert_eq!(failure.rule, ValidationRule::MusicForConversions);
            }
            other => panic!("expected validation abort, got {other:?}"),
        }
        assert!(gateway.calls().is_empty());
        assert!(
            prompter
                .output()
                .contains(&"Please restart and correct the inputs.".to_owned())
        );
        assert_eq!(report.events.len(), 2);
    }

    #[tokio::test]
    async fn test_incomplete_draft_is_a_domain_error() {
        let gateway = RecordingGateway::succeeding();
        let clock = fixed_clock();
        let orchestrator = ConversationOrchestrator::new(&gateway, &clock);
        let mut prompter = ScriptedPrompter::empty();
        let incomplete = DraftCampaign {
            music_choice: None,
            ..draft(Objective::Traffic, MusicChoice::NoMusic)
        };

        let result = orchestrator.process(incomplete, &mut prompter).await;

        assert!(matches!(
            result,
            Err(DomainError::IncompleteDraft("music_choice"))
        ));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_auth_failure_aborts_in_authenticating() {
        let gateway = RecordingGateway::succeeding().with_auth_failure(401, "Access token expired");
        let clock = fixed_clock();
        let orchestrator = ConversationOrchestrator::new(&gateway, &clock);
        let mut prompter = ScriptedPrompter::empty();

        let report = orchestrator
            .process(draft(Objective::Traffic, MusicChoice::Custom), &mut prompter)
            .await
            .unwrap();

        match &report.outcome {
            ConversationOutcome::Aborted {
                phase,
                reason: AbortReason::Collaborator { operation, .. },
            } => {
                assert_eq!(*phase, ConversationPhase::Authenticating);
                assert_eq!(*operation, AUTHENTICATE);
            }
            other => panic!("expected collaborator abort, got {other:?}"),
        }
        assert_eq!(gateway.calls(), vec![GatewayCall::Authenticate]);
        assert!(prompter.output().iter().any(|line| line.starts_with(
            "OAuth Error: Authentication failed. Your access token is invalid or expired."
        )));
    }

    #[tokio::test]
    async fn test_custom_music_uploads_then_validates() {
        let gateway = RecordingGateway::succeeding().with_uploaded_music_id("music_7777");
        let clock = fixed_clock();
        let orchestrator = ConversationOrchestrator::new(&gateway, &clock);
        let mut prompter = ScriptedPrompter::empty();

        let report = orchestrator
            .process(draft(Objective::Conversions, MusicChoice::Custom), &mut prompter)
            .await
            .unwrap();

        match &report.outcome {
            ConversationOutcome::Done { payload, .. } => {
                assert_eq!(payload.creative.music_id.as_deref(), Some("music_7777"));
            }
            other => panic!("expected Done, got {other:?}"),
        }
        assert_eq!(
            gateway.calls(),
            vec![
                GatewayCall::Authenticate,
                GatewayCall::UploadCustomMusic,
                GatewayCall::ValidateMusicId("music_7777".to_owned()),
                GatewayCall::SubmitAd("Promo".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn test_no_music_skips_music_collaborators() {
        let gateway = RecordingGateway::succeeding();
        let clock = fixed_clock();
        let orchestrator = ConversationOrchestrator::new(&gateway, &clock);
        let mut prompter = ScriptedPrompter::empty();

        let report = orchestrator
            .process(draft(Objective::Traffic, MusicChoice::NoMusic), &mut prompter)
            .await
            .unwrap();

        match &report.outcome {
            ConversationOutcome::Done {
                payload, demo_mode, ..
            } => {
                assert!(payload.creative.music_id.is_none());
                assert!(!demo_mode);
            }
            other => panic!("expected Done, got {other:?}"),
        }
        assert_eq!(
            gateway.calls(),
            vec![
                GatewayCall::Authenticate,
                GatewayCall::SubmitAd("Promo".to_owned())
            ]
        );
    }

    #[tokio::test]
    async fn test_slow_collaborator_times_out() {
        let gateway = RecordingGateway::succeeding().with_delay(Duration::from_millis(200));
        let clock = fixed_clock();
        let orchestrator = ConversationOrchestrator::new(&gateway, &clock)
            .with_call_timeout(Duration::from_millis(10));
        let mut prompter = ScriptedPrompter::empty();

        let report = orchestrator
            .process(draft(Objective::Traffic, MusicChoice::NoMusic), &mut prompter)
            .await
            .unwrap();

        match &report.outcome {
            ConversationOutcome::Aborted {
                phase,
                reason: AbortReason::Collaborator { failure, .. },
            } => {
                assert_eq!(*phase, ConversationPhase::Authenticating);
                assert_eq!(
                    *failure,
                    CollaboratorFailure::Timeout {
                        operation: AUTHENTICATE,
                        timeout_ms: 10
                    }
                );
            }
            other => panic!("expected timeout abort, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_events_carry_clock_time_and_sequence() {
        let gateway = RecordingGateway::succeeding();
        let clock = fixed_clock();
        let orchestrator = ConversationOrchestrator::new(&gateway, &clock);
        let mut prompter = ScriptedPrompter::empty();

        let report = orchestrator
            .process(draft(Objective::Traffic, MusicChoice::NoMusic), &mut prompter)
            .await
            .unwrap();

        let types: Vec<&str> = report
            .events
            .iter()
            .map(|e| e.metadata.event_type.as_str())
            .collect();
        assert_eq!(
            types,
            [
                "campaign.draft_collected",
                "campaign.validated",
                "campaign.authenticated",
                "campaign.music_resolved",
                "campaign.ad_submitted",
            ]
        );
        for (index, event) in report.events.iter().enumerate() {
            assert_eq!(event.metadata.aggregate_id, report.conversation_id);
            assert_eq!(event.metadata.sequence_number, index as i64 + 1);
            assert_eq!(event.metadata.occurred_at, clock.0);
        }
    }

    #[test]
    fn test_failure_heading_per_operation() {
        assert_eq!(failure_heading(AUTHENTICATE), "OAuth Error");
        assert_eq!(failure_heading(VALIDATE_MUSIC_ID), "Music Error");
        assert_eq!(failure_heading(UPLOAD_CUSTOM_MUSIC), "Music Error");
        assert_eq!(failure_heading(SUBMIT_AD), "Submission failed");
    }
}
