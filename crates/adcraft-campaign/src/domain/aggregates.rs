//! Aggregate root for a single campaign conversation.

use adcraft_core::aggregate::AggregateRoot;
use adcraft_core::clock::Clock;
use adcraft_core::error::DomainError;
use adcraft_core::event::EventMetadata;
use adcraft_core::gateway::SubmissionReceipt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::draft::{DraftCampaign, MusicChoice};
use super::events::{
    AdSubmitted, Authenticated, CampaignValidated, ConversationAborted, ConversationEvent,
    ConversationEventKind, DraftCollected, MusicResolved,
};

/// Conversation phase state machine.
///
/// `Collecting → Validating → Authenticating → ResolvingMusic → Submitting → Done`,
/// with `Aborted` reachable from every non-terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationPhase {
    /// Fields are being gathered from the user.
    Collecting,
    /// Business rules are being checked.
    Validating,
    /// An access token is being obtained.
    Authenticating,
    /// The creative's music is being settled.
    ResolvingMusic,
    /// The payload is being submitted.
    Submitting,
    /// The ad was created.
    Done,
    /// A stage failed; nothing further runs.
    Aborted,
}

impl ConversationPhase {
    /// Returns the snake-case phase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Collecting => "collecting",
            Self::Validating => "validating",
            Self::Authenticating => "authenticating",
            Self::ResolvingMusic => "resolving_music",
            Self::Submitting => "submitting",
            Self::Done => "done",
            Self::Aborted => "aborted",
        }
    }

    /// Whether no further transition is possible.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }
}

/// The aggregate root for a conversation.
#[derive(Debug)]
pub struct Conversation {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    /// Current phase.
    pub(crate) phase: ConversationPhase,
    /// The collected draft (set after `DraftCollected`).
    pub(crate) draft: Option<DraftCampaign>,
    /// Resolved music identifier (set after `MusicResolved`).
    pub(crate) music_id: Option<String>,
    /// Created ad identifier (set after `AdSubmitted`).
    pub(crate) ad_id: Option<String>,
    /// User-facing abort message (set after `ConversationAborted`).
    pub(crate) abort_reason: Option<String>,
    /// Events recorded during this run.
    uncommitted_events: Vec<ConversationEvent>,
}

impl Conversation {
    /// Starts a new conversation in the `Collecting` phase.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            phase: ConversationPhase::Collecting,
            draft: None,
            music_id: None,
            ad_id: None,
            abort_reason: None,
            uncommitted_events: Vec::new(),
        }
    }

    /// Rebuilds a conversation from its event history.
    #[must_use]
    pub fn replay(id: Uuid, history: &[ConversationEvent]) -> Self {
        let mut conversation = Self::new(id);
        for event in history {
            conversation.apply(event);
        }
        conversation
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> ConversationPhase {
        self.phase
    }

    /// Returns the collected draft, once collection has finished.
    #[must_use]
    pub fn draft(&self) -> Option<&DraftCampaign> {
        self.draft.as_ref()
    }

    /// Returns the resolved music identifier, if any.
    #[must_use]
    pub fn music_id(&self) -> Option<&str> {
        self.music_id.as_deref()
    }

    /// Returns the created ad identifier, once submitted.
    #[must_use]
    pub fn ad_id(&self) -> Option<&str> {
        self.ad_id.as_deref()
    }

    /// Returns the abort message, if the conversation was aborted.
    #[must_use]
    pub fn abort_reason(&self) -> Option<&str> {
        self.abort_reason.as_deref()
    }

    fn require_phase(&self, expected: ConversationPhase) -> Result<(), DomainError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(DomainError::InvalidPhase {
                expected: expected.as_str(),
                actual: self.phase.as_str(),
            })
        }
    }

    /// Builds the event envelope, applies it and records it.
    fn raise(&mut self, kind: ConversationEventKind, clock: &dyn Clock) {
        let event = ConversationEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                aggregate_id: self.id,
                sequence_number: self.version + 1,
                occurred_at: clock.now(),
            },
            kind,
        };
        self.apply(&event);
        self.uncommitted_events.push(event);
    }

    /// Records the completed draft, moving to `Validating`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` unless in `Collecting`, and
    /// `DomainError::IncompleteDraft` if any field is still unset.
    pub fn record_draft_collected(
        &mut self,
        draft: DraftCampaign,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.require_phase(ConversationPhase::Collecting)?;
        if let Some(field) = draft.first_unset_field() {
            return Err(DomainError::IncompleteDraft(field.as_str()));
        }

        self.raise(
            ConversationEventKind::DraftCollected(DraftCollected {
                conversation_id: self.id,
                draft,
            }),
            clock,
        );
        Ok(())
    }

    /// Records that the draft passed validation, moving to `Authenticating`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` unless in `Validating`.
    pub fn record_validated(&mut self, clock: &dyn Clock) -> Result<(), DomainError> {
        self.require_phase(ConversationPhase::Validating)?;
        self.raise(
            ConversationEventKind::CampaignValidated(CampaignValidated {
                conversation_id: self.id,
            }),
            clock,
        );
        Ok(())
    }

    /// Records that a token is available, moving to `ResolvingMusic`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` unless in `Authenticating`.
    pub fn record_authenticated(
        &mut self,
        demo_bypass: bool,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.require_phase(ConversationPhase::Authenticating)?;
        self.raise(
            ConversationEventKind::Authenticated(Authenticated {
                conversation_id: self.id,
                demo_bypass,
            }),
            clock,
        );
        Ok(())
    }

    /// Records the resolved music, moving to `Submitting`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` unless in `ResolvingMusic`.
    pub fn record_music_resolved(
        &mut self,
        music_choice: MusicChoice,
        music_id: Option<String>,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.require_phase(ConversationPhase::ResolvingMusic)?;
        self.raise(
            ConversationEventKind::MusicResolved(MusicResolved {
                conversation_id: self.id,
                music_choice,
                music_id,
            }),
            clock,
        );
        Ok(())
    }

    /// Records the platform's receipt, moving to `Done`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` unless in `Submitting`.
    pub fn record_ad_submitted(
        &mut self,
        receipt: SubmissionReceipt,
        demo_bypass: bool,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.require_phase(ConversationPhase::Submitting)?;
        self.raise(
            ConversationEventKind::AdSubmitted(AdSubmitted {
                conversation_id: self.id,
                ad_id: receipt.ad_id,
                status: receipt.status,
                demo_bypass,
            }),
            clock,
        );
        Ok(())
    }

    /// Stops the conversation in its current phase, moving to `Aborted`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` if the conversation already ended.
    pub fn abort(&mut self, reason: impl Into<String>, clock: &dyn Clock) -> Result<(), DomainError> {
        if self.phase.is_terminal() {
            return Err(DomainError::InvalidPhase {
                expected: "a non-terminal phase",
                actual: self.phase.as_str(),
            });
        }
        self.raise(
            ConversationEventKind::ConversationAborted(ConversationAborted {
                conversation_id: self.id,
                phase: self.phase,
                reason: reason.into(),
            }),
            clock,
        );
        Ok(())
    }
}

impl AggregateRoot for Conversation {
    type Event = ConversationEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            ConversationEventKind::DraftCollected(payload) => {
                self.phase = ConversationPhase::Validating;
                self.draft = Some(payload.draft.clone());
            }
            ConversationEventKind::CampaignValidated(_) => {
                self.phase = ConversationPhase::Authenticating;
            }
            ConversationEventKind::Authenticated(_) => {
                self.phase = ConversationPhase::ResolvingMusic;
            }
            ConversationEventKind::MusicResolved(payload) => {
                self.phase = ConversationPhase::Submitting;
                self.music_id.clone_from(&payload.music_id);
            }
            ConversationEventKind::AdSubmitted(payload) => {
                self.phase = ConversationPhase::Done;
                self.ad_id = Some(payload.ad_id.clone());
            }
            ConversationEventKind::ConversationAborted(payload) => {
                self.phase = ConversationPhase::Aborted;
                self.abort_reason = Some(payload.reason.clone());
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn take_uncommitted_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(&mut self.uncommitted_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adcraft_core::ad::Objective;
    use adcraft_core::event::DomainEvent;
    use adcraft_test_support::FixedClock;
    use chrono::{TimeZone, Utc};

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    fn complete_draft() -> DraftCampaign {
        DraftCampaign {
            campaign_name: "Promo".to_owned(),
            objective: Some(Objective::Conversions),
            ad_text: "Buy now".to_owned(),
            cta: "Shop Now".to_owned(),
            music_choice: Some(MusicChoice::Existing),
        }
    }

    fn receipt(ad_id: &str) -> SubmissionReceipt {
        SubmissionReceipt {
            status: "SUCCESS".to_owned(),
            ad_id: ad_id.to_owned(),
        }
    }

    #[test]
    fn test_new_conversation_starts_collecting() {
        let conversation = Conversation::new(Uuid::new_v4());
        assert_eq!(conversation.phase(), ConversationPhase::Collecting);
        assert_eq!(conversation.version(), 0);
        assert!(conversation.uncommitted_events().is_empty());
    }

    #[test]
    fn test_record_draft_collected_moves_to_validating() {
        let id = Uuid::new_v4();
        let clock = fixed_clock();
        let mut conversation = Conversation::new(id);

        conversation
            .record_draft_collected(complete_draft(), &clock)
            .unwrap();

        assert_eq!(conversation.phase(), ConversationPhase::Validating);
        assert_eq!(conversation.draft(), Some(&complete_draft()));
        let events = conversation.uncommitted_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "campaign.draft_collected");
        let meta = events[0].metadata();
        assert_eq!(meta.aggregate_id, id);
        assert_eq!(meta.sequence_number, 1);
        assert_eq!(meta.occurred_at, clock.0);
    }

    #[test]
    fn test_record_draft_collected_rejects_incomplete_draft() {
        let mut conversation = Conversation::new(Uuid::new_v4());
        let draft = DraftCampaign {
            objective: None,
            ..complete_draft()
        };

        let result = conversation.record_draft_collected(draft, &fixed_clock());

        match result {
            Err(DomainError::IncompleteDraft(field)) => assert_eq!(field, "objective"),
            other => panic!("expected IncompleteDraft, got {other:?}"),
        }
        assert_eq!(conversation.phase(), ConversationPhase::Collecting);
        assert!(conversation.uncommitted_events().is_empty());
    }

    #[test]
    fn test_full_happy_path_reaches_done() {
        let clock = fixed_clock();
        let mut conversation = Conversation::new(Uuid::new_v4());

        conversation
            .record_draft_collected(complete_draft(), &clock)
            .unwrap();
        conversation.record_validated(&clock).unwrap();
        conversation.record_authenticated(false, &clock).unwrap();
        conversation
            .record_music_resolved(MusicChoice::Existing, Some("music_42".to_owned()), &clock)
            .unwrap();
        conversation
            .record_ad_submitted(receipt("ad_55555"), false, &clock)
            .unwrap();

        assert_eq!(conversation.phase(), ConversationPhase::Done);
        assert_eq!(conversation.version(), 5);
        assert_eq!(conversation.music_id(), Some("music_42"));
        assert_eq!(conversation.ad_id(), Some("ad_55555"));
        let sequence: Vec<i64> = conversation
            .uncommitted_events()
            .iter()
            .map(|e| e.metadata().sequence_number)
            .collect();
        assert_eq!(sequence, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_skipping_a_phase_returns_invalid_phase() {
        let clock = fixed_clock();
        let mut conversation = Conversation::new(Uuid::new_v4());
        conversation
            .record_draft_collected(complete_draft(), &clock)
            .unwrap();

        let result = conversation.record_authenticated(false, &clock);

        match result {
            Err(DomainError::InvalidPhase { expected, actual }) => {
                assert_eq!(expected, "authenticating");
                assert_eq!(actual, "validating");
            }
            other => panic!("expected InvalidPhase, got {other:?}"),
        }
    }

    #[test]
    fn test_abort_records_phase_and_reason() {
        let clock = fixed_clock();
        let mut conversation = Conversation::new(Uuid::new_v4());
        conversation
            .record_draft_collected(complete_draft(), &clock)
            .unwrap();
        conversation.record_validated(&clock).unwrap();

        conversation.abort("geo-restricted", &clock).unwrap();

        assert_eq!(conversation.phase(), ConversationPhase::Aborted);
        assert_eq!(conversation.abort_reason(), Some("geo-restricted"));
        match &conversation.uncommitted_events()[2].kind {
            ConversationEventKind::ConversationAborted(payload) => {
                assert_eq!(payload.phase, ConversationPhase::Authenticating);
            }
            other => panic!("expected ConversationAborted, got {other:?}"),
        }
    }

    #[test]
    fn test_no_transition_after_abort() {
        let clock = fixed_clock();
        let mut conversation = Conversation::new(Uuid::new_v4());
        conversation.abort("input closed", &clock).unwrap();

        assert!(conversation.abort("again", &clock).is_err());
        assert!(
            conversation
                .record_draft_collected(complete_draft(), &clock)
                .is_err()
        );
        assert_eq!(conversation.version(), 1);
    }

    #[test]
    fn test_replay_reconstructs_state() {
        let id = Uuid::new_v4();
        let clock = fixed_clock();
        let mut original = Conversation::new(id);
        original
            .record_draft_collected(complete_draft(), &clock)
            .unwrap();
        original.record_validated(&clock).unwrap();
        original.record_authenticated(true, &clock).unwrap();
        original
            .record_music_resolved(MusicChoice::Demo, Some("music_demo_approved_001".to_owned()), &clock)
            .unwrap();
        let history = original.take_uncommitted_events();

        let replayed = Conversation::replay(id, &history);

        assert_eq!(replayed.phase(), ConversationPhase::Submitting);
        assert_eq!(replayed.version(), 4);
        assert_eq!(replayed.music_id(), Some("music_demo_approved_001"));
        assert!(replayed.uncommitted_events().is_empty());
        assert!(original.uncommitted_events().is_empty());
    }
}
