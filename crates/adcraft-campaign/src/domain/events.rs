//! Domain events for the campaign conversation.

use adcraft_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::aggregates::ConversationPhase;
use super::draft::{DraftCampaign, MusicChoice};

/// Emitted when every field of the draft has been collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftCollected {
    /// The conversation identifier.
    pub conversation_id: Uuid,
    /// The collected draft.
    pub draft: DraftCampaign,
}

/// Emitted when the draft passes every business rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignValidated {
    /// The conversation identifier.
    pub conversation_id: Uuid,
}

/// Emitted when an access token is available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authenticated {
    /// The conversation identifier.
    pub conversation_id: Uuid,
    /// Whether the platform was skipped because of demo mode.
    pub demo_bypass: bool,
}

/// Emitted when the creative's music has been settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicResolved {
    /// The conversation identifier.
    pub conversation_id: Uuid,
    /// How the music was sourced.
    pub music_choice: MusicChoice,
    /// The approved identifier, absent for campaigns without music.
    pub music_id: Option<String>,
}

/// Emitted when the platform accepted the ad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdSubmitted {
    /// The conversation identifier.
    pub conversation_id: Uuid,
    /// Identifier of the created ad.
    pub ad_id: String,
    /// Platform status string.
    pub status: String,
    /// Whether submission was skipped because of demo mode.
    pub demo_bypass: bool,
}

/// Emitted when a stage fails and the conversation stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationAborted {
    /// The conversation identifier.
    pub conversation_id: Uuid,
    /// Phase in which the failure happened.
    pub phase: ConversationPhase,
    /// Message shown to the user.
    pub reason: String,
}

/// Event type identifier for [`DraftCollected`].
pub const DRAFT_COLLECTED_EVENT_TYPE: &str = "campaign.draft_collected";

/// Event type identifier for [`CampaignValidated`].
pub const CAMPAIGN_VALIDATED_EVENT_TYPE: &str = "campaign.validated";

/// Event type identifier for [`Authenticated`].
pub const AUTHENTICATED_EVENT_TYPE: &str = "campaign.authenticated";

/// Event type identifier for [`MusicResolved`].
pub const MUSIC_RESOLVED_EVENT_TYPE: &str = "campaign.music_resolved";

/// Event type identifier for [`AdSubmitted`].
pub const AD_SUBMITTED_EVENT_TYPE: &str = "campaign.ad_submitted";

/// Event type identifier for [`ConversationAborted`].
pub const CONVERSATION_ABORTED_EVENT_TYPE: &str = "campaign.conversation_aborted";

/// Event payload variants for the campaign conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversationEventKind {
    /// The draft is complete.
    DraftCollected(DraftCollected),
    /// The draft passed validation.
    CampaignValidated(CampaignValidated),
    /// A token is available.
    Authenticated(Authenticated),
    /// Music is settled.
    MusicResolved(MusicResolved),
    /// The ad was accepted.
    AdSubmitted(AdSubmitted),
    /// The conversation stopped.
    ConversationAborted(ConversationAborted),
}

/// Domain event envelope for the campaign conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: ConversationEventKind,
}

impl ConversationEventKind {
    /// Returns the event type identifier for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::DraftCollected(_) => DRAFT_COLLECTED_EVENT_TYPE,
            Self::CampaignValidated(_) => CAMPAIGN_VALIDATED_EVENT_TYPE,
            Self::Authenticated(_) => AUTHENTICATED_EVENT_TYPE,
            Self::MusicResolved(_) => MUSIC_RESOLVED_EVENT_TYPE,
            Self::AdSubmitted(_) => AD_SUBMITTED_EVENT_TYPE,
            Self::ConversationAborted(_) => CONVERSATION_ABORTED_EVENT_TYPE,
        }
    }
}

impl DomainEvent for ConversationEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Every payload is plain data; serialization to Value cannot fail.
        serde_json::to_value(&self.kind).unwrap_or(serde_json::Value::Null)
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_event_type_follows_payload_variant() {
        let conversation_id = Uuid::new_v4();
        let event = ConversationEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: AD_SUBMITTED_EVENT_TYPE.to_owned(),
                aggregate_id: conversation_id,
                sequence_number: 5,
                occurred_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
            },
            kind: ConversationEventKind::AdSubmitted(AdSubmitted {
                conversation_id,
                ad_id: "ad_12345".to_owned(),
                status: "SUCCESS".to_owned(),
                demo_bypass: false,
            }),
        };

        assert_eq!(event.event_type(), "campaign.ad_submitted");
        let payload = event.to_payload();
        assert_eq!(payload["AdSubmitted"]["ad_id"], "ad_12345");
        assert_eq!(payload["AdSubmitted"]["demo_bypass"], false);
    }

    #[test]
    fn test_aborted_payload_records_phase_in_snake_case() {
        let conversation_id = Uuid::new_v4();
        let kind = ConversationEventKind::ConversationAborted(ConversationAborted {
            conversation_id,
            phase: ConversationPhase::ResolvingMusic,
            reason: "Bad request: Music ID is not approved for ads".to_owned(),
        });

        let payload = serde_json::to_value(&kind).unwrap();

        assert_eq!(payload["ConversationAborted"]["phase"], "resolving_music");
    }
}
