//! Ad campaign payload types shared by the conversation and the gateway.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The advertising objective of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Objective {
    /// Drive visits to a destination.
    Traffic,
    /// Drive purchases or sign-ups.
    Conversions,
}

impl Objective {
    /// Every accepted objective, in menu order.
    pub const ALL: [Objective; 2] = [Objective::Traffic, Objective::Conversions];

    /// Returns the canonical label sent to the platform.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Traffic => "Traffic",
            Self::Conversions => "Conversions",
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a label is not a known objective.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown objective: {0:?}")]
pub struct UnknownObjective(pub String);

impl FromStr for Objective {
    type Err = UnknownObjective;

    /// Parses an objective label, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|objective| objective.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownObjective(s.to_owned()))
    }
}

/// Creative block of an ad: the copy, call-to-action and optional music.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creative {
    /// Ad copy.
    pub text: String,
    /// Call-to-action label.
    pub cta: String,
    /// Approved music identifier; `None` serializes as `null`.
    pub music_id: Option<String>,
}

/// Final payload submitted to the advertising platform.
///
/// Built once after music resolution and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdCampaign {
    /// Campaign display name.
    pub campaign_name: String,
    /// Campaign objective.
    pub objective: Objective,
    /// Creative block.
    pub creative: Creative,
}

impl AdCampaign {
    /// Serializes the campaign into the JSON body expected by the platform.
    #[must_use]
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "campaign_name": self.campaign_name,
            "objective": self.objective.as_str(),
            "creative": {
                "text": self.creative.text,
                "cta": self.creative.cta,
                "music_id": self.creative.music_id,
            },
        })
    }
}
