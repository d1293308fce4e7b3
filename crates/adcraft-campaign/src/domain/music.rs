//! Music resolution results and demo-mode sentinels.

use adcraft_core::ad::{AdCampaign, Creative};
use serde::{Deserialize, Serialize};

use super::draft::CompletedDraft;

/// Token used in place of authentication in demo mode.
pub const DEMO_ACCESS_TOKEN: &str = "demo_access_token";

/// Pre-approved music identifier used in demo mode.
pub const DEMO_MUSIC_ID: &str = "music_demo_approved_001";

/// Ad identifier reported in demo mode.
pub const DEMO_AD_ID: &str = "ad_demo_12345";

/// Outcome of the music resolution step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMusic {
    /// Approved identifier; `None` when the campaign has no music.
    pub music_id: Option<String>,
}

impl ResolvedMusic {
    /// No music.
    #[must_use]
    pub fn absent() -> Self {
        Self { music_id: None }
    }

    /// An approved track.
    pub fn track(music_id: impl Into<String>) -> Self {
        Self {
            music_id: Some(music_id.into()),
        }
    }
}

/// Assembles the final payload from a completed draft and its resolved music.
#[must_use]
pub fn build_ad_campaign(draft: &CompletedDraft<'_>, music: ResolvedMusic) -> AdCampaign {
    AdCampaign {
        campaign_name: draft.campaign_name.to_owned(),
        objective: draft.objective,
        creative: Creative {
            text: draft.ad_text.to_owned(),
            cta: draft.cta.to_owned(),
            music_id: music.music_id,
        },
    }
}
