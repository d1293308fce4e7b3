//! Business-rule validation for campaign drafts.
//!
//! [`validate_campaign`] is a pure predicate. Rules are checked in a fixed
//! order and the first violated rule decides the reported reason, so the
//! order of [`ValidationRule::ORDERED`] is part of the contract.

use adcraft_core::ad::Objective;
use thiserror::Error;

use super::draft::{DraftCampaign, MusicChoice};

/// Minimum campaign name length, in characters.
pub const MIN_CAMPAIGN_NAME_LEN: usize = 3;

/// Maximum ad text length, in characters.
pub const MAX_AD_TEXT_LEN: usize = 100;

/// A single business rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationRule {
    /// Campaign name has at least [`MIN_CAMPAIGN_NAME_LEN`] characters.
    NameLength,
    /// Objective is one of the accepted objectives.
    Objective,
    /// Ad text is present.
    AdTextRequired,
    /// Ad text has at most [`MAX_AD_TEXT_LEN`] characters.
    AdTextLength,
    /// Call-to-action is present.
    CtaRequired,
    /// Conversions campaigns carry music.
    MusicForConversions,
}

impl ValidationRule {
    /// Evaluation order; first violation wins.
    pub const ORDERED: [ValidationRule; 6] = [
        ValidationRule::NameLength,
        ValidationRule::Objective,
        ValidationRule::AdTextRequired,
        ValidationRule::AdTextLength,
        ValidationRule::CtaRequired,
        ValidationRule::MusicForConversions,
    ];

    /// Returns the user-facing reason for a violation of this rule.
    #[must_use]
    pub fn reason(self) -> &'static str {
        match self {
            Self::NameLength => "Campaign name must be at least 3 characters long.",
            Self::Objective => "Objective must be either Traffic or Conversions.",
            Self::AdTextRequired => "Ad text is required.",
            Self::AdTextLength => "Ad text must be 100 characters or less.",
            Self::CtaRequired => "CTA (Call-To-Action) is required.",
            Self::MusicForConversions => {
                "Music is required for Conversions campaigns. \
                 Please choose existing or custom music."
            }
        }
    }

    fn is_violated_by(self, draft: &DraftCampaign) -> bool {
        match self {
            Self::NameLength => draft.campaign_name.chars().count() < MIN_CAMPAIGN_NAME_LEN,
            Self::Objective => draft.objective.is_none(),
            Self::AdTextRequired => draft.ad_text.is_empty(),
            Self::AdTextLength => draft.ad_text.chars().count() > MAX_AD_TEXT_LEN,
            Self::CtaRequired => draft.cta.is_empty(),
            Self::MusicForConversions => {
                draft.objective == Some(Objective::Conversions)
                    && draft.music_choice == Some(MusicChoice::NoMusic)
            }
        }
    }
}

/// A violated business rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", .rule.reason())]
pub struct ValidationFailure {
    /// The first rule the draft violated.
    pub rule: ValidationRule,
}

impl ValidationFailure {
    /// Returns the user-facing reason.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        self.rule.reason()
    }
}

/// Checks `draft` against every business rule, in order.
///
/// # Errors
///
/// Returns the first violated rule as a [`ValidationFailure`].
pub fn validate_campaign(draft: &DraftCampaign) -> Result<(), ValidationFailure> {
    match ValidationRule::ORDERED
        .into_iter()
        .find(|rule| rule.is_violated_by(draft))
    {
        Some(rule) => Err(ValidationFailure { rule }),
        None => Ok(()),
    }
}
