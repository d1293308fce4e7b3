//! The campaign draft assembled during collection.

use std::fmt;

use adcraft_core::ad::Objective;
use adcraft_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// How the creative's music is sourced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MusicChoice {
    /// Reuse a track already registered with the platform.
    Existing,
    /// Upload the user's own track.
    Custom,
    /// No music.
    #[serde(rename = "none")]
    NoMusic,
    /// Offline demonstration: every platform call is bypassed.
    Demo,
}

impl MusicChoice {
    /// Menu order; position + 1 is the menu digit.
    pub const MENU: [MusicChoice; 4] = [
        MusicChoice::Existing,
        MusicChoice::Custom,
        MusicChoice::NoMusic,
        MusicChoice::Demo,
    ];

    /// Returns the token used in payloads and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Existing => "existing",
            Self::Custom => "custom",
            Self::NoMusic => "none",
            Self::Demo => "demo",
        }
    }

    /// Returns the menu line describing this option.
    #[must_use]
    pub fn menu_label(self) -> &'static str {
        match self {
            Self::Existing => "Use existing music ID",
            Self::Custom => "Upload custom music",
            Self::NoMusic => "No music",
            Self::Demo => "Demo mode (auto-valid mock music)",
        }
    }

    /// Parses a menu digit (`1`..`4`) or an option token, ignoring ASCII case.
    #[must_use]
    pub fn from_menu_input(input: &str) -> Option<Self> {
        let by_digit = match input {
            "1" => Some(Self::Existing),
            "2" => Some(Self::Custom),
            "3" => Some(Self::NoMusic),
            "4" => Some(Self::Demo),
            _ => None,
        };
        by_digit.or_else(|| {
            Self::MENU
                .into_iter()
                .find(|choice| input.eq_ignore_ascii_case(choice.as_str()))
        })
    }

    /// Whether this choice selects demo mode.
    #[must_use]
    pub fn is_demo(self) -> bool {
        self == Self::Demo
    }
}

impl fmt::Display for MusicChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one field of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    /// `campaign_name`
    CampaignName,
    /// `objective`
    Objective,
    /// `ad_text`
    AdText,
    /// `cta`
    Cta,
    /// `music_choice`
    MusicChoice,
}

impl DraftField {
    /// Collection order.
    pub const ORDER: [DraftField; 5] = [
        DraftField::CampaignName,
        DraftField::Objective,
        DraftField::AdText,
        DraftField::Cta,
        DraftField::MusicChoice,
    ];

    /// Returns the field's wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CampaignName => "campaign_name",
            Self::Objective => "objective",
            Self::AdText => "ad_text",
            Self::Cta => "cta",
            Self::MusicChoice => "music_choice",
        }
    }
}

/// In-progress campaign record. Empty strings and `None` mean "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftCampaign {
    /// Campaign display name.
    pub campaign_name: String,
    /// Campaign objective.
    pub objective: Option<Objective>,
    /// Ad copy.
    pub ad_text: String,
    /// Call-to-action label.
    pub cta: String,
    /// Music sourcing choice.
    pub music_choice: Option<MusicChoice>,
}

impl DraftCampaign {
    /// Returns the first unset field in collection order, if any.
    #[must_use]
    pub fn first_unset_field(&self) -> Option<DraftField> {
        DraftField::ORDER.into_iter().find(|field| match field {
            DraftField::CampaignName => self.campaign_name.is_empty(),
            DraftField::Objective => self.objective.is_none(),
            DraftField::AdText => self.ad_text.is_empty(),
            DraftField::Cta => self.cta.is_empty(),
            DraftField::MusicChoice => self.music_choice.is_none(),
        })
    }

    /// Borrows the draft as a fully populated record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IncompleteDraft` naming the first unset field.
    pub fn completed(&self) -> Result<CompletedDraft<'_>, DomainError> {
        if let Some(field) = self.first_unset_field() {
            return Err(DomainError::IncompleteDraft(field.as_str()));
        }
        match (self.objective, self.music_choice) {
            (Some(objective), Some(music_choice)) => Ok(CompletedDraft {
                campaign_name: &self.campaign_name,
                objective,
                ad_text: &self.ad_text,
                cta: &self.cta,
                music_choice,
            }),
            (None, _) => Err(DomainError::IncompleteDraft(DraftField::Objective.as_str())),
            (_, None) => Err(DomainError::IncompleteDraft(
                DraftField::MusicChoice.as_str(),
            )),
        }
    }
}

/// A draft with every field set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedDraft<'a> {
    /// Campaign display name.
    pub campaign_name: &'a str,
    /// Campaign objective.
    pub objective: Objective,
    /// Ad copy.
    pub ad_text: &'a str,
    /// Call-to-action label.
    pub cta: &'a str,
    /// Music sourcing choice.
    pub music_choice: MusicChoice,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_draft() -> DraftCampaign {
        DraftCampaign {
            campaign_name: "Promo".to_owned(),
            objective: Some(Objective::Traffic),
            ad_text: "Buy now".to_owned(),
            cta: "Shop Now".to_owned(),
            music_choice: Some(MusicChoice::NoMusic),
        }
    }

    #[test]
    fn test_menu_digits_map_to_choices() {
        assert_eq!(MusicChoice::from_menu_input("1"), Some(MusicChoice::Existing));
        assert_eq!(MusicChoice::from_menu_input("2"), Some(MusicChoice::Custom));
        assert_eq!(MusicChoice::from_menu_input("3"), Some(MusicChoice::NoMusic));
        assert_eq!(MusicChoice::from_menu_input("4"), Some(MusicChoice::Demo));
    }

    #[test]
    fn test_menu_accepts_tokens_and_rejects_others() {
        assert_eq!(MusicChoice::from_menu_input("DEMO"), Some(MusicChoice::Demo));
        assert_eq!(MusicChoice::from_menu_input("none"), Some(MusicChoice::NoMusic));
        assert_eq!(MusicChoice::from_menu_input("5"), None);
        assert_eq!(MusicChoice::from_menu_input("0"), None);
        assert_eq!(MusicChoice::from_menu_input(""), None);
    }

    #[test]
    fn test_menu_input_needs_an_exact_digit() {
        assert_eq!(MusicChoice::from_menu_input("12"), None);
        assert_eq!(MusicChoice::from_menu_input("01"), None);
        assert_eq!(MusicChoice::from_menu_input("4."), None);
        assert_eq!(MusicChoice::from_menu_input("Custom"), Some(MusicChoice::Custom));
    }

    #[test]
    fn test_music_choice_serializes_as_token() {
        assert_eq!(
            serde_json::to_value(MusicChoice::NoMusic).unwrap(),
            serde_json::json!("none")
        );
        assert_eq!(
            serde_json::to_value(MusicChoice::Existing).unwrap(),
            serde_json::json!("existing")
        );
    }

    #[test]
    fn test_default_draft_reports_name_first() {
        let draft = DraftCampaign::default();
        assert_eq!(draft.first_unset_field(), Some(DraftField::CampaignName));
    }

    #[test]
    fn test_first_unset_field_follows_collection_order() {
        let mut draft = full_draft();
        draft.cta.clear();
        draft.music_choice = None;
        assert_eq!(draft.first_unset_field(), Some(DraftField::Cta));
    }

    #[test]
    fn test_completed_borrows_every_field() {
        let draft = full_draft();
        let completed = draft.completed().unwrap();
        assert_eq!(completed.campaign_name, "Promo");
        assert_eq!(completed.objective, Objective::Traffic);
        assert_eq!(completed.music_choice, MusicChoice::NoMusic);
    }

    #[test]
    fn test_completed_rejects_unset_music_choice() {
        let mut draft = full_draft();
        draft.music_choice = None;
        match draft.completed() {
            Err(DomainError::IncompleteDraft(field)) => assert_eq!(field, "music_choice"),
            other => panic!("expected IncompleteDraft, got {other:?}"),
        }
    }
}
