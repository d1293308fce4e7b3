//! Field collection: prompt until the answer is syntactically acceptable.

use adcraft_core::ad::Objective;
use adcraft_core::error::InputError;
use adcraft_core::prompt::Prompter;
use tracing::debug;

use crate::domain::draft::{DraftCampaign, MusicChoice};

const CAMPAIGN_NAME_LABEL: &str = "Enter Campaign Name";
const OBJECTIVE_LABEL: &str = "Objective (Traffic / Conversions)";
const AD_TEXT_LABEL: &str = "Enter Ad Text (max 100 chars)";
const CTA_LABEL: &str = "Enter Call-To-Action (e.g., Shop Now)";
const MUSIC_CHOICE_LABEL: &str = "Choose an option (1 / 2 / 3 / 4)";
const MUSIC_ID_LABEL: &str = "Enter existing Music ID";

const OBJECTIVE_CORRECTION: &str = "Please enter either 'Traffic' or 'Conversions'.";
const MUSIC_CHOICE_CORRECTION: &str = "Invalid choice. Please select 1, 2, 3, or 4.";

/// Collects draft fields one at a time through a [`Prompter`].
pub struct FieldCollector<'p> {
    prompter: &'p mut dyn Prompter,
}

impl<'p> FieldCollector<'p> {
    /// Creates a collector reading from `prompter`.
    pub fn new(prompter: &'p mut dyn Prompter) -> Self {
        Self { prompter }
    }

    /// Prompts with `label` until `accept` returns `Ok` for the trimmed input.
    ///
    /// Each rejection writes the correction returned by `accept` and asks
    /// again. There is no retry limit.
    ///
    /// # Errors
    ///
    /// Returns `InputError` if the input source closes or fails.
    pub async fn collect<T, F>(&mut self, label: &str, accept: F) -> Result<T, InputError>
    where
        F: Fn(&str) -> Result<T, String>,
    {
        loop {
            let raw = self.prompter.ask(label).await?;
            match accept(raw.trim()) {
                Ok(value) => return Ok(value),
                Err(correction) => {
                    debug!(label, "rejected input");
                    self.prompter.say(&correction);
                }
            }
        }
    }

    /// Collects every draft field in order: name, objective, ad text, CTA,
    /// music choice.
    ///
    /// # Errors
    ///
    /// Returns `InputError` if the input source closes or fails.
    pub async fn collect_draft(&mut self) -> Result<DraftCampaign, InputError> {
        let mut draft = DraftCampaign::default();

        draft.campaign_name = self
            .collect(CAMPAIGN_NAME_LABEL, non_empty("Campaign name"))
            .await?;
        draft.objective = Some(self.collect(OBJECTIVE_LABEL, accept_objective).await?);
        draft.ad_text = self.collect(AD_TEXT_LABEL, non_empty("Ad text")).await?;
        draft.cta = self.collect(CTA_LABEL, non_empty("Call-To-Action")).await?;

        self.prompter.say("");
        self.prompter.say("Music Options:");
        for (index, choice) in MusicChoice::MENU.into_iter().enumerate() {
            self.prompter
                .say(&format!("{}. {}", index + 1, choice.menu_label()));
        }
        draft.music_choice = Some(self.collect(MUSIC_CHOICE_LABEL, accept_music_choice).await?);

        Ok(draft)
    }

    /// Collects the identifier of an already registered track.
    ///
    /// # Errors
    ///
    /// Returns `InputError` if the input source closes or fails.
    pub async fn collect_music_id(&mut self) -> Result<String, InputError> {
        self.collect(MUSIC_ID_LABEL, non_empty("Music ID")).await
    }
}

/// Accepts any non-empty answer; the correction names the field.
fn non_empty(field: &'static str) -> impl Fn(&str) -> Result<String, String> {
    move |input| {
        if input.is_empty() {
            Err(format!("{field} cannot be empty."))
        } else {
            Ok(input.to_owned())
        }
    }
}

fn accept_objective(input: &str) -> Result<Objective, String> {
    input
        .parse::<Objective>()
        .map_err(|_| OBJECTIVE_CORRECTION.to_owned())
}

fn accept_music_choice(input: &str) -> Result<MusicChoice, String> {
    MusicChoice::from_menu_input(input).ok_or_else(|| MUSIC_CHOICE_CORRECTION.to_owned())
}
