//! Renders a collected draft as an instruction prompt for a generation model.
//!
//! The model only formats the configuration; it is never trusted with
//! validation or business logic.

use super::draft::DraftCampaign;

/// Fixed instructions prepended to every configuration prompt.
pub const SYSTEM_PROMPT: &str = r#"You are an AI assistant that helps generate an ad campaign configuration.

STRICT RULES:
- Output ONLY valid JSON.
- Do NOT include explanations, markdown, or extra text.
- Do NOT invent fields.
- Follow the schema exactly.

BUSINESS CONSTRAINTS:
1. campaign_name is required and must be at least 3 characters.
2. objective must be one of: Traffic, Conversions.
3. creative.text is required and must be <= 100 characters.
4. creative.cta is required.
5. Music rules:
   - If objective = Conversions, music_id is REQUIRED.
   - If objective = Traffic, music_id is OPTIONAL.
6. If music is not provided, set music_id to null.

JSON SCHEMA:
{
  "campaign_name": string,
  "objective": "Traffic" | "Conversions",
  "creative": {
    "text": string,
    "cta": string,
    "music_id": string | null
  }
}
"#;

/// Builds the full prompt for `draft`. Unset fields render as `unset`.
#[must_use]
pub fn build_configuration_prompt(draft: &DraftCampaign) -> String {
    fn or_unset(value: &str) -> &str {
        if value.is_empty() { "unset" } else { value }
    }

    let objective = draft.objective.map_or("unset", |o| o.as_str());
    let music_choice = draft.music_choice.map_or("unset", |m| m.as_str());

    format!(
        "{SYSTEM_PROMPT}\nCollected Inputs:\n\
         - Campaign Name: {}\n\
         - Objective: {objective}\n\
         - Ad Text: {}\n\
         - CTA: {}\n\
         - Music Choice: {music_choice}\n",
        or_unset(&draft.campaign_name),
        or_unset(&draft.ad_text),
        or_unset(&draft.cta),
    )
}

#[cfg(test)]
mod tests {
    use adcraft_core::ad::Objective;

    use super::*;
    use crate::domain::draft::MusicChoice;

    #[test]
    fn test_prompt_starts_with_system_prompt_and_lists_inputs() {
        let draft = DraftCampaign {
            campaign_name: "Promo".to_owned(),
            objective: Some(Objective::Conversions),
            ad_text: "Buy now".to_owned(),
            cta: "Shop Now".to_owned(),
            music_choice: Some(MusicChoice::Custom),
        };

        let prompt = build_configuration_prompt(&draft);

        assert!(prompt.starts_with(SYSTEM_PROMPT));
        assert!(prompt.contains("- Campaign Name: Promo\n"));
        assert!(prompt.contains("- Objective: Conversions\n"));
        assert!(prompt.contains("- Ad Text: Buy now\n"));
        assert!(prompt.contains("- CTA: Shop Now\n"));
        assert!(prompt.contains("- Music Choice: custom\n"));
    }

    #[test]
    fn test_prompt_marks_unset_fields() {
        let prompt = build_configuration_prompt(&DraftCampaign::default());

        assert!(prompt.contains("- Campaign Name: unset\n"));
        assert!(prompt.contains("- Objective: unset\n"));
        assert!(prompt.contains("- Music Choice: unset\n"));
    }
}
