//! Prompt templating for the styling advice call

use crate::request::StyleRequest;

pub const SYSTEM_PROMPT: &str = "You are an experienced fashion stylist. Be concrete, modern, friendly and to the point. Respond only with valid JSON matching the schema provided.";

/// Longest product link we put in a prompt
const MAX_LINK_CHARS: usize = 2000;

const ADVICE_PROMPT: &str = r#"Analyze this clothing item: {{link}}
Profile: {{profile}}.
{{length}}

Respond ONLY with JSON, no other text:
{
  "headline": "One short sentence verdict",
  "assessment": ["Short assessment point", "..."],
  "combine_with": ["Item or style to combine with", "..."],
  "color_and_fit": ["Colour or fit tip for this profile", "..."]
}

Guidelines:
- Base the advice on what the link tells you (brand, product name, category)
- Tailor colour tips to the skin tone and fit tips to the figure and height
- Match the occasion and the intended impression
- No links, no prices, no markdown inside the strings"#;

const SHORT_LENGTH: &str = "Keep it super short: max 70 words in total, 3-5 bullets overall.";
const FULL_LENGTH: &str = "Keep it concise: 2-4 bullets per section.";

fn truncate_link(link: &str) -> String {
    if link.chars().count() <= MAX_LINK_CHARS {
        link.to_string()
    } else {
        link.chars().take(MAX_LINK_CHARS).collect()
    }
}

/// Build the user prompt for a request
pub fn build_prompt(request: &StyleRequest) -> String {
    let length = if request.short { SHORT_LENGTH } else { FULL_LENGTH };

    // The link goes in last so placeholders inside it stay literal
    ADVICE_PROMPT
        .replace("{{profile}}", &request.profile.to_prompt_line())
        .replace("{{length}}", length)
        .replace("{{link}}", &truncate_link(&request.link))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Mood, Occasion, StyleProfile};

    #[test]
    fn test_prompt_contains_request() {
        let profile = StyleProfile {
            occasion: Occasion::Wedding,
            mood: Mood::Elegant,
            ..StyleProfile::default()
        };
        let request = StyleRequest::new("https://shop.example/dresses/satin-midi-dress", profile);
        let prompt = build_prompt(&request);

        assert!(prompt.contains("https://shop.example/dresses/satin-midi-dress"));
        assert!(prompt.contains("occasion=wedding"));
        assert!(prompt.contains("intent=elegant"));
        assert!(prompt.contains("max 70 words"));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_full_length() {
        let mut request = StyleRequest::new("https://shop.example/a", StyleProfile::default());
        request.short = false;
        let prompt = build_prompt(&request);
        assert!(prompt.contains("2-4 bullets per section"));
        assert!(!prompt.contains("max 70 words"));
    }

    #[test]
    fn test_placeholders_in_link_stay_literal() {
        let request = StyleRequest::new(
            "https://shop.example/a/{{profile}}?x={{length}}",
            StyleProfile::default(),
        );
        let prompt = build_prompt(&request);
        assert!(prompt.contains("https://shop.example/a/{{profile}}?x={{length}}"));
        assert_eq!(prompt.matches("figure=").count(), 1);
    }

    #[test]
    fn test_long_link_truncated() {
        let link = format!("https://shop.example/{}", "a".repeat(5000));
        let request = StyleRequest::new(link, StyleProfile::default());
        let prompt = build_prompt(&request);
        assert!(prompt.len() < 4000);
    }
}
