use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Result, StylistError};
use crate::prompt::{build_prompt, SYSTEM_PROMPT};
use crate::request::StyleRequest;

/// Bullets kept per section for short advice
pub const SHORT_MAX_BULLETS: usize = 5;
/// Bullets kept per section otherwise
pub const FULL_MAX_BULLETS: usize = 8;

pub fn max_bullets(short: bool) -> usize {
    if short {
        SHORT_MAX_BULLETS
    } else {
        FULL_MAX_BULLETS
    }
}

/// Styling advice, normalized from whatever the model sent back
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    /// One-line verdict (may be empty)
    pub headline: String,
    pub assessment: Vec<String>,
    pub combine_with: Vec<String>,
    pub color_and_fit: Vec<String>,
}

/// A field the model may send as a string, a list, or something else entirely
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Flexible {
    Text(String),
    List(Vec<serde_json::Value>),
    Other(serde::de::IgnoredAny),
}

impl Flexible {
    fn into_items(self) -> Vec<String> {
        match self {
            Flexible::Text(text) => text.lines().map(str::to_string).collect(),
            Flexible::List(values) => values
                .into_iter()
                .filter_map(|v| match v {
                    serde_json::Value::String(s) => Some(s),
                    serde_json::Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
            Flexible::Other(_) => Vec::new(),
        }
    }
}

/// Accepted keys per field, preferred first
const HEADLINE_KEYS: &[&str] = &["headline", "title", "summary"];
const ASSESSMENT_KEYS: &[&str] = &["assessment", "verdict", "review"];
const COMBINE_KEYS: &[&str] = &["combine_with", "combine", "pair_with"];
const COLOR_FIT_KEYS: &[&str] = &["color_and_fit", "colour_and_fit", "color_fit"];

/// First present key wins; the other spellings are ignored
fn take_field(map: &mut serde_json::Map<String, serde_json::Value>, keys: &[&str]) -> Option<Flexible> {
    let value = keys.iter().find_map(|key| map.remove(*key))?;
    serde_json::from_value(value).ok()
}

/// Coerce to a trimmed list of at most `max` non-empty strings
fn normalize(field: Option<Flexible>, max: usize) -> Vec<String> {
    field
        .map(Flexible::into_items)
        .unwrap_or_default()
        .iter()
        .map(|item| strip_bullet(item))
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .take(max)
        .collect()
}

fn strip_bullet(line: &str) -> &str {
    line.trim()
        .trim_start_matches(['-', '*', '•'])
        .trim()
}

impl Advice {
    pub fn is_empty(&self) -> bool {
        self.headline.is_empty()
            && self.assessment.is_empty()
            && self.combine_with.is_empty()
            && self.color_and_fit.is_empty()
    }

    /// Interpret the model's reply.
    ///
    /// JSON is preferred; markdown `## Section` / `- bullet` replies are
    /// accepted too, and anything else becomes a single assessment bullet.
    pub fn from_model_text(text: &str, max_bullets: usize) -> Result<Self> {
        let body = strip_code_fencing(text);
        if body.is_empty() {
            return Err(StylistError::EmptyResponse("empty message".into()));
        }

        match serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(&body) {
            Ok(map) => {
                let advice = Self::from_json_map(map, max_bullets);
                if !advice.is_empty() {
                    return Ok(advice);
                }
                warn!("advice JSON had no usable fields, trying markdown");
            }
            Err(e) => debug!(error = %e, "advice is not JSON, trying markdown"),
        }

        let advice = Self::from_markdown(&body, max_bullets);
        if !advice.is_empty() {
            return Ok(advice);
        }

        Ok(Self {
            assessment: vec![body.split_whitespace().collect::<Vec<_>>().join(" ")],
            ..Self::default()
        })
    }

    fn from_json_map(mut map: serde_json::Map<String, serde_json::Value>, max_bullets: usize) -> Self {
        Self {
            headline: normalize(take_field(&mut map, HEADLINE_KEYS), usize::MAX).join(" "),
            assessment: normalize(take_field(&mut map, ASSESSMENT_KEYS), max_bullets),
            combine_with: normalize(take_field(&mut map, COMBINE_KEYS), max_bullets),
            color_and_fit: normalize(take_field(&mut map, COLOR_FIT_KEYS), max_bullets),
        }
    }

    fn from_markdown(text: &str, max_bullets: usize) -> Self {
        #[derive(Clone, Copy)]
        enum Section {
            Assessment,
            Combine,
            ColorFit,
        }

        let mut advice = Self::default();
        let mut section = Section::Assessment;
        let mut structured = false;

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if let Some(heading) = trimmed.strip_prefix("##") {
                structured = true;
                let heading = heading.trim_start_matches('#').trim().to_lowercase();
                section = if heading.contains("combin") || heading.contains("pair") || heading.contains("wear with") {
                    Section::Combine
                } else if heading.contains("colo") || heading.contains("fit") {
                    Section::ColorFit
                } else {
                    Section::Assessment
                };
                continue;
            }

            if let Some(title) = trimmed.strip_prefix('#') {
                if advice.headline.is_empty() {
                    advice.headline = title.trim().to_string();
                }
                continue;
            }

            let is_bullet = trimmed.starts_with(['-', '*', '•']);
            structured |= is_bullet;
            let item = strip_bullet(trimmed).to_string();
            if item.is_empty() {
                continue;
            }
            if !is_bullet && advice.headline.is_empty() {
                advice.headline = item;
                continue;
            }

            let target = match section {
                Section::Assessment => &mut advice.assessment,
                Section::Combine => &mut advice.combine_with,
                Section::ColorFit => &mut advice.color_and_fit,
            };
            if target.len() < max_bullets {
                target.push(item);
            }
        }

        // Plain prose, or a lone title with nothing under it
        if !structured
            || (advice.assessment.is_empty() && advice.combine_with.is_empty() && advice.color_and_fit.is_empty())
        {
            return Self::default();
        }
        advice
    }
}

/// Strip markdown code fencing from a string (e.g., ```json ... ```)
/// Also handles cases where there's text before the code block
fn strip_code_fencing(s: &str) -> String {
    let trimmed = s.trim();

    if let Some(json_start) = trimmed.find("```json") {
        let after_fence = &trimmed[json_start + 7..];
        if let Some(end_fence) = after_fence.find("```") {
            return after_fence[..end_fence].trim().to_string();
        }
        return after_fence.trim().to_string();
    }

    if let Some(code_start) = trimmed.find("```\n") {
        let after_fence = &trimmed[code_start + 4..];
        if let Some(end_fence) = after_fence.find("```") {
            return after_fence[..end_fence].trim().to_string();
        }
        return after_fence.trim().to_string();
    }

    trimmed.to_string()
}

/// Pull the assistant message out of a chat-completion response
pub fn parse_completion(response: &serde_json::Value) -> Result<String> {
    if let Some(content) = response["choices"][0]["message"]["content"].as_str() {
        if !content.trim().is_empty() {
            return Ok(content.to_string());
        }
    }

    let reason = response["error"]["message"]
        .as_str()
        .or_else(|| response["choices"][0]["finish_reason"].as_str())
        .unwrap_or("no choices in response");
    Err(StylistError::EmptyResponse(reason.to_string()))
}

fn truncate_body(body: &str, max_chars: usize) -> String {
    if body.chars().count() <= max_chars {
        body.to_string()
    } else {
        format!("{}...", body.chars().take(max_chars).collect::<String>())
    }
}

/// Client for an OpenAI-compatible chat-completion API
pub struct AdviceClient {
    agent: ureq::Agent,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AdviceClient {
    /// Create a client, reading the API key from the configured environment variable
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| StylistError::ApiKeyMissing(config.api_key_env.clone()))?;
        Ok(Self::with_api_key(config, api_key))
    }

    pub fn with_api_key(config: &Config, api_key: impl Into<String>) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            endpoint: config.completions_url(),
            api_key: api_key.into(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Request body for a styling request
    pub fn request_body(&self, request: &StyleRequest) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": build_prompt(request) },
            ],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        })
    }

    /// Ask the model for advice on one product
    pub fn ask(&self, request: &StyleRequest) -> Result<Advice> {
        request.validate()?;

        info!(model = %self.model, link = %request.link, short = request.short, "requesting styling advice");

        let response = self
            .agent
            .post(&self.endpoint)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(self.request_body(request))?;

        let status = response.status();
        let text = response.into_body().read_to_string()?;

        if !status.is_success() {
            return Err(StylistError::ApiError {
                status: status.as_u16(),
                body: truncate_body(&text, 300),
            });
        }

        let value: serde_json::Value = serde_json::from_str(&text)?;
        let content = parse_completion(&value)?;
        debug!(chars = content.len(), "received advice");

        Advice::from_model_text(&content, max_bullets(request.short))
    }
}
