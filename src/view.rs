//! View-model for a styling result, kept apart from how it is shown.

use colored::Colorize;
use serde::Serialize;

use crate::advice::Advice;
use crate::alternatives::CandidateLink;

pub const NO_ALTERNATIVES_NOTE: &str = "Alternatives appear once you use a product link.";

/// A titled list of bullets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSection {
    pub title: String,
    pub bullets: Vec<String>,
}

/// Everything a front end needs to show one result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StylingView {
    pub link: String,
    pub headline: Option<String>,
    pub sections: Vec<ViewSection>,
    pub links: Vec<CandidateLink>,
    /// Why the advice is missing, when it is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advice_error: Option<String>,
}

impl StylingView {
    /// Build the view. Sections without bullets are left out.
    pub fn new(link: &str, advice: Option<&Advice>, links: Vec<CandidateLink>) -> Self {
        let mut sections = Vec::new();
        let mut headline = None;

        if let Some(advice) = advice {
            if !advice.headline.is_empty() {
                headline = Some(advice.headline.clone());
            }
            for (title, bullets) in [
                ("Quick verdict", &advice.assessment),
                ("Combine with", &advice.combine_with),
                ("Colour & fit", &advice.color_and_fit),
            ] {
                if !bullets.is_empty() {
                    sections.push(ViewSection {
                        title: title.to_string(),
                        bullets: bullets.clone(),
                    });
                }
            }
        }

        Self {
            link: link.to_string(),
            headline,
            sections,
            links,
            advice_error: None,
        }
    }

    pub fn with_advice_error(mut self, error: impl Into<String>) -> Self {
        self.advice_error = Some(error.into());
        self
    }

    pub fn has_advice(&self) -> bool {
        self.headline.is_some() || !self.sections.is_empty()
    }

    /// Terminal rendering
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        if self.has_advice() {
            out.push_str(&format!("\n{}\n", "Styling advice".cyan().bold()));
            if let Some(headline) = &self.headline {
                out.push_str(&format!("  {}\n", headline.bold()));
            }
            for section in &self.sections {
                out.push_str(&format!("\n  {}\n", section.title.bold()));
                for bullet in &section.bullets {
                    out.push_str(&format!("    • {}\n", bullet));
                }
            }
        }

        if let Some(error) = &self.advice_error {
            out.push_str(&format!("\n  {} {}\n", "Advice unavailable:".yellow(), error));
        }

        out.push_str(&format!("\n{}\n", "Alternatives from this shop".cyan().bold()));
        if self.links.is_empty() {
            out.push_str(&format!("  {}\n", NO_ALTERNATIVES_NOTE.dimmed()));
        } else {
            for link in &self.links {
                out.push_str(&format!("  {}\n    {}\n", link.label.green(), link.url));
            }
        }

        out
    }
}
