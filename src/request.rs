//! Style requests - one explicit object per piece of advice.
//!
//! The bookmarklet and browser extension hand a product over as an app link
//! (`<app-url>?u=<product>&auto=1`). Parsing that link yields a
//! [`StyleRequest`], which is then passed to the link builder and the prompt
//! builder. Nothing is remembered between requests.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::alternatives::is_product_url;
use crate::error::{Result, StylistError};
use crate::profile::{BodyShape, HeightBand, Mood, Occasion, SkinTone, StyleProfile};

pub const PARAM_LINK: &str = "u";
pub const PARAM_AUTO: &str = "auto";
pub const PARAM_SHORT: &str = "short";
pub const PARAM_BODY: &str = "body";
pub const PARAM_SKIN: &str = "skin";
pub const PARAM_HEIGHT: &str = "height";
pub const PARAM_OCCASION: &str = "occasion";
pub const PARAM_MOOD: &str = "mood";

/// Everything needed to produce advice for one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRequest {
    /// Product page URL
    pub link: String,
    /// Run the advice immediately (set by the bookmarklet)
    pub auto: bool,
    /// Ask for the short form of the advice
    pub short: bool,
    pub profile: StyleProfile,
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl StyleRequest {
    pub fn new(link: impl Into<String>, profile: StyleProfile) -> Self {
        Self {
            link: link.into().trim().to_string(),
            auto: false,
            short: true,
            profile,
        }
    }

    /// Build a request from a query string (`u=...&auto=1&mood=elegant`).
    ///
    /// Profile values that are missing or unknown keep the value from
    /// `base`. When a key repeats, the first occurrence wins.
    pub fn from_query(query: &str, base: StyleProfile) -> Self {
        let query = query.trim().trim_start_matches('?');

        let mut link: Option<String> = None;
        let mut auto: Option<bool> = None;
        let mut short: Option<bool> = None;
        let mut body: Option<Option<BodyShape>> = None;
        let mut skin: Option<Option<SkinTone>> = None;
        let mut height: Option<Option<HeightBand>> = None;
        let mut occasion: Option<Option<Occasion>> = None;
        let mut mood: Option<Option<Mood>> = None;

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                PARAM_LINK => {
                    link.get_or_insert_with(|| value.trim().to_string());
                }
                PARAM_AUTO => {
                    auto.get_or_insert(parse_flag(&value).unwrap_or(false));
                }
                PARAM_SHORT => {
                    short.get_or_insert(parse_flag(&value).unwrap_or(true));
                }
                PARAM_BODY => {
                    body.get_or_insert(BodyShape::parse_param(&value));
                }
                PARAM_SKIN => {
                    skin.get_or_insert(SkinTone::parse_param(&value));
                }
                PARAM_HEIGHT => {
                    height.get_or_insert(HeightBand::parse_param(&value));
                }
                PARAM_OCCASION => {
                    occasion.get_or_insert(Occasion::parse_param(&value));
                }
                PARAM_MOOD => {
                    mood.get_or_insert(Mood::parse_param(&value));
                }
                other => debug!(key = other, "ignoring unknown query parameter"),
            }
        }

        let profile = StyleProfile {
            body_shape: body.flatten().unwrap_or(base.body_shape),
            skin_tone: skin.flatten().unwrap_or(base.skin_tone),
            height: height.flatten().unwrap_or(base.height),
            occasion: occasion.flatten().unwrap_or(base.occasion),
            mood: mood.flatten().unwrap_or(base.mood),
        };

        Self {
            link: link.unwrap_or_default(),
            auto: auto.unwrap_or(false),
            short: short.unwrap_or(true),
            profile,
        }
    }

    /// Build a request from a full app link (`https://app.example/?u=...&auto=1`)
    pub fn from_app_link(app_link: &str, base: StyleProfile) -> Result<Self> {
        let url = Url::parse(app_link.trim())?;
        Ok(Self::from_query(url.query().unwrap_or_default(), base))
    }

    /// App link that reproduces this request. Only non-default profile fields are included.
    pub fn to_app_link(&self, app_url: &str) -> Result<String> {
        let mut url = Url::parse(app_url.trim())?;
        url.set_query(None);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair(PARAM_LINK, &self.link);
            if self.auto {
                pairs.append_pair(PARAM_AUTO, "1");
            }
            if !self.short {
                pairs.append_pair(PARAM_SHORT, "0");
            }

            let defaults = StyleProfile::default();
            let p = &self.profile;
            if p.body_shape != defaults.body_shape {
                pairs.append_pair(PARAM_BODY, &param_value(&p.body_shape));
            }
            if p.skin_tone != defaults.skin_tone {
                pairs.append_pair(PARAM_SKIN, &param_value(&p.skin_tone));
            }
            if p.height != defaults.height {
                pairs.append_pair(PARAM_HEIGHT, &param_value(&p.height));
            }
            if p.occasion != defaults.occasion {
                pairs.append_pair(PARAM_OCCASION, &param_value(&p.occasion));
            }
            if p.mood != defaults.mood {
                pairs.append_pair(PARAM_MOOD, &param_value(&p.mood));
            }
        }
        Ok(url.to_string())
    }

    /// Check that the link is something we can advise on
    pub fn validate(&self) -> Result<()> {
        if self.link.is_empty() {
            return Err(StylistError::InvalidLink("no product link given".into()));
        }
        if !is_product_url(&self.link) {
            return Err(StylistError::InvalidLink(self.link.clone()));
        }
        Ok(())
    }
}

/// Query-string name of a profile value (same as the CLI value name)
fn param_value<T: clap::ValueEnum>(value: &T) -> String {
    value
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}

/// `javascript:` bookmarklet that sends the current page to the app
pub fn bookmarklet(app_url: &str) -> String {
    format!(
        "javascript:(()=>{{location.href='{}?{}='+encodeURIComponent(location.href)+'&{}=1';}})();",
        app_url.trim().trim_end_matches('/'),
        PARAM_LINK,
        PARAM_AUTO
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query_bookmarklet_style() {
        let req = StyleRequest::from_query(
            "?u=https%3A%2F%2Fshop.example%2Fwomen%2Fcoat-12&auto=1",
            StyleProfile::default(),
        );
        assert_eq!(req.link, "https://shop.example/women/coat-12");
        assert!(req.auto);
        assert!(req.short);
        assert!(req.profile.is_default());
    }

    #[test]
    fn test_from_query_profile_and_base() {
        let base = StyleProfile {
            occasion: Occasion::Work,
            ..StyleProfile::default()
        };
        let req = StyleRequest::from_query("u=x&mood=Elegant&body=nonsense&short=0", base);
        assert_eq!(req.profile.mood, Mood::Elegant);
        assert_eq!(req.profile.occasion, Occasion::Work);
        assert_eq!(req.profile.body_shape, BodyShape::Unknown);
        assert!(!req.short);
        assert!(!req.auto);
    }

    #[test]
    fn test_first_value_wins() {
        let req = StyleRequest::from_query("u=first&u=second&auto=0&auto=1", StyleProfile::default());
        assert_eq!(req.link, "first");
        assert!(!req.auto);
    }

    #[test]
    fn test_validate() {
        assert!(StyleRequest::new("", StyleProfile::default()).validate().is_err());
        assert!(StyleRequest::new("shop.example/coat", StyleProfile::default()).validate().is_err());
        assert!(StyleRequest::new(" https://shop.example/coat ", StyleProfile::default()).validate().is_ok());
    }

    #[test]
    fn test_bookmarklet() {
        let bm = bookmarklet("https://stylist.example/");
        assert_eq!(
            bm,
            "javascript:(()=>{location.href='https://stylist.example?u='+encodeURIComponent(location.href)+'&auto=1';})();"
        );
    }

    #[test]
    fn test_param_value_matches_cli_names() {
        assert_eq!(param_value(&HeightBand::Tall), "tall");
        assert_eq!(param_value(&BodyShape::Hourglass), "hourglass");
    }
}
