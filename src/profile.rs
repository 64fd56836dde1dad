//! Style profile - the few facts about the wearer that shape the advice.
//!
//! A default profile can be stored in `~/.config/stylist/profile.toml`; every
//! request starts from it and may override individual fields.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StylistError};

/// Implements `Display` (prompt label) and lenient query-parameter parsing
macro_rules! profile_enum {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $name {
            /// Human-readable label used in prompts and terminal output
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Parse a query-string value; case-insensitive, `None` if unknown
            pub fn parse_param(value: &str) -> Option<Self> {
                <$name as ValueEnum>::from_str(value.trim(), true).ok()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.label())
            }
        }
    };
}

/// Body shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BodyShape {
    Hourglass,
    Pear,
    Rectangle,
    Apple,
    #[default]
    Unknown,
}

profile_enum!(BodyShape {
    Hourglass => "hourglass",
    Pear => "pear",
    Rectangle => "rectangle",
    Apple => "apple",
    Unknown => "don't know",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SkinTone {
    Light,
    #[default]
    Medium,
    Dark,
}

profile_enum!(SkinTone {
    Light => "light",
    Medium => "medium",
    Dark => "dark",
});

/// Height band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HeightBand {
    /// Under 1.60m
    Short,
    /// 1.60m - 1.75m
    #[default]
    Average,
    /// Over 1.75m
    Tall,
}

profile_enum!(HeightBand {
    Short => "< 1.60m",
    Average => "1.60 - 1.75m",
    Tall => "> 1.75m",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Occasion {
    Work,
    Party,
    #[default]
    Leisure,
    Wedding,
    Date,
}

profile_enum!(Occasion {
    Work => "work",
    Party => "party",
    Leisure => "leisure",
    Wedding => "wedding",
    Date => "date",
});

/// How the wearer wants to come across
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Confident,
    Playful,
    Elegant,
    #[default]
    Casual,
    Trendy,
}

profile_enum!(Mood {
    Confident => "confident",
    Playful => "playful",
    Elegant => "elegant",
    Casual => "casual",
    Trendy => "trendy",
});

/// The wearer's profile. Every field has a neutral default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StyleProfile {
    #[serde(default)]
    pub body_shape: BodyShape,
    #[serde(default)]
    pub skin_tone: SkinTone,
    #[serde(default)]
    pub height: HeightBand,
    #[serde(default)]
    pub occasion: Occasion,
    #[serde(default)]
    pub mood: Mood,
}

/// Per-request overrides, typically from CLI flags
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileOverrides {
    pub body_shape: Option<BodyShape>,
    pub skin_tone: Option<SkinTone>,
    pub height: Option<HeightBand>,
    pub occasion: Option<Occasion>,
    pub mood: Option<Mood>,
}

impl StyleProfile {
    /// Load the saved profile, or defaults if none exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::profile_path()?)
    }

    /// Load a profile from a specific file; a missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::parse_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| StylistError::ProfileError(e.to_string()))
    }

    /// Save as the default profile
    pub fn save(&self) -> Result<()> {
        let path = Self::profile_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| StylistError::ConfigError(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Remove the saved profile. Returns whether a file was removed.
    pub fn clear() -> Result<bool> {
        let path = Self::profile_path()?;
        if path.exists() {
            std::fs::remove_file(&path)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Get the profile file path
    ///
    /// Supports STYLIST_PROFILE environment variable for test isolation
    pub fn profile_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("STYLIST_PROFILE") {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("", "", "stylist")
            .ok_or_else(|| StylistError::ConfigError("Could not determine config directory".into()))?;
        Ok(dirs.config_dir().join("profile.toml"))
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Copy of this profile with the given fields replaced
    pub fn with_overrides(mut self, overrides: &ProfileOverrides) -> Self {
        if let Some(v) = overrides.body_shape {
            self.body_shape = v;
        }
        if let Some(v) = overrides.skin_tone {
            self.skin_tone = v;
        }
        if let Some(v) = overrides.height {
            self.height = v;
        }
        if let Some(v) = overrides.occasion {
            self.occasion = v;
        }
        if let Some(v) = overrides.mood {
            self.mood = v;
        }
        self
    }

    /// Profile line for the AI prompt
    pub fn to_prompt_line(&self) -> String {
        format!(
            "figure={}, skin tone={}, height={}, occasion={}, intent={}",
            self.body_shape, self.skin_tone, self.height, self.occasion, self.mood
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let profile = StyleProfile::default();
        assert_eq!(profile.body_shape, BodyShape::Unknown);
        assert_eq!(profile.skin_tone, SkinTone::Medium);
        assert_eq!(profile.height, HeightBand::Average);
        assert_eq!(profile.occasion, Occasion::Leisure);
        assert_eq!(profile.mood, Mood::Casual);
        assert!(profile.is_default());
    }

    #[test]
    fn test_parse_param() {
        assert_eq!(BodyShape::parse_param("Pear"), Some(BodyShape::Pear));
        assert_eq!(Occasion::parse_param(" wedding "), Some(Occasion::Wedding));
        assert_eq!(HeightBand::parse_param("tall"), Some(HeightBand::Tall));
        assert_eq!(Mood::parse_param("grumpy"), None);
    }

    #[test]
    fn test_overrides() {
        let profile = StyleProfile::default().with_overrides(&ProfileOverrides {
            occasion: Some(Occasion::Work),
            mood: Some(Mood::Elegant),
            ..ProfileOverrides::default()
        });
        assert_eq!(profile.occasion, Occasion::Work);
        assert_eq!(profile.mood, Mood::Elegant);
        assert_eq!(profile.skin_tone, SkinTone::Medium);
        assert!(!profile.is_default());
    }

    #[test]
    fn test_prompt_line() {
        let line = StyleProfile::default().to_prompt_line();
        assert_eq!(
            line,
            "figure=don't know, skin tone=medium, height=1.60 - 1.75m, occasion=leisure, intent=casual"
        );
    }

    #[test]
    fn test_corrupt_profile_is_profile_error() {
        let err = StyleProfile::parse_toml("mood = \"grumpy\"").unwrap_err();
        assert!(matches!(err, StylistError::ProfileError(_)));
        assert!(err.hint().unwrap().contains("stylist profile"));
    }

    #[test]
    fn test_save_load_clear_with_path_override() {
        let path = std::env::temp_dir().join(format!("stylist-profile-{}.toml", std::process::id()));
        std::env::set_var("STYLIST_PROFILE", &path);

        assert_eq!(StyleProfile::profile_path().unwrap(), path);
        assert!(StyleProfile::load().unwrap().is_default());

        let profile = StyleProfile {
            skin_tone: SkinTone::Dark,
            ..StyleProfile::default()
        };
        profile.save().unwrap();
        assert_eq!(StyleProfile::load_from(&path).unwrap(), profile);

        assert!(StyleProfile::clear().unwrap());
        assert!(!StyleProfile::clear().unwrap());
        std::env::remove_var("STYLIST_PROFILE");
    }

    #[test]
    fn test_toml_partial() {
        let profile = StyleProfile::parse_toml("body_shape = \"apple\"\nmood = \"trendy\"").unwrap();
        assert_eq!(profile.body_shape, BodyShape::Apple);
        assert_eq!(profile.mood, Mood::Trendy);
        assert_eq!(profile.height, HeightBand::Average);
    }
}
