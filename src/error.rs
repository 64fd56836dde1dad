use thiserror::Error;

#[derive(Error, Debug)]
pub enum StylistError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] ureq::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Not a product link: {0}")]
    InvalidLink(String),

    #[error("No API key found in ${0}")]
    ApiKeyMissing(String),

    #[error("Chat API returned {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Chat API returned no advice: {0}")]
    EmptyResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid style profile: {0}")]
    ProfileError(String),
}

impl StylistError {
    /// Get an actionable hint for how to resolve this error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            StylistError::HttpError(_) => Some(
                "Check your internet connection, or point `api_base` in the config at a reachable endpoint"
            ),
            StylistError::InvalidLink(_) => Some(
                "Pass a full product URL, e.g.:\n  stylist advise \"https://shop.example/women/jackets/black-puffer-jacket\""
            ),
            StylistError::ApiKeyMissing(_) => Some(
                "Export your key first:\n  export OPENAI_API_KEY=sk-...\nOr set `api_key_env` in `stylist config path`"
            ),
            StylistError::ApiError { status: 401, .. } => Some(
                "The API key was rejected. Check that it is valid and has access to the configured model"
            ),
            StylistError::ApiError { status: 429, .. } => Some(
                "Rate limited. Wait a moment and try again"
            ),
            StylistError::ConfigError(_) | StylistError::TomlError(_) => Some(
                "Check your configuration with `stylist config show`"
            ),
            StylistError::ProfileError(_) => Some(
                "Fix the file shown by `stylist profile show`, or start over with `stylist profile clear`"
            ),
            StylistError::EmptyResponse(_) => Some(
                "Try again, or use --full for a longer answer"
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StylistError>;
