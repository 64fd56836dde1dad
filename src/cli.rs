use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::profile::{BodyShape, HeightBand, Mood, Occasion, ProfileOverrides, SkinTone};

/// Shell types for completion generation
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Log output format
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "stylist")]
#[command(author, version, about = "Styling advice and same-shop alternatives for any clothing link", long_about = None)]
#[command(after_help = r#"Examples:
  stylist advise "https://shop.example/women/jackets/black-puffer-jacket-98213"
  stylist advise "<product url>" --occasion work --mood elegant
  stylist alternatives "<product url>"                 Links only, no AI call
  stylist open "https://my-stylist.example/?u=...&auto=1"
  stylist profile setup                                Save your default profile

Quick Start:
  1. export OPENAI_API_KEY=sk-...
  2. stylist profile setup
  3. stylist advise "<product url>"
"#)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log format for diagnostics on stderr
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Profile fields that can be overridden for a single request
#[derive(Args, Debug, Clone, Default)]
pub struct ProfileArgs {
    /// Body shape
    #[arg(long, value_enum)]
    pub body: Option<BodyShape>,

    /// Skin tone
    #[arg(long, value_enum)]
    pub skin: Option<SkinTone>,

    /// Height band (short: < 1.60m, average: 1.60 - 1.75m, tall: > 1.75m)
    #[arg(long, value_enum)]
    pub height: Option<HeightBand>,

    /// What you are dressing for
    #[arg(long, value_enum)]
    pub occasion: Option<Occasion>,

    /// How you want to come across
    #[arg(long, value_enum)]
    pub mood: Option<Mood>,
}

impl ProfileArgs {
    pub fn overrides(&self) -> ProfileOverrides {
        ProfileOverrides {
            body_shape: self.body,
            skin_tone: self.skin,
            height: self.height,
            occasion: self.occasion,
            mood: self.mood,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_none()
            && self.skin.is_none()
            && self.height.is_none()
            && self.occasion.is_none()
            && self.mood.is_none()
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Get styling advice and shop alternatives for a product link
    #[command(after_help = r#"Examples:
  stylist advise "https://shop.example/women/jackets/black-puffer-jacket-98213"
  stylist advise "<url>" --full                 Longer advice
  stylist advise "<url>" --body pear --skin light --occasion wedding
  stylist advise "<url>" --json                 Output as JSON
"#)]
    Advise {
        /// Product page URL
        #[arg(value_name = "URL")]
        url: String,

        /// Ask for longer advice instead of the short form
        #[arg(long)]
        full: bool,

        /// Skip the shop alternatives
        #[arg(long)]
        no_alternatives: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Handle an app link from the bookmarklet or browser extension
    #[command(after_help = r#"Examples:
  stylist open "https://my-stylist.example/?u=https%3A%2F%2Fshop.example%2Fcoat&auto=1"

Without auto=1 only the shop alternatives are shown.
"#)]
    Open {
        /// App link carrying the product URL in its `u` parameter
        #[arg(value_name = "APP_LINK")]
        app_link: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show same-shop alternative links for a product (no AI call)
    Alternatives {
        /// Product page URL
        #[arg(value_name = "URL")]
        url: String,

        /// Keyword tokens to keep from the product slug (3-8)
        #[arg(long, value_parser = clap::value_parser!(u8).range(3..=8))]
        tokens: Option<u8>,

        /// Also offer a site-scoped web search
        #[arg(long)]
        web: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the search keywords guessed from a product link
    Keywords {
        /// Product page URL
        #[arg(value_name = "URL")]
        url: String,

        /// Keyword tokens to keep from the product slug (3-8)
        #[arg(long, value_parser = clap::value_parser!(u8).range(3..=8))]
        tokens: Option<u8>,
    },

    /// Build an app link for a product (what the bookmarklet would open)
    Link {
        /// Product page URL
        #[arg(value_name = "URL")]
        url: String,

        /// Stylist app URL (defaults to `app_url` from the config)
        #[arg(long)]
        app_url: Option<String>,

        /// Do not set auto=1
        #[arg(long)]
        no_auto: bool,

        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Print a bookmarklet that sends the current page to the app
    Bookmarklet {
        /// Stylist app URL (defaults to `app_url` from the config)
        #[arg(long)]
        app_url: Option<String>,
    },

    /// Manage your default style profile
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Inspect or create the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(after_help = r#"Examples:
  stylist completions bash >> ~/.bashrc           Add bash completions
  stylist completions zsh >> ~/.zshrc             Add zsh completions
  stylist completions fish > ~/.config/fish/completions/stylist.fish
"#)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show your default profile
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change fields of your default profile
    #[command(after_help = r#"Examples:
  stylist profile set --body hourglass --skin dark
  stylist profile set --occasion work
"#)]
    Set {
        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Interactive guided profile setup
    Setup,

    /// Remove your saved profile (back to defaults)
    Clear {
        /// Skip confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
