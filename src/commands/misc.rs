//! Miscellaneous commands: link, bookmarklet, config, completions

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;

use stylist::cli::{Cli, CompletionShell, ProfileArgs};
use stylist::config::Config;
use stylist::error::{Result, StylistError};
use stylist::profile::StyleProfile;
use stylist::request::{bookmarklet, StyleRequest};

/// App URL from the flag, else from the config
fn resolve_app_url(flag: Option<String>, config: &Config) -> Result<String> {
    flag.or_else(|| config.app_url.clone()).ok_or_else(|| {
        StylistError::ConfigError(
            "No app URL. Pass --app-url or set `app_url` in the config file".into(),
        )
    })
}

/// Print the app link for a product
pub fn cmd_link(url: &str, app_url: Option<String>, no_auto: bool, profile_args: &ProfileArgs) -> Result<()> {
    let config = Config::load()?;
    let app_url = resolve_app_url(app_url, &config)?;

    let mut request = StyleRequest::new(url, StyleProfile::default().with_overrides(&profile_args.overrides()));
    request.auto = !no_auto;
    request.validate()?;

    println!("{}", request.to_app_link(&app_url)?);
    Ok(())
}

/// Print the bookmarklet
pub fn cmd_bookmarklet(app_url: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let app_url = resolve_app_url(app_url, &config)?;
    url::Url::parse(&app_url)?;

    println!("{}", bookmarklet(&app_url));
    eprintln!(
        "\n  {}",
        "Drag this into your bookmarks bar (Ctrl+Shift+B shows it) and click it on a product page.".dimmed()
    );
    Ok(())
}

/// Show the effective configuration
pub fn cmd_config_show() -> Result<()> {
    let config = Config::load()?;
    let path = Config::config_path()?;

    println!("# {}{}", path.display(), if path.exists() { "" } else { " (not created, defaults)" });
    let content = toml::to_string_pretty(&config)
        .map_err(|e| StylistError::ConfigError(e.to_string()))?;
    println!("{}", content);

    let key_state = if std::env::var(&config.api_key_env).map(|k| !k.is_empty()).unwrap_or(false) {
        "set".green()
    } else {
        "missing".red()
    };
    println!("# ${}: {}", config.api_key_env, key_state);
    Ok(())
}

pub fn cmd_config_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

/// Write a default config file
pub fn cmd_config_init(force: bool) -> Result<()> {
    let path = Config::config_path()?;
    if path.exists() && !force {
        return Err(StylistError::ConfigError(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save()?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Generate shell completions
pub fn cmd_completions(shell: CompletionShell) -> Result<()> {
    let mut cmd = Cli::command();
    let shell = match shell {
        CompletionShell::Bash => Shell::Bash,
        CompletionShell::Zsh => Shell::Zsh,
        CompletionShell::Fish => Shell::Fish,
        CompletionShell::Powershell => Shell::PowerShell,
    };
    generate(shell, &mut cmd, "stylist", &mut io::stdout());
    Ok(())
}
