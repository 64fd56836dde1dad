//! stylist - styling advice and same-shop alternatives for clothing links

use clap::Parser;
use colored::Colorize;

use stylist::cli::{Cli, Commands, ConfigCommands, LogFormat, ProfileCommands};
use stylist::error::Result;

mod commands;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_format);

    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(hint) = e.hint() {
            eprintln!("\n{}", hint.dimmed());
        }
        std::process::exit(1);
    }
}

/// Default filter for a `-v` count: warn, then info, debug, trace
fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "stylist=warn",
        1 => "stylist=info",
        2 => "stylist=debug",
        _ => "stylist=trace",
    }
}

/// Diagnostics go to stderr; RUST_LOG overrides the -v level
fn init_tracing(verbose: u8, format: LogFormat) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter(verbose)));

    match format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Advise {
            url,
            full,
            no_alternatives,
            json,
            profile,
        } => commands::cmd_advise(&url, full, no_alternatives, json, &profile),
        Commands::Open { app_link, json } => commands::cmd_open(&app_link, json),
        Commands::Alternatives { url, tokens, web, json } => {
            commands::cmd_alternatives(&url, tokens, web, json)
        }
        Commands::Keywords { url, tokens } => commands::cmd_keywords(&url, tokens),
        Commands::Link {
            url,
            app_url,
            no_auto,
            profile,
        } => commands::cmd_link(&url, app_url, no_auto, &profile),
        Commands::Bookmarklet { app_url } => commands::cmd_bookmarklet(app_url),

        // Profile commands
        Commands::Profile(ProfileCommands::Show { json }) => commands::cmd_profile_show(json),
        Commands::Profile(ProfileCommands::Set { profile }) => commands::cmd_profile_set(&profile),
        Commands::Profile(ProfileCommands::Setup) => commands::cmd_profile_setup(),
        Commands::Profile(ProfileCommands::Clear { yes }) => commands::cmd_profile_clear(yes),

        // Config commands
        Commands::Config(ConfigCommands::Show) => commands::cmd_config_show(),
        Commands::Config(ConfigCommands::Path) => commands::cmd_config_path(),
        Commands::Config(ConfigCommands::Init { force }) => commands::cmd_config_init(force),

        Commands::Completions { shell } => commands::cmd_completions(shell),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_levels() {
        assert_eq!(log_filter(0), "stylist=warn");
        assert_eq!(log_filter(1), "stylist=info");
        assert_eq!(log_filter(2), "stylist=debug");
        assert_eq!(log_filter(3), "stylist=trace");
        assert_eq!(log_filter(9), "stylist=trace");
    }
}
