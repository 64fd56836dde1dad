//! Advice commands: advise, open, alternatives, keywords

use colored::Colorize;
use tracing::warn;

use stylist::advice::AdviceClient;
use stylist::alternatives::{build_alternatives_with, extract_keywords_with, LinkOptions};
use stylist::cli::ProfileArgs;
use stylist::config::Config;
use stylist::error::{Result, StylistError};
use stylist::profile::StyleProfile;
use stylist::request::StyleRequest;
use stylist::view::StylingView;

/// Link options from the config, with per-command overrides
fn link_options(config: &Config, tokens: Option<u8>, web: bool) -> LinkOptions {
    let mut options = config.links.clone();
    if let Some(tokens) = tokens {
        options.keyword_tokens = tokens as usize;
    }
    options.include_web_search |= web;
    options
}

fn print_view(view: &StylingView, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        print!("{}", view.render_text());
        println!();
    }
    Ok(())
}

/// Ask for advice and show it together with the alternatives.
///
/// A failed advice call is reported but the alternatives are still shown.
fn advise(request: &StyleRequest, config: &Config, with_alternatives: bool, json: bool) -> Result<()> {
    request.validate()?;
    let client = AdviceClient::new(config)?;

    let links = if with_alternatives {
        build_alternatives_with(&request.link, &config.links)
    } else {
        Vec::new()
    };

    if !json {
        println!("\n  Asking the stylist about {}...", request.link.dimmed());
    }

    let view = match client.ask(request) {
        Ok(advice) => StylingView::new(&request.link, Some(&advice), links),
        Err(e) => {
            warn!(error = %e, "advice request failed");
            let message = match e.hint() {
                Some(hint) => format!("{}\n  {}", e, hint),
                None => e.to_string(),
            };
            StylingView::new(&request.link, None, links).with_advice_error(message)
        }
    };

    print_view(&view, json)
}

/// Get styling advice for a product link
pub fn cmd_advise(
    url: &str,
    full: bool,
    no_alternatives: bool,
    json: bool,
    profile_args: &ProfileArgs,
) -> Result<()> {
    let config = Config::load()?;
    let profile = StyleProfile::load()?.with_overrides(&profile_args.overrides());

    let mut request = StyleRequest::new(url, profile);
    request.short = !full && config.short_by_default;

    advise(&request, &config, !no_alternatives, json)
}

/// Handle an app link (`?u=...&auto=1`) as sent by the bookmarklet
pub fn cmd_open(app_link: &str, json: bool) -> Result<()> {
    let config = Config::load()?;
    let request = StyleRequest::from_app_link(app_link, StyleProfile::load()?)?;

    if request.link.is_empty() {
        return Err(StylistError::InvalidLink(format!(
            "no `u` parameter in {}",
            app_link
        )));
    }

    if !json {
        println!("\n  {} {}", "Link received:".green(), request.link);
    }

    if request.auto {
        return advise(&request, &config, true, json);
    }

    request.validate()?;
    let links = build_alternatives_with(&request.link, &config.links);
    let view = StylingView::new(&request.link, None, links);
    print_view(&view, json)?;

    if !json {
        println!(
            "  Add {} to the link, or run {} for advice.\n",
            "auto=1".yellow(),
            "stylist advise <url>".yellow()
        );
    }
    Ok(())
}

/// Show same-shop alternatives without calling the AI
pub fn cmd_alternatives(url: &str, tokens: Option<u8>, web: bool, json: bool) -> Result<()> {
    let config = Config::load()?;
    let options = link_options(&config, tokens, web);
    let links = build_alternatives_with(url, &options);

    if json {
        println!("{}", serde_json::to_string_pretty(&links)?);
        return Ok(());
    }

    let view = StylingView::new(url.trim(), None, links);
    print_view(&view, false)
}

/// Show the keyword phrase guessed from a product link
pub fn cmd_keywords(url: &str, tokens: Option<u8>) -> Result<()> {
    let config = Config::load()?;
    let options = link_options(&config, tokens, false);
    println!("{}", extract_keywords_with(url, options.keyword_tokens));
    Ok(())
}
