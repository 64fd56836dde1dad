//! Profile commands: show, set, setup, clear

use std::fmt::Display;

use clap::ValueEnum;
use colored::Colorize;

use stylist::cli::ProfileArgs;
use stylist::error::{Result, StylistError};
use stylist::profile::{BodyShape, HeightBand, Mood, Occasion, SkinTone, StyleProfile};

fn print_profile(profile: &StyleProfile) {
    println!("    {} {}", format!("{:<10}", "Figure:").bold(), profile.body_shape);
    println!("    {} {}", format!("{:<10}", "Skin tone:").bold(), profile.skin_tone);
    println!("    {} {}", format!("{:<10}", "Height:").bold(), profile.height);
    println!("    {} {}", format!("{:<10}", "Occasion:").bold(), profile.occasion);
    println!("    {} {}", format!("{:<10}", "Mood:").bold(), profile.mood);
}

/// Show the saved default profile
pub fn cmd_profile_show(json: bool) -> Result<()> {
    let profile = StyleProfile::load()?;
    let path = StyleProfile::profile_path()?;

    if json {
        let output = serde_json::json!({
            "profile": profile,
            "path": path.to_string_lossy(),
            "saved": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("\n{}\n", "Style Profile".cyan().bold());
    println!("  Path: {}\n", path.display());
    if !path.exists() {
        println!("  {}", "(No profile saved, using defaults)".dimmed());
    }
    print_profile(&profile);
    println!("\n  Run {} to change it.\n", "stylist profile setup".yellow());
    Ok(())
}

/// Update individual fields of the saved profile
pub fn cmd_profile_set(args: &ProfileArgs) -> Result<()> {
    if args.is_empty() {
        return Err(StylistError::ConfigError(
            "Nothing to set. Use --body, --skin, --height, --occasion or --mood".into(),
        ));
    }

    let profile = StyleProfile::load()?.with_overrides(&args.overrides());
    profile.save()?;

    println!("\n  {} Profile saved\n", "✓".green());
    print_profile(&profile);
    println!();
    Ok(())
}

/// Pick one value, starting at the current one
fn select<T>(message: &str, current: T) -> Result<T>
where
    T: ValueEnum + Display + PartialEq + Clone,
{
    let options = T::value_variants().to_vec();
    let cursor = options.iter().position(|o| *o == current).unwrap_or(0);

    inquire::Select::new(message, options)
        .with_starting_cursor(cursor)
        .prompt()
        .map_err(|e| StylistError::ConfigError(e.to_string()))
}

/// Interactive guided profile setup
pub fn cmd_profile_setup() -> Result<()> {
    println!("\n{}\n", "Tell us a bit about yourself".cyan().bold());
    println!("  This is only used to tailor the advice.\n");

    let current = StyleProfile::load()?;

    let profile = StyleProfile {
        body_shape: select::<BodyShape>("Body shape:", current.body_shape)?,
        skin_tone: select::<SkinTone>("Skin tone:", current.skin_tone)?,
        height: select::<HeightBand>("Height:", current.height)?,
        occasion: select::<Occasion>("Usual occasion:", current.occasion)?,
        mood: select::<Mood>("How do you want to come across?", current.mood)?,
    };

    profile.save()?;
    println!("\n  {} Profile saved to {}\n", "✓".green(), StyleProfile::profile_path()?.display());
    Ok(())
}

/// Remove the saved profile
pub fn cmd_profile_clear(yes: bool) -> Result<()> {
    if !yes {
        use inquire::Confirm;

        let confirmed = Confirm::new("Clear your style profile?")
            .with_default(false)
            .prompt()
            .map_err(|e| StylistError::ConfigError(e.to_string()))?;

        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if StyleProfile::clear()? {
        println!("Profile cleared. Defaults will be used.");
    } else {
        println!("No saved profile.");
    }
    Ok(())
}
