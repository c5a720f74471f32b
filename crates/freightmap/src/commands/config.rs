use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::{API_URL_ENV, Config};

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let config = Config::load_or_default();
    let path = Config::path()?;

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();
    print!("{}", config.to_yaml()?);
    println!();
    println!(
        "{} {}",
        "Effective API URL:".bold(),
        config.resolve_api_url(None)
    );
    if std::env::var(API_URL_ENV).is_ok() {
        println!("{}", format!("({API_URL_ENV} is set)").dimmed());
    }
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!(
        "{}",
        format!("Set {key} = {value} in {}", path.display()).green()
    );
    Ok(())
}
