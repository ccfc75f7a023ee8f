use anyhow::Result;
use owo_colors::OwoColorize;
use roster_core::config::RosterConfig;

pub fn run(config: &RosterConfig) -> Result<()> {
    let config_path = RosterConfig::config_path().map_err(|e| anyhow::anyhow!(e))?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Exports:    {}", config.export_path().display());
    println!();
    println!("{}", "Backend".bold());
    println!("  Base URL:   {}", config.base_url);

    Ok(())
}
