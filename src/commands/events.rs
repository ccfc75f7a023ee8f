use anyhow::Result;
use owo_colors::OwoColorize;
use roster_core::config::RosterConfig;

use super::open_session;
use crate::render::Render;

pub async fn run(config: &RosterConfig) -> Result<()> {
    let workflow = open_session(config, false).await?;
    let options = workflow.options();

    if options.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for option in &options {
        println!("{}", option.render());
    }

    Ok(())
}
