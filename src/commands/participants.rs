use std::path::PathBuf;

use anyhow::{Context, Result};
use dialoguer::Select;
use owo_colors::OwoColorize;
use roster_core::client::Client;
use roster_core::config::RosterConfig;
use roster_core::error::RosterError;
use roster_core::table::PLACEHOLDER_OPTION;
use roster_core::workflow::ParticipantWorkflow;
use tracing::debug;

use super::open_session;
use crate::render;
use crate::utils::tui::{create_spinner, spin_while};

pub struct Options {
    pub event: Option<String>,
    pub export: bool,
    pub output: Option<PathBuf>,
    pub json: bool,
}

pub async fn run(config: &RosterConfig, options: Options) -> Result<()> {
    let mut workflow = open_session(config, options.json).await?;

    let event_id = match options.event {
        Some(id) => id,
        None => pick_event(&workflow)?,
    };

    if let Err(err) = workflow.select_event(&event_id) {
        if let RosterError::UnknownEvent(_) = err {
            let available: Vec<_> = workflow.options().into_iter().map(|o| o.value).collect();
            anyhow::bail!(
                "Event '{}' not found. Available: {}",
                event_id,
                available.join(", ")
            );
        }
        return Err(err.into());
    }

    debug!(event_id = %event_id, "Event selected");
    spin_while("Fetching participants", workflow.submit()).await?;

    if let Some(error) = workflow.state().error() {
        anyhow::bail!("{}", error.red());
    }

    if options.json {
        println!(
            "{}",
            serde_json::to_string_pretty(workflow.state().participants())?
        );
    } else {
        println!("{}", render::participants_table(&workflow.rows()));
    }

    if options.export {
        let dir = options.output.unwrap_or_else(|| config.export_path());
        export(&mut workflow, dir)?;
    }

    Ok(())
}

/// Interactive event picker. The placeholder entry cannot be submitted.
fn pick_event(workflow: &ParticipantWorkflow<Client>) -> Result<String> {
    let options = workflow.options();
    if options.is_empty() {
        anyhow::bail!("No events available");
    }

    let items: Vec<String> = std::iter::once(PLACEHOLDER_OPTION.to_string())
        .chain(options.iter().map(|o| o.label.clone()))
        .collect();

    loop {
        let selection = Select::new()
            .with_prompt("Select Event")
            .items(&items)
            .default(0)
            .interact()
            .context("Event selection cancelled")?;

        match selection.checked_sub(1).and_then(|i| options.get(i)) {
            Some(option) => return Ok(option.value.clone()),
            None => println!("{}", "Choose an event to get its participants".dimmed()),
        }
    }
}

fn export(workflow: &mut ParticipantWorkflow<Client>, dir: PathBuf) -> Result<()> {
    if !workflow.can_export() {
        println!("\n{}", "No participants to export".dimmed());
        return Ok(());
    }

    let spinner = create_spinner("Writing spreadsheet");
    let result = workflow.export_to(&dir);
    spinner.finish_and_clear();

    let path = result.with_context(|| format!("Failed to export to {}", dir.display()))?;
    println!("\nSaved {}", path.display().green());

    Ok(())
}
