pub mod config;
pub mod events;
pub mod participants;

use anyhow::Result;
use owo_colors::OwoColorize;
use roster_core::client::Client;
use roster_core::config::RosterConfig;
use roster_core::workflow::ParticipantWorkflow;

use crate::render;
use crate::utils::tui::spin_while;

/// Open a workflow session: print the banner (unless `quiet`) and load the
/// event catalog.
///
/// A catalog failure ends the command with the session's error message.
pub async fn open_session(
    config: &RosterConfig,
    quiet: bool,
) -> Result<ParticipantWorkflow<Client>> {
    if !quiet {
        println!("{}\n", render::banner());
    }

    let mut workflow = ParticipantWorkflow::new(config.client());

    spin_while("Loading events", workflow.mount()).await;

    if let Some(error) = workflow.state().error() {
        anyhow::bail!("{}", error.red());
    }

    Ok(workflow)
}
