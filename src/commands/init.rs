use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::commands::CommandSetup;
use crate::logging::Logger;
use crate::prompt::TerminalPrompt;

/// Run the `init` command.
///
/// # Errors
///
/// Returns an error if setup, directory creation, or any version-control
/// step fails.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global)?;

    log.stage("Initializing repository");
    setup.repo.init(&setup.hostname, &TerminalPrompt)?;
    Ok(())
}
