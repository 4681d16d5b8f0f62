use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::commands::CommandSetup;
use crate::logging::Logger;

/// Run the `list` command.
///
/// # Errors
///
/// Returns an error if the repository structure is invalid or the storage
/// tree cannot be read.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global)?;

    log.stage("Repository status");
    let report = setup.repo.list()?;

    log.info(&format!(
        "{} linked, {} missing, {} conflicts",
        report.ok, report.missing, report.conflicts
    ));
    Ok(())
}
