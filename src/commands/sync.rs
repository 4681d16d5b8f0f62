use anyhow::Result;

use crate::cli::{GlobalOpts, SyncOpts};
use crate::commands::CommandSetup;
use crate::logging::Logger;
use crate::prompt::TerminalPrompt;
use crate::repo::sync::Mode;

/// Run the `sync` command.
///
/// # Errors
///
/// Returns an error if the repository structure is invalid or an
/// unexpected filesystem failure aborts the pass.
pub fn run(global: &GlobalOpts, opts: &SyncOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global)?;

    log.stage("Syncing repository");
    let report = setup.repo.sync(Mode::Apply, opts.force, &TerminalPrompt)?;

    if report.changed() {
        log.info(&format!(
            "{} created, {} replaced, {} skipped, {} already linked",
            report.created, report.replaced, report.skipped, report.ok
        ));
    } else if report.skipped > 0 {
        log.info(&format!(
            "{} skipped, {} already linked",
            report.skipped, report.ok
        ));
    } else {
        log.info("everything up to date");
    }
    Ok(())
}
