use anyhow::Result;

use crate::cli::{GlobalOpts, RmOpts};
use crate::commands::{CommandSetup, resolve_input_path};
use crate::logging::Logger;
use crate::prompt::{Confirm, StaticAnswer, TerminalPrompt};

/// Run the `rm` command.
///
/// # Errors
///
/// Returns an error if the file is not a managed link or the restore or
/// commit step fails.
pub fn run(global: &GlobalOpts, opts: &RmOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global)?;
    let target = resolve_input_path(&opts.file)?;

    // --quiet answers every directory-cleanup prompt with yes.
    let confirm: &dyn Confirm = if opts.quiet {
        &StaticAnswer(true)
    } else {
        &TerminalPrompt
    };

    log.stage(&format!("Removing {}", target.display()));
    setup.repo.remove(&target, confirm)?;
    Ok(())
}
