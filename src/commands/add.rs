use anyhow::Result;

use crate::cli::{AddOpts, GlobalOpts};
use crate::commands::{CommandSetup, resolve_input_path};
use crate::logging::Logger;

/// Run the `add` command.
///
/// # Errors
///
/// Returns an error if the file fails validation or the move, link, or
/// commit step fails.
pub fn run(global: &GlobalOpts, opts: &AddOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global)?;
    let source = resolve_input_path(&opts.file)?;

    log.stage(&format!("Adding {}", source.display()));
    setup.repo.add(&source, opts.encrypted)?;
    Ok(())
}
