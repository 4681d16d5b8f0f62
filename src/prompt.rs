//! Interactive yes/no confirmation as an injectable capability.
//!
//! Destructive decisions (replacing conflicting files during sync, deleting
//! emptied directories during rm, overwriting an existing repository during
//! init) go through the [`Confirm`] trait so commands can inject a terminal
//! prompt, a fixed answer (`--force`, `--quiet`), or a scripted fake in
//! tests.

use std::io::{BufRead, Write};

/// Yes/no confirmation capability.  The default answer is always **no**.
pub trait Confirm {
    /// Ask the user to confirm `msg`; `true` means "go ahead".
    fn confirm(&self, msg: &str) -> bool;
}

/// Terminal-backed prompt reading from stdin.
///
/// Prints `msg [y/N]:` and re-asks until it gets `y`/`yes`, `n`/`no`, or an
/// empty line (case-insensitive; empty means no).  EOF counts as a refusal,
/// so a closed stdin can never confirm a destructive action.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl Confirm for TerminalPrompt {
    fn confirm(&self, msg: &str) -> bool {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        loop {
            let mut input = String::new();
            print!("\x1b[1;34m{msg} [y/N]:\x1b[0m ");
            if stdout.flush().is_err() {
                return false;
            }
            if stdin.lock().read_line(&mut input).unwrap_or(0) == 0 {
                // EOF: default to no.
                println!();
                return false;
            }
            let answer = input.trim();
            if answer.is_empty()
                || answer.eq_ignore_ascii_case("n")
                || answer.eq_ignore_ascii_case("no")
            {
                return false;
            }
            if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
                return true;
            }
        }
    }
}

/// A fixed answer, used for `--force` / `--quiet` style flags and in tests.
#[derive(Debug, Clone, Copy)]
pub struct StaticAnswer(pub bool);

impl Confirm for StaticAnswer {
    fn confirm(&self, _msg: &str) -> bool {
        self.0
    }
}
