//! Terminal and environment detection.

use std::io::IsTerminal;

/// Whether stdout is attached to a terminal.
#[must_use]
pub fn stdout_is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Decide whether styled output should be produced.
///
/// `--no-color`, `NO_COLOR`, and `TERM=dumb` all switch styling off, and
/// so does a stdout that is not a terminal.
#[must_use]
pub fn should_use_color(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var("TERM").is_ok_and(|t| t == "dumb") {
        return false;
    }
    stdout_is_tty()
}
