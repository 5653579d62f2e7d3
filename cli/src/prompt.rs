//! Yes/no confirmation prompts

use std::io::{self, IsTerminal};

use demand::Confirm;

/// Both stdin and stdout are attached to a terminal
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

/// Ask `question`, answering `default` without prompting when not interactive.
pub fn confirm(question: &str, default: bool) -> io::Result<bool> {
    if !is_interactive() {
        return Ok(default);
    }

    Confirm::new(question)
        .affirmative("Yes")
        .negative("No")
        .selected(default)
        .run()
}
