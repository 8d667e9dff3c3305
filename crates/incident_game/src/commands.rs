//! Scripted command interpretation for the simulated shell.
//!
//! The interpreter never executes anything. A submitted line either matches
//! the stage solution (exact, or prefixed with `sudo `), or falls into a
//! small table of simulated responses.

use crate::stages::Stage;

/// Commands that "run" without resolving the incident when they are not the
/// stage solution.
const SIMULATED_ADMIN_COMMANDS: &[&str] = &[
    "chmod", "chown", "kill", "killall", "rm", "apt-get", "swapon", "modprobe", "echo",
];

pub const HELP_TEXT: &str =
    "Standard Linux commands are available (ls, cat, chmod, kill, etc.)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandReply {
    /// The line resolves the incident.
    Solved,
    /// Simulated command output to print.
    Output(String),
    /// Reveal the stage hint (costs rank).
    Hint,
    /// Wipe the terminal.
    ClearScreen,
    /// Blank line; nothing to do.
    Empty,
}

/// Interpret one trimmed line against the current stage.
pub fn interpret(input: &str, stage: &Stage) -> CommandReply {
    if is_solution(input, stage) {
        return CommandReply::Solved;
    }

    let mut words = input.split_whitespace();
    let Some(base) = words.next() else {
        return CommandReply::Empty;
    };

    match base {
        "ls" => CommandReply::Output(
            stage
                .files
                .iter()
                .map(|(path, _)| *path)
                .collect::<Vec<_>>()
                .join("  "),
        ),
        "cat" => {
            let target = words.next().unwrap_or("");
            match stage.file_contents(target) {
                Some(contents) => CommandReply::Output(contents.to_string()),
                None => CommandReply::Output(format!("cat: {target}: No such file")),
            }
        }
        "hint" => CommandReply::Hint,
        "help" => CommandReply::Output(HELP_TEXT.to_string()),
        "clear" => CommandReply::ClearScreen,
        base if SIMULATED_ADMIN_COMMANDS.contains(&base) => {
            CommandReply::Output(format!("Applied {base} but the issue persists..."))
        }
        base => CommandReply::Output(format!("sh: {base}: command not found")),
    }
}

fn is_solution(input: &str, stage: &Stage) -> bool {
    input == stage.solution
        || input
            .strip_prefix("sudo ")
            .is_some_and(|rest| rest == stage.solution)
}
