//! Typed terminal output commands and a single output gate.
//!
//! Invariant: all terminal writes must flow through `OutputGate::flush(..)`.
//! This is the only module that knows the ANSI dialect; the editor speaks
//! [`DisplayInstruction`] and nothing else.

use crate::core::display::DisplayInstruction;
use crate::core::terminal::Terminal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCmd {
    /// Raw text (UTF-8) written as-is.
    Bytes(String),
    /// Static raw text written as-is.
    BytesStatic(&'static str),
    /// Abstract editor display instruction.
    Display(DisplayInstruction),

    /// Cursor visibility.
    HideCursor,
    ShowCursor,

    /// Protocol toggles.
    BracketedPasteEnable,
    BracketedPasteDisable,

    /// Wipe the screen and home the cursor.
    ClearScreen,
}

impl TerminalCmd {
    pub fn bytes(data: impl Into<String>) -> Self {
        Self::Bytes(data.into())
    }
}

#[derive(Debug, Default)]
pub struct OutputGate {
    cmds: Vec<TerminalCmd>,
}

impl OutputGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: TerminalCmd) {
        self.cmds.push(cmd);
    }

    pub fn extend<I>(&mut self, cmds: I)
    where
        I: IntoIterator<Item = TerminalCmd>,
    {
        self.cmds.extend(cmds);
    }

    pub fn push_display<I>(&mut self, instructions: I)
    where
        I: IntoIterator<Item = DisplayInstruction>,
    {
        self.cmds
            .extend(instructions.into_iter().map(TerminalCmd::Display));
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    /// Flush buffered commands to the terminal.
    ///
    /// This is the single write gate: `Terminal::write(..)` must not be
    /// called from anywhere else.
    pub fn flush<T: Terminal>(&mut self, term: &mut T) {
        for cmd in self.cmds.drain(..) {
            match cmd {
                TerminalCmd::Bytes(data) => term.write(&data),
                TerminalCmd::BytesStatic(data) => term.write(data),
                TerminalCmd::Display(instruction) => write_instruction(term, instruction),
                TerminalCmd::HideCursor => term.write("\x1b[?25l"),
                TerminalCmd::ShowCursor => term.write("\x1b[?25h"),
                TerminalCmd::BracketedPasteEnable => term.write("\x1b[?2004h"),
                TerminalCmd::BracketedPasteDisable => term.write("\x1b[?2004l"),
                TerminalCmd::ClearScreen => term.write("\x1b[2J\x1b[H"),
            }
        }
    }
}

fn write_instruction<T: Terminal>(term: &mut T, instruction: DisplayInstruction) {
    match instruction {
        DisplayInstruction::Write(text) => {
            if !text.is_empty() {
                term.write(&text);
            }
        }
        DisplayInstruction::MoveLeft(cells) => {
            if cells > 0 {
                term.write(&format!("\x1b[{cells}D"));
            }
        }
        DisplayInstruction::MoveRight(cells) => {
            if cells > 0 {
                term.write(&format!("\x1b[{cells}C"));
            }
        }
        DisplayInstruction::DeleteForward(cells) => {
            if cells > 0 {
                term.write(&format!("\x1b[{cells}P"));
            }
        }
        DisplayInstruction::EraseToEnd => term.write("\x1b[K"),
        DisplayInstruction::Newline => term.write("\r\n"),
    }
}
