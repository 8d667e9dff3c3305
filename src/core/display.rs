//! Abstract display instructions emitted by the line editor.
//!
//! The editor never produces terminal control bytes; translation into a
//! concrete dialect happens in `core::output`. Counts are display cells,
//! never bytes.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayInstruction {
    /// Write a run of text at the display cursor, advancing it.
    Write(String),
    /// Move the display cursor left by `n` cells.
    MoveLeft(usize),
    /// Move the display cursor right by `n` cells.
    MoveRight(usize),
    /// Delete `n` cells at the display cursor, shifting the tail left.
    DeleteForward(usize),
    /// Erase from the display cursor to the end of the line.
    EraseToEnd,
    /// End the edited line and move to the start of the next row.
    Newline,
}
