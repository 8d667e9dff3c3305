//! Line-editing terminal runtime.
//!
//! Invariant: single output gate — only `core::output::OutputGate::flush(..)`
//! writes to the terminal.
//!
//! # Public API Overview
//! - Decode raw terminal chunks into tagged events with
//!   [`parse_editor_events`].
//! - Feed events into an [`EditorState`] and apply the returned
//!   [`DisplayInstruction`] sequence through an [`OutputGate`].
//! - Run against a real terminal via [`ProcessTerminal`], or any
//!   [`Terminal`] implementation in tests.

pub mod config;

pub mod core;
pub mod platform;

/// Abstract display instructions produced by the editor.
pub use crate::core::display::DisplayInstruction;

/// Line editor state and its transition entry point.
pub use crate::core::editor::{EditorReaction, EditorState};

/// Tagged input events and boundary decoding.
pub use crate::core::input_event::{parse_editor_events, EditorEvent};

/// Typed terminal commands and the single output gate.
pub use crate::core::output::{OutputGate, TerminalCmd};

/// Terminal interface and lifecycle guard.
pub use crate::core::terminal::{Terminal, TerminalGuard};

/// Process-backed terminal implementation.
pub use crate::platform::process_terminal::ProcessTerminal;

/// Chunk reassembly for escape sequences split across reads.
pub use crate::platform::stdin_buffer::SequenceAssembler;
