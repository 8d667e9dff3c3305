//! Terminal incident-response training game.
//!
//! Ten scripted Linux incidents on a simulated shell: read the mission,
//! inspect the virtual files, type the one command that resolves the
//! incident. Score and rank track across the run; progress persists in the
//! working directory and survives restarts of the process.
//!
//! The crate splits the way its host runtime does: `app` is the pure state
//! machine behind a `HostOps` seam, `commands` interprets submitted lines,
//! `tui` owns rendering and the line editor, `main` wires the process
//! together.

pub mod app;
pub mod article;
pub mod commands;
pub mod share;
pub mod stages;
pub mod tui;
