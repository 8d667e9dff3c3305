//! Game state machine.
//!
//! `App` is pure: no terminal, no filesystem, no escape codes. Side effects
//! flow through [`HostOps`], which the session component implements and tests
//! replace with a spy.

use crate::commands::{interpret, CommandReply};
use crate::share::share_url;
use crate::stages::{Stage, STAGES};

pub const SOLVE_BONUS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accepting commands against the current stage.
    Playing,
    /// Article shown; next submit advances.
    StageClear,
    /// All stages resolved; result screen shown.
    Finished,
}

/// Fields the host persists between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub stage_index: usize,
    pub score: u32,
    pub hint_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u32,
    pub rank: &'static str,
    pub share_url: String,
}

pub trait HostOps {
    fn write_output(&mut self, text: &str);
    fn show_stage_banner(&mut self, stage_number: usize, stage: &Stage);
    fn show_hint(&mut self, hint: &str);
    fn show_solved(&mut self, article: &str);
    fn show_result(&mut self, summary: &GameSummary);
    fn clear_screen(&mut self);
    fn save_progress(&mut self, snapshot: ProgressSnapshot);
    fn clear_progress(&mut self);
    fn request_stop(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    stage_index: usize,
    score: u32,
    hint_count: u32,
    phase: Phase,
    pub should_exit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            stage_index: 0,
            score: 0,
            hint_count: 0,
            phase: Phase::Playing,
            should_exit: false,
        }
    }

    /// Resume from a persisted snapshot. An index past the stage table means
    /// the record belongs to a finished (or newer) run; start over.
    pub fn resume(snapshot: ProgressSnapshot) -> Self {
        if snapshot.stage_index >= STAGES.len() {
            return Self::new();
        }
        Self {
            stage_index: snapshot.stage_index,
            score: snapshot.score,
            hint_count: snapshot.hint_count,
            phase: Phase::Playing,
            should_exit: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn hint_count(&self) -> u32 {
        self.hint_count
    }

    pub fn current_stage(&self) -> &'static Stage {
        &STAGES[self.stage_index.min(STAGES.len() - 1)]
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            stage_index: self.stage_index,
            score: self.score,
            hint_count: self.hint_count,
        }
    }

    pub fn summary(&self) -> GameSummary {
        let rank = rank_for(self.hint_count);
        GameSummary {
            score: self.score,
            rank,
            share_url: share_url(rank, self.score),
        }
    }

    /// Show the banner for the current stage; call once after construction.
    pub fn start(&mut self, host: &mut dyn HostOps) {
        host.show_stage_banner(self.stage_index + 1, self.current_stage());
    }

    /// Handle one submitted (already trimmed) line.
    pub fn on_submit(&mut self, line: &str, host: &mut dyn HostOps) {
        if matches!(line, "quit" | "exit") {
            self.on_quit(host);
            return;
        }

        match self.phase {
            Phase::Playing => self.on_command(line, host),
            Phase::StageClear => self.advance_stage(host),
            Phase::Finished => self.on_finished_input(line, host),
        }
    }

    /// Ctrl-C: leave immediately, whatever the phase.
    pub fn on_interrupt(&mut self, host: &mut dyn HostOps) {
        self.on_quit(host);
    }

    fn on_quit(&mut self, host: &mut dyn HostOps) {
        self.should_exit = true;
        host.request_stop();
    }

    fn on_command(&mut self, line: &str, host: &mut dyn HostOps) {
        match interpret(line, self.current_stage()) {
            CommandReply::Solved => {
                self.score += SOLVE_BONUS;
                self.phase = Phase::StageClear;
                if self.stage_index + 1 < STAGES.len() {
                    host.save_progress(ProgressSnapshot {
                        stage_index: self.stage_index + 1,
                        score: self.score,
                        hint_count: self.hint_count,
                    });
                }
                host.show_solved(self.current_stage().article);
            }
            CommandReply::Output(text) => host.write_output(&text),
            CommandReply::Hint => {
                self.hint_count += 1;
                host.save_progress(self.snapshot());
                host.show_hint(self.current_stage().hint);
            }
            CommandReply::ClearScreen => host.clear_screen(),
            CommandReply::Empty => {}
        }
    }

    fn advance_stage(&mut self, host: &mut dyn HostOps) {
        self.stage_index += 1;
        if self.stage_index < STAGES.len() {
            self.phase = Phase::Playing;
            host.show_stage_banner(self.stage_index + 1, self.current_stage());
        } else {
            self.phase = Phase::Finished;
            let summary = self.summary();
            host.show_result(&summary);
            host.clear_progress();
        }
    }

    fn on_finished_input(&mut self, line: &str, host: &mut dyn HostOps) {
        match line {
            "restart" => self.on_restart(host),
            "" => {}
            _ => host.write_output("Type 'restart' to play again or 'quit' to exit."),
        }
    }

    fn on_restart(&mut self, host: &mut dyn HostOps) {
        self.stage_index = 0;
        self.score = 0;
        self.hint_count = 0;
        self.phase = Phase::Playing;
        host.clear_progress();
        host.show_stage_banner(1, self.current_stage());
    }
}

/// Rank by hint usage over the whole run.
#[must_use]
pub fn rank_for(hint_count: u32) -> &'static str {
    if hint_count == 0 {
        "Legendary SRE"
    } else if hint_count < 3 {
        "Senior Engineer"
    } else if hint_count < 6 {
        "SysAdmin"
    } else {
        "Junior Ops"
    }
}
