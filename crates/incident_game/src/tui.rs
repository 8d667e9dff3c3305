//! Terminal session wiring: line editor, interpreter output, prompts.
//!
//! `GameSession` owns the editor state and the output gate and drives the
//! pure `App` through a `SessionHost`. All bytes reach the terminal through
//! the gate; nothing here writes directly.

use progress_store::ProgressStore;
use prompt_tui::{parse_editor_events, EditorEvent, EditorState, OutputGate, Terminal, TerminalCmd};

use crate::app::{App, GameSummary, HostOps, Phase, ProgressSnapshot};
use crate::article::render_article;
use crate::stages::Stage;

fn ansi_wrap(text: &str, prefix: &str, suffix: &str) -> String {
    format!("{prefix}{text}{suffix}")
}

pub(crate) fn dim(text: &str) -> String {
    ansi_wrap(text, "\x1b[2m", "\x1b[22m")
}

pub(crate) fn bold(text: &str) -> String {
    ansi_wrap(text, "\x1b[1m", "\x1b[22m")
}

pub(crate) fn green(text: &str) -> String {
    ansi_wrap(text, "\x1b[32m", "\x1b[39m")
}

pub(crate) fn yellow(text: &str) -> String {
    ansi_wrap(text, "\x1b[33m", "\x1b[39m")
}

pub(crate) fn cyan(text: &str) -> String {
    ansi_wrap(text, "\x1b[36m", "\x1b[39m")
}

pub(crate) fn italic(text: &str) -> String {
    ansi_wrap(text, "\x1b[3m", "\x1b[23m")
}

/// Host seam between the pure game and the output gate / progress store.
struct SessionHost<'a> {
    gate: &'a mut OutputGate,
    store: &'a mut ProgressStore,
    debug: bool,
}

impl SessionHost<'_> {
    fn write_line(&mut self, text: &str) {
        let normalized = text.replace('\n', "\r\n");
        self.gate.push(TerminalCmd::bytes(format!("{normalized}\r\n")));
    }
}

impl HostOps for SessionHost<'_> {
    fn write_output(&mut self, text: &str) {
        self.write_line(text);
    }

    fn show_stage_banner(&mut self, stage_number: usize, stage: &Stage) {
        self.gate.push(TerminalCmd::ClearScreen);
        self.write_line(&bold(&yellow(&format!(
            "--- LEVEL {stage_number}: {} ---",
            stage.title
        ))));
        self.write_line(&format!("Mission: {}", stage.mission));
        if self.debug {
            self.write_line(&dim(&format!("(debug) solution: {}", stage.solution)));
        }
    }

    fn show_hint(&mut self, hint: &str) {
        self.write_line(&bold(&cyan("[INTEL] Hint revealed.")));
        self.write_line(&format!("Hint: {hint}"));
    }

    fn show_solved(&mut self, article: &str) {
        self.write_line(&bold(&green("[OK] Task completed successfully.")));
        self.write_line("");
        for line in render_article(article) {
            self.write_line(&line);
        }
    }

    fn show_result(&mut self, summary: &GameSummary) {
        self.gate.push(TerminalCmd::ClearScreen);
        self.write_line(&bold(&green("=== ALL INCIDENTS RESOLVED ===")));
        self.write_line("");
        self.write_line(&format!("Final Score: {}", bold(&summary.score.to_string())));
        self.write_line(&format!("Rank: {}", bold(summary.rank)));
        self.write_line("");
        self.write_line(&dim(&format!("Share your result: {}", summary.share_url)));
        self.write_line("");
        self.write_line("Type 'restart' to play again, or 'quit' to exit.");
    }

    fn clear_screen(&mut self) {
        self.gate.push(TerminalCmd::ClearScreen);
    }

    fn save_progress(&mut self, snapshot: ProgressSnapshot) {
        if let Err(err) = self
            .store
            .save(snapshot.stage_index, snapshot.score, snapshot.hint_count)
        {
            self.write_line(&dim(&format!("(progress not saved: {err})")));
        }
    }

    fn clear_progress(&mut self) {
        if let Err(err) = self.store.clear() {
            self.write_line(&dim(&format!("(progress not cleared: {err})")));
        }
    }

    fn request_stop(&mut self) {
        // `App::should_exit` is the stop signal; nothing extra to do here.
    }
}

pub struct GameSession {
    app: App,
    editor: EditorState,
    gate: OutputGate,
    store: ProgressStore,
    debug: bool,
}

impl GameSession {
    pub fn new(app: App, store: ProgressStore) -> Self {
        Self {
            app,
            editor: EditorState::new(),
            gate: OutputGate::new(),
            store,
            debug: false,
        }
    }

    /// Reveal each stage's solution in the banner.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn should_stop(&self) -> bool {
        self.app.should_exit
    }

    /// First paint: protocol toggles, optional startup notice, stage banner.
    pub fn start<T: Terminal>(&mut self, notice: Option<&str>, term: &mut T) {
        self.gate.push(TerminalCmd::BracketedPasteEnable);
        self.gate.push(TerminalCmd::ShowCursor);

        let mut host = SessionHost {
            gate: &mut self.gate,
            store: &mut self.store,
            debug: self.debug,
        };
        self.app.start(&mut host);
        // After the banner: the banner starts with a screen wipe.
        if let Some(notice) = notice {
            host.write_line(&dim(notice));
        }

        self.render_prompt();
        self.gate.flush(term);
    }

    /// Process one raw input chunk to completion and flush the display.
    pub fn handle_chunk<T: Terminal>(&mut self, data: &str, term: &mut T) {
        for event in parse_editor_events(data) {
            if event == EditorEvent::Interrupt {
                let mut host = SessionHost {
                    gate: &mut self.gate,
                    store: &mut self.store,
                    debug: self.debug,
                };
                self.app.on_interrupt(&mut host);
                continue;
            }

            let reaction = self.editor.apply(event);
            self.gate.push_display(reaction.instructions);

            if let Some(line) = reaction.submitted {
                let stage_before = self.app.stage_index();
                let mut host = SessionHost {
                    gate: &mut self.gate,
                    store: &mut self.store,
                    debug: self.debug,
                };
                self.app.on_submit(&line, &mut host);

                if self.app.stage_index() != stage_before {
                    self.editor.reset_line();
                }
                if !self.app.should_exit {
                    self.render_prompt();
                }
            }
        }

        self.gate.flush(term);
    }

    /// Final writes before the terminal is restored.
    pub fn finish<T: Terminal>(&mut self, term: &mut T) {
        self.gate.push(TerminalCmd::BracketedPasteDisable);
        self.gate.push(TerminalCmd::bytes("\r\n"));
        self.gate.flush(term);
    }

    fn render_prompt(&mut self) {
        let prompt = match self.app.phase() {
            Phase::Playing => format!("\r\n{}:# ", bold(&green("root@incident-root"))),
            Phase::StageClear => format!("\r\n{} ", dim("[enter] next incident")),
            Phase::Finished => format!("\r\n{} ", dim("(restart|quit)#")),
        };
        self.gate.push(TerminalCmd::Bytes(prompt));
    }
}
