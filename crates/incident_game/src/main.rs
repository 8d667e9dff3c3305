use std::io;
use std::sync::mpsc;

use incident_game::app::{App, ProgressSnapshot};
use incident_game::tui::GameSession;
use progress_store::ProgressStore;
use prompt_tui::config::EnvConfig;
use prompt_tui::{ProcessTerminal, Terminal, TerminalGuard};

fn main() -> io::Result<()> {
    let config = EnvConfig::from_env();
    let cwd = std::env::current_dir()?;
    let store = ProgressStore::at(&cwd);

    let (app, notice) = match store.load() {
        Ok(Some(record)) => {
            let app = App::resume(ProgressSnapshot {
                stage_index: record.stage_index,
                score: record.score,
                hint_count: record.hint_count,
            });
            let notice = (app.stage_index() == record.stage_index).then(|| {
                format!(
                    "(resuming from level {}, score {})",
                    record.stage_index + 1,
                    record.score
                )
            });
            (app, notice)
        }
        Ok(None) => (App::new(), None),
        Err(err) => (
            App::new(),
            Some(format!("(ignoring saved progress: {err})")),
        ),
    };

    let mut terminal = ProcessTerminal::new();
    if let Some(path) = config.write_log {
        terminal.set_write_log(path);
    }

    // The guard restores cooked mode even if the loop below panics.
    let mut guard = TerminalGuard::new(terminal);

    let (input_tx, input_rx) = mpsc::channel::<String>();
    guard.terminal_mut().start(
        Box::new(move |chunk| {
            let _ = input_tx.send(chunk);
        }),
        // The game renders a single editable line; nothing to reflow.
        Box::new(|| {}),
    )?;

    let mut session = GameSession::new(app, store);
    session.set_debug(config.debug);
    session.start(notice.as_deref(), guard.terminal_mut());

    while let Ok(chunk) = input_rx.recv() {
        session.handle_chunk(&chunk, guard.terminal_mut());
        if session.should_stop() {
            break;
        }
    }

    session.finish(guard.terminal_mut());
    guard.into_inner().stop()
}
