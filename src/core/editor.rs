//! Line editor state machine.
//!
//! Owns the in-progress command buffer, the cursor, and the submitted-line
//! history. Each call to [`EditorState::apply`] consumes one decoded event
//! and returns the display instructions that bring the rendering surface in
//! sync with the new state. The editor has no error paths: boundary-exceeding
//! navigation degrades to a no-op.

use crate::core::display::DisplayInstruction;
use crate::core::input_event::EditorEvent;
use crate::core::text::{display_width, grapheme_after, grapheme_before};

/// Result of applying one input event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorReaction {
    /// Display instructions, to be applied in order.
    pub instructions: Vec<DisplayInstruction>,
    /// The trimmed line handed over on submit.
    pub submitted: Option<String>,
}

impl EditorReaction {
    fn instructions(instructions: Vec<DisplayInstruction>) -> Self {
        Self {
            instructions,
            submitted: None,
        }
    }
}

/// Editable command line with cursor and session-wide history.
///
/// Invariants, held after every event:
/// - `cursor` is a char-boundary byte offset in `0..=buffer.len()`
/// - `history_cursor` is in `0..=history.len()`; `history.len()` means
///   "not browsing"
/// - history only grows, and only by non-empty trimmed submissions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    buffer: String,
    cursor: usize,
    history: Vec<String>,
    history_cursor: usize,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Submitted non-empty lines, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn history_cursor(&self) -> usize {
        self.history_cursor
    }

    /// Clear the in-progress line and end any history browse.
    ///
    /// History itself persists; stage boundaries reset only the line.
    pub fn reset_line(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.history_cursor = self.history.len();
    }

    /// Apply one event and return the display instructions for it.
    pub fn apply(&mut self, event: EditorEvent) -> EditorReaction {
        match event {
            EditorEvent::Insert(text) => self.on_insert(&text),
            EditorEvent::Backspace => self.on_backspace(),
            EditorEvent::CursorLeft => self.on_cursor_left(),
            EditorEvent::CursorRight => self.on_cursor_right(),
            EditorEvent::HistoryPrev => self.on_history_prev(),
            EditorEvent::HistoryNext => self.on_history_next(),
            EditorEvent::Submit => self.on_submit(),
            EditorEvent::Interrupt => EditorReaction::default(),
        }
    }

    fn on_insert(&mut self, text: &str) -> EditorReaction {
        if text.is_empty() {
            return EditorReaction::default();
        }

        let tail = self.buffer[self.cursor..].to_string();
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();

        let mut instructions = vec![DisplayInstruction::Write(format!("{text}{tail}"))];
        let tail_width = display_width(&tail);
        if tail_width > 0 {
            instructions.push(DisplayInstruction::MoveLeft(tail_width));
        }
        EditorReaction::instructions(instructions)
    }

    fn on_backspace(&mut self) -> EditorReaction {
        let Some(grapheme) = grapheme_before(&self.buffer, self.cursor) else {
            return EditorReaction::default();
        };

        let width = display_width(grapheme);
        let start = self.cursor - grapheme.len();
        self.buffer.replace_range(start..self.cursor, "");
        self.cursor = start;

        EditorReaction::instructions(vec![
            DisplayInstruction::MoveLeft(width),
            DisplayInstruction::DeleteForward(width),
        ])
    }

    fn on_cursor_left(&mut self) -> EditorReaction {
        let Some(grapheme) = grapheme_before(&self.buffer, self.cursor) else {
            return EditorReaction::default();
        };

        self.cursor -= grapheme.len();
        EditorReaction::instructions(vec![DisplayInstruction::MoveLeft(display_width(grapheme))])
    }

    fn on_cursor_right(&mut self) -> EditorReaction {
        let Some(grapheme) = grapheme_after(&self.buffer, self.cursor) else {
            return EditorReaction::default();
        };

        self.cursor += grapheme.len();
        EditorReaction::instructions(vec![DisplayInstruction::MoveRight(display_width(grapheme))])
    }

    fn on_history_prev(&mut self) -> EditorReaction {
        if self.history_cursor == 0 {
            return EditorReaction::default();
        }

        self.history_cursor -= 1;
        let entry = self.history[self.history_cursor].clone();
        EditorReaction::instructions(self.replace_line(entry))
    }

    fn on_history_next(&mut self) -> EditorReaction {
        if self.history_cursor >= self.history.len() {
            return EditorReaction::default();
        }

        if self.history_cursor + 1 < self.history.len() {
            self.history_cursor += 1;
            let entry = self.history[self.history_cursor].clone();
            EditorReaction::instructions(self.replace_line(entry))
        } else {
            self.history_cursor = self.history.len();
            EditorReaction::instructions(self.replace_line(String::new()))
        }
    }

    fn on_submit(&mut self) -> EditorReaction {
        let trimmed = self.buffer.trim().to_string();
        if !trimmed.is_empty() {
            self.history.push(trimmed.clone());
            self.history_cursor = self.history.len();
        }

        self.buffer.clear();
        self.cursor = 0;

        EditorReaction {
            instructions: vec![DisplayInstruction::Newline],
            submitted: Some(trimmed),
        }
    }

    /// Replace the displayed line with `next`, cursor at its end.
    fn replace_line(&mut self, next: String) -> Vec<DisplayInstruction> {
        let mut instructions = Vec::new();

        let prefix_width = display_width(&self.buffer[..self.cursor]);
        if prefix_width > 0 {
            instructions.push(DisplayInstruction::MoveLeft(prefix_width));
        }
        if !self.buffer.is_empty() {
            instructions.push(DisplayInstruction::EraseToEnd);
        }
        if !next.is_empty() {
            instructions.push(DisplayInstruction::Write(next.clone()));
        }

        self.buffer = next;
        self.cursor = self.buffer.len();
        instructions
    }
}

#[cfg(test)]
mod tests {
    use super::{EditorReaction, EditorState};
    use crate::core::display::DisplayInstruction;
    use crate::core::input_event::EditorEvent;

    fn apply_all(state: &mut EditorState, events: impl IntoIterator<Item = EditorEvent>) {
        for event in events {
            state.apply(event);
        }
    }

    fn insert(text: &str) -> EditorEvent {
        EditorEvent::Insert(text.to_string())
    }

    fn submit_line(state: &mut EditorState, text: &str) -> Option<String> {
        state.apply(insert(text));
        state.apply(EditorEvent::Submit).submitted
    }

    fn assert_invariants(state: &EditorState) {
        assert!(state.cursor() <= state.buffer().len());
        assert!(state.buffer().is_char_boundary(state.cursor()));
        assert!(state.history_cursor() <= state.history().len());
    }

    #[test]
    fn insert_and_backspace_keep_cursor_in_range() {
        let mut state = EditorState::new();
        let events = [
            insert("ab"),
            EditorEvent::Backspace,
            EditorEvent::Backspace,
            EditorEvent::Backspace,
            insert("xyz"),
            EditorEvent::CursorLeft,
            EditorEvent::Backspace,
            insert("q"),
        ];
        for event in events {
            state.apply(event);
            assert_invariants(&state);
        }
        assert_eq!(state.buffer(), "xqz");
    }

    #[test]
    fn backspace_at_origin_is_a_noop() {
        let mut state = EditorState::new();
        let reaction = state.apply(EditorEvent::Backspace);
        assert_eq!(reaction, EditorReaction::default());
        assert_eq!(state.buffer(), "");
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn right_arrow_at_end_is_a_noop() {
        let mut state = EditorState::new();
        state.apply(insert("hi"));
        let reaction = state.apply(EditorEvent::CursorRight);
        assert_eq!(reaction, EditorReaction::default());
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn left_arrow_at_origin_is_a_noop() {
        let mut state = EditorState::new();
        let reaction = state.apply(EditorEvent::CursorLeft);
        assert_eq!(reaction, EditorReaction::default());
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn insert_mid_buffer_rewrites_suffix_and_repositions() {
        let mut state = EditorState::new();
        state.apply(insert("xy"));
        state.apply(EditorEvent::CursorLeft);
        let reaction = state.apply(insert("abc"));

        assert_eq!(state.buffer(), "xabcy");
        assert_eq!(state.cursor(), 4);
        assert_eq!(
            reaction.instructions,
            vec![
                DisplayInstruction::Write("abcy".to_string()),
                DisplayInstruction::MoveLeft(1),
            ]
        );
    }

    #[test]
    fn backspace_removes_a_whole_grapheme() {
        let mut state = EditorState::new();
        state.apply(insert("a日"));
        let reaction = state.apply(EditorEvent::Backspace);
        assert_eq!(state.buffer(), "a");
        assert_eq!(
            reaction.instructions,
            vec![
                DisplayInstruction::MoveLeft(2),
                DisplayInstruction::DeleteForward(2),
            ]
        );
    }

    #[test]
    fn whitespace_only_submit_leaves_history_untouched() {
        let mut state = EditorState::new();
        submit_line(&mut state, "ls");
        let submitted = submit_line(&mut state, "  ");
        assert_eq!(submitted, Some(String::new()));
        assert_eq!(state.history(), ["ls"]);
        assert_eq!(state.history_cursor(), 1);
    }

    #[test]
    fn submissions_append_to_history_in_order() {
        let mut state = EditorState::new();
        submit_line(&mut state, "ls");
        submit_line(&mut state, "cat foo");
        assert_eq!(state.history(), ["ls", "cat foo"]);
        assert_eq!(state.history_cursor(), 2);
        assert_eq!(state.buffer(), "");
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn submit_trims_surrounding_whitespace() {
        let mut state = EditorState::new();
        let submitted = submit_line(&mut state, "  cat foo  ");
        assert_eq!(submitted, Some("cat foo".to_string()));
        assert_eq!(state.history(), ["cat foo"]);
    }

    #[test]
    fn history_prev_clamps_at_oldest() {
        let mut state = EditorState::new();
        submit_line(&mut state, "ls");
        submit_line(&mut state, "cat foo");

        state.apply(EditorEvent::HistoryPrev);
        assert_eq!(state.buffer(), "cat foo");
        state.apply(EditorEvent::HistoryPrev);
        assert_eq!(state.buffer(), "ls");

        let reaction = state.apply(EditorEvent::HistoryPrev);
        assert_eq!(reaction, EditorReaction::default());
        assert_eq!(state.buffer(), "ls");
        assert_eq!(state.history_cursor(), 0);
    }

    #[test]
    fn history_next_walks_forward_then_clears() {
        let mut state = EditorState::new();
        submit_line(&mut state, "ls");
        submit_line(&mut state, "cat foo");
        apply_all(
            &mut state,
            [EditorEvent::HistoryPrev, EditorEvent::HistoryPrev],
        );
        assert_eq!(state.buffer(), "ls");

        state.apply(EditorEvent::HistoryNext);
        assert_eq!(state.buffer(), "cat foo");

        state.apply(EditorEvent::HistoryNext);
        assert_eq!(state.buffer(), "");
        assert_eq!(state.history_cursor(), 2);

        let reaction = state.apply(EditorEvent::HistoryNext);
        assert_eq!(reaction, EditorReaction::default());
    }

    #[test]
    fn history_load_clears_line_and_rewrites() {
        let mut state = EditorState::new();
        submit_line(&mut state, "ls");
        state.apply(insert("draft"));
        state.apply(EditorEvent::CursorLeft);

        let reaction = state.apply(EditorEvent::HistoryPrev);
        assert_eq!(
            reaction.instructions,
            vec![
                DisplayInstruction::MoveLeft(4),
                DisplayInstruction::EraseToEnd,
                DisplayInstruction::Write("ls".to_string()),
            ]
        );
        assert_eq!(state.buffer(), "ls");
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn cursor_sits_at_line_end_after_navigation_and_submit() {
        let mut state = EditorState::new();
        submit_line(&mut state, "ls");
        state.apply(EditorEvent::HistoryPrev);
        assert_eq!(state.cursor(), state.buffer().len());

        state.apply(EditorEvent::Submit);
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.buffer(), "");
    }

    #[test]
    fn reset_line_keeps_history_and_ends_browsing() {
        let mut state = EditorState::new();
        submit_line(&mut state, "ls");
        state.apply(EditorEvent::HistoryPrev);
        state.reset_line();

        assert_eq!(state.buffer(), "");
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.history(), ["ls"]);
        assert_eq!(state.history_cursor(), 1);
    }

    #[test]
    fn interrupt_is_a_noop_for_the_editor() {
        let mut state = EditorState::new();
        state.apply(insert("half-typed"));
        let reaction = state.apply(EditorEvent::Interrupt);
        assert_eq!(reaction, EditorReaction::default());
        assert_eq!(state.buffer(), "half-typed");
    }

    #[test]
    fn invariants_hold_across_a_mixed_event_storm() {
        let mut state = EditorState::new();
        let events = [
            insert("one"),
            EditorEvent::Submit,
            insert("two words"),
            EditorEvent::CursorLeft,
            EditorEvent::CursorLeft,
            EditorEvent::Backspace,
            EditorEvent::HistoryPrev,
            EditorEvent::HistoryNext,
            EditorEvent::HistoryNext,
            insert("日本語"),
            EditorEvent::Backspace,
            EditorEvent::Submit,
            EditorEvent::HistoryPrev,
            EditorEvent::HistoryPrev,
            EditorEvent::HistoryPrev,
        ];
        for event in events {
            state.apply(event);
            assert_invariants(&state);
        }
    }
}
