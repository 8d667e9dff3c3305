//! Tagged input events decoded once at the terminal boundary.
//!
//! Raw chunks arrive as UTF-8 text straight from the terminal. Decoding
//! happens here and nowhere else: the editor only ever matches on
//! [`EditorEvent`] variants, never on byte sequences.

/// One discrete input event for the line editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Printable character or an atomic pasted run.
    Insert(String),
    Backspace,
    CursorLeft,
    CursorRight,
    HistoryPrev,
    HistoryNext,
    Submit,
    /// Ctrl-C. The editor treats it as a no-op; the host decides.
    Interrupt,
}

const PASTE_START: &str = "\x1b[200~";
const PASTE_END: &str = "\x1b[201~";

/// Decode one raw terminal chunk into an ordered event sequence.
///
/// Handled: printable runs, bracketed paste, Enter, Backspace, the four
/// arrow keys (CSI and SS3 encodings), and Ctrl-C. Every other control
/// byte or escape sequence decodes to nothing.
pub fn parse_editor_events(data: &str) -> Vec<EditorEvent> {
    let mut events = Vec::new();
    let mut rest = data;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix(PASTE_START) {
            let Some(end) = after.find(PASTE_END) else {
                // Unterminated paste: drop the fragment rather than leak
                // control bytes into the buffer.
                break;
            };
            let pasted = sanitize_paste(&after[..end]);
            if !pasted.is_empty() {
                events.push(EditorEvent::Insert(pasted));
            }
            rest = &after[end + PASTE_END.len()..];
            continue;
        }

        if let Some(after) = rest.strip_prefix('\x1b') {
            let (event, consumed) = parse_escape(after);
            if let Some(event) = event {
                events.push(event);
            }
            rest = &after[consumed..];
            continue;
        }

        let Some(ch) = rest.chars().next() else {
            break;
        };

        match ch {
            '\r' => {
                events.push(EditorEvent::Submit);
                rest = &rest[1..];
                // CRLF is one submit.
                if let Some(after) = rest.strip_prefix('\n') {
                    rest = after;
                }
            }
            '\n' => {
                events.push(EditorEvent::Submit);
                rest = &rest[1..];
            }
            '\x7f' | '\x08' => {
                events.push(EditorEvent::Backspace);
                rest = &rest[1..];
            }
            '\x03' => {
                events.push(EditorEvent::Interrupt);
                rest = &rest[1..];
            }
            ch if !ch.is_control() => {
                let end = rest
                    .char_indices()
                    .find(|(_, c)| c.is_control())
                    .map(|(index, _)| index)
                    .unwrap_or(rest.len());
                events.push(EditorEvent::Insert(rest[..end].to_string()));
                rest = &rest[end..];
            }
            ch => {
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    events
}

/// Decode the remainder of an escape sequence (the leading ESC is already
/// consumed). Returns the decoded event, if any, and the byte count consumed.
fn parse_escape(after: &str) -> (Option<EditorEvent>, usize) {
    let bytes = after.as_bytes();

    if bytes.first() == Some(&b'[') {
        let mut index = 1;
        while index < bytes.len() {
            let byte = bytes[index];
            index += 1;
            if (0x40..=0x7e).contains(&byte) {
                let event = match &after[..index] {
                    "[A" => Some(EditorEvent::HistoryPrev),
                    "[B" => Some(EditorEvent::HistoryNext),
                    "[C" => Some(EditorEvent::CursorRight),
                    "[D" => Some(EditorEvent::CursorLeft),
                    _ => None,
                };
                return (event, index);
            }
        }
        // Truncated sequence: swallow what arrived.
        return (None, bytes.len());
    }

    if bytes.first() == Some(&b'O') {
        if bytes.len() < 2 {
            return (None, bytes.len());
        }
        let event = match bytes[1] {
            b'A' => Some(EditorEvent::HistoryPrev),
            b'B' => Some(EditorEvent::HistoryNext),
            b'C' => Some(EditorEvent::CursorRight),
            b'D' => Some(EditorEvent::CursorLeft),
            _ => None,
        };
        return (event, 2);
    }

    // Bare escape or an alt-prefixed character: not a handled event.
    match after.chars().next() {
        Some(ch) => (None, ch.len_utf8()),
        None => (None, 0),
    }
}

fn sanitize_paste(text: &str) -> String {
    text.chars().filter(|ch| !ch.is_control()).collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_editor_events, EditorEvent};

    #[test]
    fn printable_run_is_one_insert() {
        assert_eq!(
            parse_editor_events("ls -la"),
            vec![EditorEvent::Insert("ls -la".to_string())]
        );
    }

    #[test]
    fn arrows_decode_in_csi_and_ss3_form() {
        for (data, expected) in [
            ("\x1b[A", EditorEvent::HistoryPrev),
            ("\x1b[B", EditorEvent::HistoryNext),
            ("\x1b[C", EditorEvent::CursorRight),
            ("\x1b[D", EditorEvent::CursorLeft),
            ("\x1bOA", EditorEvent::HistoryPrev),
            ("\x1bOB", EditorEvent::HistoryNext),
            ("\x1bOC", EditorEvent::CursorRight),
            ("\x1bOD", EditorEvent::CursorLeft),
        ] {
            assert_eq!(parse_editor_events(data), vec![expected.clone()], "{data:?}");
        }
    }

    #[test]
    fn enter_variants_decode_to_one_submit() {
        assert_eq!(parse_editor_events("\r"), vec![EditorEvent::Submit]);
        assert_eq!(parse_editor_events("\n"), vec![EditorEvent::Submit]);
        assert_eq!(parse_editor_events("\r\n"), vec![EditorEvent::Submit]);
    }

    #[test]
    fn backspace_variants_decode() {
        assert_eq!(parse_editor_events("\x7f"), vec![EditorEvent::Backspace]);
        assert_eq!(parse_editor_events("\x08"), vec![EditorEvent::Backspace]);
    }

    #[test]
    fn bracketed_paste_is_atomic_and_can_be_mixed() {
        let events = parse_editor_events("a\x1b[200~b c\x1b[201~\x1b[D\r");
        assert_eq!(
            events,
            vec![
                EditorEvent::Insert("a".to_string()),
                EditorEvent::Insert("b c".to_string()),
                EditorEvent::CursorLeft,
                EditorEvent::Submit,
            ]
        );
    }

    #[test]
    fn paste_strips_control_bytes() {
        let events = parse_editor_events("\x1b[200~one\r\ntwo\tthree\x1b[201~");
        assert_eq!(events, vec![EditorEvent::Insert("onetwothree".to_string())]);
    }

    #[test]
    fn unterminated_paste_is_dropped() {
        assert_eq!(parse_editor_events("\x1b[200~half"), Vec::new());
    }

    #[test]
    fn unhandled_control_bytes_decode_to_nothing() {
        assert_eq!(parse_editor_events("\t\x07\x00"), Vec::new());
        assert_eq!(parse_editor_events("\x1b[1;5C"), Vec::new());
        assert_eq!(parse_editor_events("\x1b[H"), Vec::new());
        assert_eq!(parse_editor_events("\x1bx"), Vec::new());
        assert_eq!(parse_editor_events("\x1b"), Vec::new());
    }

    #[test]
    fn ctrl_c_is_interrupt() {
        assert_eq!(parse_editor_events("\x03"), vec![EditorEvent::Interrupt]);
    }

    #[test]
    fn control_bytes_inside_a_run_split_it() {
        let events = parse_editor_events("ab\x07cd");
        assert_eq!(
            events,
            vec![
                EditorEvent::Insert("ab".to_string()),
                EditorEvent::Insert("cd".to_string()),
            ]
        );
    }
}
