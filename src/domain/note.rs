//! Note bodies are stored as one string with embedded newlines; the line
//! prefixes below are part of the stored text, not separate structure.

use super::enums::NoteType;

pub const BULLET_PREFIX: &str = "• ";
pub const UNCHECKED_PREFIX: &str = "[ ] ";
pub const CHECKED_PREFIX: &str = "[x] ";

/// One line of a note body, with its prefix decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteLine {
    /// Line content without any recognized prefix
    pub text: String,
    /// `Some(checked)` for checkbox lines, `None` otherwise
    pub checked: Option<bool>,
}

/// Strip a recognized prefix from a raw line
fn decode_line(raw: &str) -> NoteLine {
    if let Some(rest) = raw.strip_prefix(CHECKED_PREFIX) {
        NoteLine {
            text: rest.to_string(),
            checked: Some(true),
        }
    } else if let Some(rest) = raw.strip_prefix(UNCHECKED_PREFIX) {
        NoteLine {
            text: rest.to_string(),
            checked: Some(false),
        }
    } else if let Some(rest) = raw.strip_prefix(BULLET_PREFIX) {
        NoteLine {
            text: rest.to_string(),
            checked: None,
        }
    } else {
        NoteLine {
            text: raw.to_string(),
            checked: None,
        }
    }
}

/// Split a note body into decoded lines
pub fn note_lines(note: &str) -> Vec<NoteLine> {
    if note.is_empty() {
        return Vec::new();
    }
    note.lines().map(decode_line).collect()
}

/// Toggle the checked state of the line at `line_index`.
///
/// Lines without a checkbox prefix are left untouched, as is an index past
/// the end of the note.
pub fn toggle_checkbox(note: &str, line_index: usize) -> String {
    let lines: Vec<&str> = note.lines().collect();
    let toggled: Vec<String> = lines
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            if i != line_index {
                return (*raw).to_string();
            }
            if let Some(rest) = raw.strip_prefix(UNCHECKED_PREFIX) {
                format!("{}{}", CHECKED_PREFIX, rest)
            } else if let Some(rest) = raw.strip_prefix(CHECKED_PREFIX) {
                format!("{}{}", UNCHECKED_PREFIX, rest)
            } else {
                (*raw).to_string()
            }
        })
        .collect();
    toggled.join("\n")
}

/// Rewrite line prefixes for a new note type.
///
/// Checked state survives a round trip through checkbox; converting a
/// checked line to bullet or text keeps only the line content.
pub fn convert_note(note: &str, to: NoteType) -> String {
    if note.is_empty() {
        return String::new();
    }
    let converted: Vec<String> = note
        .lines()
        .map(|raw| {
            if raw.is_empty() {
                // Blank lines carry no prefix in any mode
                return String::new();
            }
            let line = decode_line(raw);
            match to {
                NoteType::Text => line.text,
                NoteType::Bullet => format!("{}{}", BULLET_PREFIX, line.text),
                NoteType::Checkbox => {
                    let prefix = if line.checked == Some(true) {
                        CHECKED_PREFIX
                    } else {
                        UNCHECKED_PREFIX
                    };
                    format!("{}{}", prefix, line.text)
                }
            }
        })
        .collect();
    converted.join("\n")
}
