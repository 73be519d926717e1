//! Buffer snapshot and trigger metadata for a single completion request.
//!
//! A [`Document`] is an immutable view of the editor buffer at the moment
//! completion was triggered: the full text plus the cursor position, with the
//! derived slices the producers need. A fresh snapshot is built per request
//! and owned exclusively by that request; nothing here is cached or shared.
//!
//! All offsets are byte offsets into the UTF-8 text.

/// Immutable snapshot of the buffer at completion time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Full buffer text.
    text: String,
    /// Cursor position as a byte offset into `text`.
    cursor: usize,
}

impl Document {
    /// Create a snapshot of `text` with the cursor at byte offset `cursor`.
    ///
    /// The cursor is clamped to the text length and moved back to the nearest
    /// `char` boundary, so a stale position from the host editor can never
    /// cause a slice panic.
    pub fn new(text: impl Into<String>, cursor: usize) -> Self {
        let text = text.into();
        let mut cursor = cursor.min(text.len());
        while cursor > 0 && !text.is_char_boundary(cursor) {
            cursor -= 1;
        }
        Self { text, cursor }
    }

    /// Full buffer text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position as a byte offset.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Everything typed before the cursor.
    pub fn text_before_cursor(&self) -> &str {
        &self.text[..self.cursor]
    }

    /// The current line, from line start up to the cursor.
    pub fn current_line_before_cursor(&self) -> &str {
        let before = self.text_before_cursor();
        match before.rfind('\n') {
            Some(idx) => &before[idx + 1..],
            None => before,
        }
    }

    /// The character immediately before the cursor, if any.
    pub fn char_before_cursor(&self) -> Option<char> {
        self.text_before_cursor().chars().next_back()
    }

    /// Cursor row (0-based line index).
    pub fn cursor_row(&self) -> usize {
        self.text_before_cursor().matches('\n').count()
    }

    /// Cursor column: byte offset within the current line.
    pub fn cursor_col(&self) -> usize {
        self.current_line_before_cursor().len()
    }
}

/// Why completion was triggered.
///
/// An explicit request (the user pressed the completion key) relaxes the
/// eligibility predicates in the merger; an incidental keystroke only fires
/// producers whose "while typing" predicate holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionEvent {
    /// True when the user explicitly asked for completion.
    pub completion_requested: bool,
}

impl CompletionEvent {
    /// The user pressed a dedicated completion key.
    pub fn requested() -> Self {
        Self {
            completion_requested: true,
        }
    }

    /// Completion fired incidentally while the user was typing.
    pub fn while_typing() -> Self {
        Self {
            completion_requested: false,
        }
    }
}
