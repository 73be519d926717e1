//! Completion candidate type shared by all producers.

use crate::document::Document;

/// One completion result with a cursor-anchored replacement span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Text to insert into the buffer.
    pub insertion: String,
    /// How much already-typed text this candidate replaces, as a byte offset
    /// relative to the cursor. Always zero or negative.
    pub span_offset: isize,
    /// What the UI shows for this candidate.
    pub display: String,
    /// Optional short tag shown next to the candidate (e.g. to distinguish
    /// vocabulary words from semantic results).
    pub annotation: Option<String>,
}

impl Candidate {
    /// Create a candidate whose display text equals its insertion text.
    pub fn new(insertion: impl Into<String>, span_offset: isize) -> Self {
        let insertion = insertion.into();
        debug_assert!(span_offset <= 0, "replacement span must not extend past the cursor");
        Self {
            display: insertion.clone(),
            insertion,
            span_offset,
            annotation: None,
        }
    }

    /// Override the display text.
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = display.into();
        self
    }

    /// Attach a display annotation.
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    /// Absolute start of the replacement span for a cursor at byte offset
    /// `cursor`. Saturates at zero.
    pub fn span_start(&self, cursor: usize) -> usize {
        cursor.saturating_sub(self.span_offset.unsigned_abs())
    }
}

/// Lazily produced, finite, consume-once sequence of candidates.
///
/// Producers and the merger both yield this type so the host UI can pull one
/// item at a time and abandon the rest (that abandonment is the cancellation
/// mechanism; there is no explicit cancel signal).
pub type CandidateIter<'a> = Box<dyn Iterator<Item = Candidate> + 'a>;

/// A source of completion candidates.
///
/// The three producers (path, word, semantic) all implement this single
/// capability so the merger can hold them uniformly and apply its eligibility
/// predicates per producer.
pub trait CandidateProducer {
    /// Whether this producer should fire on an incidental keystroke (an
    /// explicit completion request bypasses this predicate).
    fn while_typing(&self, doc: &Document) -> bool;

    /// Produce candidates for the given buffer snapshot.
    fn produce<'a>(&'a self, doc: &'a Document) -> CandidateIter<'a>;
}
