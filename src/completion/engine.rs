//! Completion merger - orchestrates the three producers.
//!
//! One request is one synchronous pass: build the eligibility verdicts, query
//! the string-context detector, and chain the eligible producers into a
//! single lazy candidate sequence in fixed order (path, then vocabulary
//! words, then semantic results). While the cursor is inside an open string
//! literal, word and semantic completion are suppressed entirely; only path
//! completion may fire there.

use std::iter;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use super::candidate::{CandidateIter, CandidateProducer};
use super::path::PathProducer;
use super::semantic::{ScopeAccessor, SemanticEngine, SemanticProducer};
use super::string_context;
use super::words::WordProducer;
use crate::document::{CompletionEvent, Document};

/// True when the character before the cursor warrants code completion on an
/// incidental keystroke: alphanumeric, `_`, or `.`.
pub(crate) fn code_char_before_cursor(doc: &Document) -> bool {
    !doc.text().is_empty()
        && doc
            .char_before_cursor()
            .is_some_and(|c| c.is_alphanumeric() || matches!(c, '_' | '.'))
}

/// Merges path, vocabulary, and semantic completion into one ranked,
/// cursor-anchored candidate sequence.
pub struct CompletionEngine {
    path: PathProducer,
    words: WordProducer,
    semantic: SemanticProducer,
}

impl CompletionEngine {
    /// Create an engine over a semantic backend and late-bound scope
    /// accessors. The vocabulary starts empty; see [`with_words`].
    ///
    /// [`with_words`]: CompletionEngine::with_words
    pub fn new(
        engine: Arc<dyn SemanticEngine>,
        get_locals: ScopeAccessor,
        get_globals: ScopeAccessor,
    ) -> Self {
        Self {
            path: PathProducer::new(),
            words: WordProducer::empty(),
            semantic: SemanticProducer::new(engine, get_locals, get_globals),
        }
    }

    /// Set the vocabulary and the shared annotation shown next to every
    /// vocabulary candidate.
    pub fn with_words<I, S>(mut self, words: I, annotation: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words = WordProducer::new(words, annotation);
        self
    }

    /// Override the home directory used for `~` expansion in path
    /// completion.
    pub fn with_home_dir(mut self, home: impl Into<PathBuf>) -> Self {
        self.path = PathProducer::with_home_dir(home);
        self
    }

    /// Complete the given buffer snapshot.
    ///
    /// Returns a finite, consume-once lazy sequence; the caller may stop
    /// pulling at any point to abandon the request. Producer order is fixed:
    /// path candidates first, then vocabulary words, then semantic results.
    pub fn complete<'a>(&'a self, doc: &'a Document, event: &CompletionEvent) -> CandidateIter<'a> {
        let explicit = event.completion_requested;
        let mut merged: CandidateIter<'a> = Box::new(iter::empty());

        // 1. Path completion. The producer is a no-op outside a string, so
        //    the eligibility check alone decides whether to run it.
        if explicit || self.path.while_typing(doc) {
            merged = Box::new(merged.chain(self.path.produce(doc)));
        }

        // 2. Inside an open string literal, stop here: no word or semantic
        //    completion while typing string content, regardless of trigger.
        if string_context::classify(doc.text_before_cursor()).is_some() {
            debug!("cursor inside string literal; suppressing word and semantic completion");
            return merged;
        }

        // 3. Code completion: vocabulary before semantic, so user-defined
        //    shortcuts precede general language completions.
        if explicit || self.words.while_typing(doc) {
            merged = Box::new(merged.chain(self.words.produce(doc)));
        }
        if explicit || self.semantic.while_typing(doc) {
            merged = Box::new(merged.chain(self.semantic.produce(doc)));
        }

        merged
    }
}
