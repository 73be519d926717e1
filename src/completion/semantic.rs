//! Semantic completion through an external analysis engine.
//!
//! The engine is an opaque capability: it receives the full buffer, the
//! cursor row/column, and the live locals/globals scope mappings, and returns
//! symbol suggestions. It runs on arbitrary, possibly invalid, in-progress
//! user input, so it is treated as unreliable by contract: every error it
//! reports is caught here and mapped to zero candidates. Best-effort
//! completion, never a crash.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::candidate::{Candidate, CandidateIter, CandidateProducer};
use super::engine::code_char_before_cursor;
use crate::document::Document;
use crate::error::Result;

/// Scope mapping forwarded verbatim to the semantic engine.
///
/// The merger never inspects the contents, only passes them through; keys are
/// bound names, values are whatever the engine implementation wants (type
/// names, reprs, ...).
pub type ScopeMap = HashMap<String, String>;

/// Late-bound accessor for a scope mapping.
///
/// Captured as a closure rather than a value so the live session's variables
/// are re-read on every request, e.g. after the user defines a new name.
pub type ScopeAccessor = Box<dyn Fn() -> ScopeMap + Send + Sync>;

/// One suggestion from the semantic engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticSuggestion {
    /// Full symbol name, used for both insertion and display.
    pub name: String,
    /// The suffix of `name` not yet typed at the cursor.
    pub completion: String,
}

impl SemanticSuggestion {
    pub fn new(name: impl Into<String>, completion: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            completion: completion.into(),
        }
    }
}

/// External semantic completion capability.
///
/// `row` is 0-based, `column` a byte offset within that row.
pub trait SemanticEngine: Send + Sync {
    fn complete(
        &self,
        text: &str,
        row: usize,
        column: usize,
        locals: &ScopeMap,
        globals: &ScopeMap,
    ) -> Result<Vec<SemanticSuggestion>>;
}

/// Produces candidates by delegating to a [`SemanticEngine`].
pub struct SemanticProducer {
    engine: Arc<dyn SemanticEngine>,
    get_locals: ScopeAccessor,
    get_globals: ScopeAccessor,
}

impl SemanticProducer {
    /// Create a producer over `engine` with late-bound scope accessors.
    pub fn new(
        engine: Arc<dyn SemanticEngine>,
        get_locals: ScopeAccessor,
        get_globals: ScopeAccessor,
    ) -> Self {
        Self {
            engine,
            get_locals,
            get_globals,
        }
    }

    fn run(&self, doc: &Document) -> Vec<Candidate> {
        let locals = (self.get_locals)();
        let globals = (self.get_globals)();
        let result = self.engine.complete(
            doc.text(),
            doc.cursor_row(),
            doc.cursor_col(),
            &locals,
            &globals,
        );

        match result {
            Ok(suggestions) => suggestions
                .into_iter()
                .map(|s| {
                    let typed = s.name.len().saturating_sub(s.completion.len());
                    Candidate::new(s.name, -(typed as isize))
                })
                .collect(),
            Err(err) => {
                debug!(error = %err, "semantic engine failed; dropping semantic candidates");
                Vec::new()
            }
        }
    }
}

impl CandidateProducer for SemanticProducer {
    fn while_typing(&self, doc: &Document) -> bool {
        code_char_before_cursor(doc)
    }

    /// The engine call is deferred until the sequence is actually pulled into
    /// this segment, so an abandoned request never pays for analysis.
    fn produce<'a>(&'a self, doc: &'a Document) -> CandidateIter<'a> {
        Box::new(std::iter::once(()).flat_map(move |()| self.run(doc)))
    }
}

/// Test doubles shared with the merger tests.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::error::SemanticError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Engine returning fixed suggestions and counting invocations.
    pub(crate) struct RecordingEngine {
        pub suggestions: Vec<SemanticSuggestion>,
        pub fail: bool,
        pub calls: AtomicUsize,
    }

    impl RecordingEngine {
        pub fn with_suggestions(suggestions: Vec<SemanticSuggestion>) -> Arc<Self> {
            Arc::new(Self {
                suggestions,
                fail: false,
                calls: AtomicUsize::new(0),
            })
        }

        pub fn failing() -> Arc<Self> {
            Arc::new(Self {
                suggestions: Vec::new(),
                fail: true,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl SemanticEngine for RecordingEngine {
        fn complete(
            &self,
            _text: &str,
            row: usize,
            column: usize,
            _locals: &ScopeMap,
            _globals: &ScopeMap,
        ) -> Result<Vec<SemanticSuggestion>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SemanticError::InvalidPosition { row, column });
            }
            Ok(self.suggestions.clone())
        }
    }

    /// Accessor over an always-empty scope.
    pub(crate) fn empty_scope() -> ScopeAccessor {
        Box::new(ScopeMap::new)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{RecordingEngine, empty_scope};
    use super::*;
    use std::sync::atomic::Ordering;

    #[test]
    fn suggestions_map_to_candidates_with_typed_span() {
        let engine = RecordingEngine::with_suggestions(vec![SemanticSuggestion::new(
            "os.path", "th",
        )]);
        let producer = SemanticProducer::new(engine, empty_scope(), empty_scope());

        let doc = Document::new("os.pa", 5);
        let candidates: Vec<Candidate> = producer.produce(&doc).collect();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].insertion, "os.path");
        assert_eq!(candidates[0].display, "os.path");
        // "os.path" minus remaining "th" means 5 bytes were already typed.
        assert_eq!(candidates[0].span_offset, -5);
    }

    #[test]
    fn engine_error_yields_empty_sequence() {
        let engine = RecordingEngine::failing();
        let producer = SemanticProducer::new(engine.clone(), empty_scope(), empty_scope());

        let doc = Document::new("os.pa", 5);
        assert_eq!(producer.produce(&doc).count(), 0);
        assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn engine_not_called_until_pulled() {
        let engine = RecordingEngine::with_suggestions(vec![SemanticSuggestion::new("x", "x")]);
        let producer = SemanticProducer::new(engine.clone(), empty_scope(), empty_scope());

        let doc = Document::new("x", 1);
        let iter = producer.produce(&doc);
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
        drop(iter);
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);

        let _ = producer.produce(&doc).count();
        assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn scope_accessors_are_read_per_request() {
        use std::sync::Mutex;

        struct ScopeCheckingEngine {
            seen: Mutex<Vec<usize>>,
        }

        impl SemanticEngine for ScopeCheckingEngine {
            fn complete(
                &self,
                _text: &str,
                _row: usize,
                _column: usize,
                locals: &ScopeMap,
                _globals: &ScopeMap,
            ) -> Result<Vec<SemanticSuggestion>> {
                self.seen.lock().unwrap().push(locals.len());
                Ok(Vec::new())
            }
        }

        let engine = Arc::new(ScopeCheckingEngine {
            seen: Mutex::new(Vec::new()),
        });
        let shared = Arc::new(Mutex::new(ScopeMap::new()));

        let accessor_source = shared.clone();
        let producer = SemanticProducer::new(
            engine.clone(),
            Box::new(move || accessor_source.lock().unwrap().clone()),
            empty_scope(),
        );

        let doc = Document::new("x", 1);
        let _ = producer.produce(&doc).count();
        shared
            .lock()
            .unwrap()
            .insert("answer".to_string(), "42".to_string());
        let _ = producer.produce(&doc).count();

        assert_eq!(*engine.seen.lock().unwrap(), vec![0, 1]);
    }
}
