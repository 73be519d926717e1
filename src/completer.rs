//! Completer adapter for reedline.

use reedline::{Completer, Span, Suggestion};

use crate::completion::CompletionEngine;
use crate::document::{CompletionEvent, Document};

/// Reedline-facing wrapper around a [`CompletionEngine`].
///
/// Reedline invokes completion only when the user presses the completion
/// key, so every request through this adapter is an explicit one; hosts that
/// drive the engine from their own key loop can build incidental
/// [`CompletionEvent`]s themselves.
pub struct ShellCompleter {
    engine: CompletionEngine,
}

impl ShellCompleter {
    /// Wrap a completion engine for use as a reedline completer.
    pub fn new(engine: CompletionEngine) -> Self {
        Self { engine }
    }
}

impl Completer for ShellCompleter {
    /// Complete the input at the given cursor position.
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let doc = Document::new(line, pos);
        let event = CompletionEvent::requested();
        let pos = doc.cursor();

        self.engine
            .complete(&doc, &event)
            .map(|candidate| Suggestion {
                span: Span::new(candidate.span_start(pos), pos),
                value: candidate.insertion,
                description: candidate.annotation,
                style: None,
                extra: None,
                append_whitespace: false,
                match_indices: None,
            })
            .collect()
    }
}
