//! Context-sensitive completion merging for interactive shell REPLs.
//!
//! This library decides *which* completion strategy applies at a cursor
//! position (filesystem path, static vocabulary word, or semantic-language
//! completion) and merges the results into one cursor-anchored lazy
//! candidate sequence. It is a library-level component meant to be mounted
//! inside a host shell's key-handling loop; the semantic analysis engine and
//! the UI are external collaborators.
//!
//! # Modules
//!
//! - `completion`: string-context detection, the three producers, and the
//!   merging engine
//! - `completer`: adapter implementing `reedline::Completer`
//! - `document`: per-request buffer snapshot and trigger metadata
//! - `error`: error types for the semantic engine boundary
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use replcomp::{CompletionEngine, ScopeMap, SemanticEngine, SemanticSuggestion, ShellCompleter};
//!
//! struct NullEngine;
//!
//! impl SemanticEngine for NullEngine {
//!     fn complete(
//!         &self,
//!         _text: &str,
//!         _row: usize,
//!         _column: usize,
//!         _locals: &ScopeMap,
//!         _globals: &ScopeMap,
//!     ) -> replcomp::Result<Vec<SemanticSuggestion>> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! let engine = CompletionEngine::new(
//!     Arc::new(NullEngine),
//!     Box::new(ScopeMap::new),
//!     Box::new(ScopeMap::new),
//! )
//! .with_words(["help", "exit"], "command");
//!
//! // Mount into a reedline-based shell:
//! let completer = Box::new(ShellCompleter::new(engine));
//! let _editor = reedline::Reedline::create().with_completer(completer);
//! ```

pub mod completer;
pub mod completion;
pub mod document;
pub mod error;

pub use completer::ShellCompleter;
pub use completion::{
    Candidate, CandidateIter, CandidateProducer, CompletionEngine, PathProducer, QuoteKind,
    ScopeAccessor, ScopeMap, SemanticEngine, SemanticProducer, SemanticSuggestion,
    StringContextMatch, WordProducer,
};
pub use document::{CompletionEvent, Document};
pub use error::{Result, SemanticError};
