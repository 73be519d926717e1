//! Context-sensitive completion merging.
//!
//! Three independent producers feed one merge layer:
//!
//! - **String-context detection**: a linear scanner that decides whether the
//!   cursor sits inside an open string literal, and captures what has been
//!   typed so far.
//! - **Path completion**: filesystem entries matching the partial path typed
//!   inside an open string, with `~` expansion.
//! - **Word completion**: a fixed caller-supplied vocabulary, matched against
//!   the current line's prefix.
//! - **Semantic completion**: an external analysis engine consulted with the
//!   full buffer, cursor position, and live scope mappings.
//!
//! The [`CompletionEngine`] arbitrates: path completion may fire inside
//! strings, word and semantic completion only outside them, and all results
//! are yielded as one lazy, cursor-anchored candidate sequence.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use replcomp::{CompletionEngine, CompletionEvent, Document, ScopeMap};
//! # use replcomp::{SemanticEngine, SemanticSuggestion};
//! # struct NullEngine;
//! # impl SemanticEngine for NullEngine {
//! #     fn complete(&self, _: &str, _: usize, _: usize, _: &ScopeMap, _: &ScopeMap)
//! #         -> replcomp::Result<Vec<SemanticSuggestion>> { Ok(Vec::new()) }
//! # }
//!
//! let engine = CompletionEngine::new(
//!     Arc::new(NullEngine),
//!     Box::new(ScopeMap::new),
//!     Box::new(ScopeMap::new),
//! )
//! .with_words(["help", "quit"], "command");
//!
//! let doc = Document::new("hel", 3);
//! for candidate in engine.complete(&doc, &CompletionEvent::requested()) {
//!     println!("{} (replaces {} bytes)", candidate.display, -candidate.span_offset);
//! }
//! ```

mod candidate;
mod engine;
mod path;
pub(crate) mod semantic;
mod string_context;
mod words;

pub use candidate::{Candidate, CandidateIter, CandidateProducer};
pub use engine::CompletionEngine;
pub use path::PathProducer;
pub use semantic::{ScopeAccessor, ScopeMap, SemanticEngine, SemanticProducer, SemanticSuggestion};
pub use string_context::{QuoteKind, StringContextMatch, classify, escape, unescape};
pub use words::WordProducer;
