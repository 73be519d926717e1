//! Static vocabulary completion.

use super::candidate::{Candidate, CandidateIter, CandidateProducer};
use super::engine::code_char_before_cursor;
use crate::document::Document;

/// Produces completions from a fixed, caller-supplied vocabulary.
///
/// Matching is case-sensitive exact-prefix over the entire current line
/// before the cursor, so vocabulary words are only offered at line start,
/// never mid-expression. All candidates carry the shared annotation so the
/// UI can tell them apart from language-native completions.
pub struct WordProducer {
    words: Vec<String>,
    annotation: String,
}

impl WordProducer {
    /// Create a producer over `words`, tagging every candidate with
    /// `annotation`.
    pub fn new<I, S>(words: I, annotation: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            annotation: annotation.into(),
        }
    }

    /// Create a producer with no vocabulary.
    pub fn empty() -> Self {
        Self {
            words: Vec::new(),
            annotation: String::new(),
        }
    }

    /// The configured vocabulary, in caller order.
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl CandidateProducer for WordProducer {
    fn while_typing(&self, doc: &Document) -> bool {
        code_char_before_cursor(doc)
    }

    fn produce<'a>(&'a self, doc: &'a Document) -> CandidateIter<'a> {
        let line = doc.current_line_before_cursor();
        Box::new(
            self.words
                .iter()
                .filter(move |word| word.starts_with(line))
                .map(move |word| {
                    Candidate::new(word.clone(), -(line.len() as isize))
                        .with_annotation(self.annotation.clone())
                }),
        )
    }
}
