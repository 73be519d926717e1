//! Filesystem path completion inside open string literals.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::candidate::{Candidate, CandidateIter, CandidateProducer};
use super::string_context::{self, StringContextMatch};
use crate::document::Document;

/// Produces filesystem path candidates when the cursor is inside an open
/// string literal.
///
/// The partial path is the string content typed so far, unescaped; a leading
/// `~` is expanded to the home directory for the lookup only, so the inserted
/// text keeps the `~` the user typed. Each candidate replaces exactly the
/// captured string content, re-escaped for the active quote, never the
/// surrounding quote or code.
pub struct PathProducer {
    /// Home directory used for `~` expansion.
    home: Option<PathBuf>,
}

impl PathProducer {
    /// Create a producer resolving `~` against the current user's home.
    pub fn new() -> Self {
        Self {
            home: dirs::home_dir(),
        }
    }

    /// Create a producer with an explicit home directory.
    pub fn with_home_dir(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    /// Candidates for an already-detected open string context.
    fn candidates_for<'a>(&'a self, context: StringContextMatch) -> CandidateIter<'a> {
        let raw_len = context.raw().len();
        let quote = context.quote();
        let partial = context.unescaped();

        // Split the partial path at the last separator: everything up to and
        // including it names the directory to list, the rest is the name
        // prefix to match. A bare "~" lists the home directory itself.
        let (dir_part, name_prefix) = if partial == "~" {
            ("~/".to_string(), String::new())
        } else {
            match partial.rfind('/') {
                Some(idx) => (partial[..idx + 1].to_string(), partial[idx + 1..].to_string()),
                None => (String::new(), partial),
            }
        };

        let lookup = self.expand_tilde(&dir_part);
        let entries = match fs::read_dir(&lookup) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(directory = %lookup.display(), error = %err, "path completion: directory not listable");
                return Box::new(std::iter::empty());
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.starts_with(&name_prefix))
            .collect();
        names.sort();

        Box::new(names.into_iter().map(move |name| {
            let replacement = string_context::escape(&format!("{dir_part}{name}"), quote);
            Candidate::new(replacement, -(raw_len as isize)).with_display(name)
        }))
    }

    /// Resolve the directory to list for a given directory part of the
    /// partial path. An empty part means the current directory.
    fn expand_tilde(&self, dir_part: &str) -> PathBuf {
        if dir_part.is_empty() {
            return PathBuf::from(".");
        }
        if let Some(home) = &self.home {
            if dir_part == "~" || dir_part == "~/" {
                return home.clone();
            }
            if let Some(rest) = dir_part.strip_prefix("~/") {
                return home.join(rest);
            }
        }
        PathBuf::from(dir_part)
    }
}

impl Default for PathProducer {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateProducer for PathProducer {
    /// Path completion fires while typing when the character before the
    /// cursor looks path-like.
    fn while_typing(&self, doc: &Document) -> bool {
        !doc.text().is_empty()
            && doc
                .char_before_cursor()
                .is_some_and(|c| c.is_alphanumeric() || matches!(c, '/' | '.' | '~'))
    }

    fn produce<'a>(&'a self, doc: &'a Document) -> CandidateIter<'a> {
        match string_context::classify(doc.text_before_cursor()) {
            Some(context) => self.candidates_for(context),
            // Outside a string this producer is a structural no-op, so it is
            // safe for the merger to run it unconditionally.
            None => Box::new(std::iter::empty()),
        }
    }
}
