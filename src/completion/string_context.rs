//! String-context detection for the completion merger.
//!
//! Decides, from the text preceding the cursor, whether the cursor sits inside
//! an open (unterminated) string literal, and if so which quoting style and
//! what raw content has been typed so far. This is what lets the merger offer
//! filesystem paths inside strings and suppress word/semantic completion
//! there.
//!
//! The detector is an explicit state machine scanning the input once, byte by
//! byte. It is deliberately not a full parser: closed triple-quoted regions,
//! line comments, and closed single-line strings are consumed opaquely, and
//! only the trailing unterminated string captures. Triple-quote openers are
//! recognized before single-line quote rules so the opening delimiter of a
//! triple-quoted block is never misread as a one-line string; that ordering is
//! what keeps the scan linear and the verdict deterministic.

/// Which quoting style the open string uses.
///
/// Exactly one style is active per match; the enum makes that structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    /// Single-quoted literal (`'...`).
    Single,
    /// Double-quoted literal (`"...`).
    Double,
}

impl QuoteKind {
    /// The quote character for this style.
    pub fn quote_char(&self) -> char {
        match self {
            QuoteKind::Single => '\'',
            QuoteKind::Double => '"',
        }
    }
}

/// A successful detection: the cursor is inside an open string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringContextMatch {
    quote: QuoteKind,
    raw: String,
}

impl StringContextMatch {
    /// The active quoting style.
    pub fn quote(&self) -> QuoteKind {
        self.quote
    }

    /// The captured content exactly as typed, escapes included.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The captured content with escape pairs resolved, suitable for handing
    /// to a filesystem enumerator.
    pub fn unescaped(&self) -> String {
        unescape(&self.raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    LineComment,
    TripleSingle,
    TripleDouble,
    InString(QuoteKind),
}

/// Classify the text before the cursor.
///
/// Returns `Some` when the text ends inside an open single- or double-quoted
/// string; `None` otherwise. `None` is the common case, not an error: most
/// typing happens outside strings.
///
/// A trailing string that contains a raw newline, or that ends in a dangling
/// backslash, is not a valid open context (the escape unit is incomplete, and
/// one-line strings cannot span lines), so both return `None`. Unterminated
/// triple-quoted blocks and comments running to end-of-input also return
/// `None`: neither is a place where path completion makes sense.
pub fn classify(text: &str) -> Option<StringContextMatch> {
    let bytes = text.as_bytes();
    let mut state = ScanState::Normal;
    let mut i = 0;
    // Tracked for the trailing string only; reset on every string entry.
    let mut content_start = 0;
    let mut saw_newline = false;
    let mut dangling_escape = false;

    while i < bytes.len() {
        match state {
            ScanState::Normal => match bytes[i] {
                b'#' => {
                    state = ScanState::LineComment;
                    i += 1;
                }
                b'\'' if bytes[i + 1..].starts_with(b"''") => {
                    state = ScanState::TripleSingle;
                    i += 3;
                }
                b'"' if bytes[i + 1..].starts_with(b"\"\"") => {
                    state = ScanState::TripleDouble;
                    i += 3;
                }
                b'\'' => {
                    state = ScanState::InString(QuoteKind::Single);
                    content_start = i + 1;
                    saw_newline = false;
                    dangling_escape = false;
                    i += 1;
                }
                b'"' => {
                    state = ScanState::InString(QuoteKind::Double);
                    content_start = i + 1;
                    saw_newline = false;
                    dangling_escape = false;
                    i += 1;
                }
                _ => i += 1,
            },
            ScanState::LineComment => {
                if bytes[i] == b'\n' {
                    state = ScanState::Normal;
                }
                i += 1;
            }
            ScanState::TripleSingle => {
                if bytes[i] == b'\\' {
                    i += 2;
                } else if bytes[i..].starts_with(b"'''") {
                    state = ScanState::Normal;
                    i += 3;
                } else {
                    i += 1;
                }
            }
            ScanState::TripleDouble => {
                if bytes[i] == b'\\' {
                    i += 2;
                } else if bytes[i..].starts_with(b"\"\"\"") {
                    state = ScanState::Normal;
                    i += 3;
                } else {
                    i += 1;
                }
            }
            ScanState::InString(kind) => {
                let quote = kind.quote_char() as u8;
                if bytes[i] == b'\\' {
                    // Backslash plus the next byte form one escape unit and
                    // never end the string early.
                    if i + 1 >= bytes.len() {
                        dangling_escape = true;
                        i += 1;
                    } else {
                        i += 2;
                    }
                } else if bytes[i] == quote {
                    state = ScanState::Normal;
                    i += 1;
                } else {
                    if bytes[i] == b'\n' {
                        saw_newline = true;
                    }
                    i += 1;
                }
            }
        }
    }

    match state {
        ScanState::InString(quote) if !saw_newline && !dangling_escape => {
            Some(StringContextMatch {
                quote,
                raw: text[content_start..].to_string(),
            })
        }
        _ => None,
    }
}

/// Resolve escape pairs: a backslash followed by any character becomes that
/// character. A lone trailing backslash is kept as-is.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Escape `text` for insertion into an open string of the given quoting
/// style: backslashes first, then the active quote character.
pub fn escape(text: &str, quote: QuoteKind) -> String {
    let q = quote.quote_char();
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\\' || c == q {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_code_is_no_match() {
        assert_eq!(classify("x = 1 + foo(bar)"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn open_single_quote_captures() {
        let m = classify("x = '/tmp/fo").expect("open single-quoted string");
        assert_eq!(m.quote(), QuoteKind::Single);
        assert_eq!(m.raw(), "/tmp/fo");
    }

    #[test]
    fn open_double_quote_captures() {
        let m = classify("x = \"/tmp/fo").expect("open double-quoted string");
        assert_eq!(m.quote(), QuoteKind::Double);
        assert_eq!(m.raw(), "/tmp/fo");
    }

    #[test]
    fn closed_string_is_no_match() {
        assert_eq!(classify("x = '/tmp/foo'"), None);
        assert_eq!(classify("x = \"done\" + y"), None);
    }

    #[test]
    fn second_string_on_line_captures() {
        let m = classify("open('a.txt') + open('b").expect("second string open");
        assert_eq!(m.raw(), "b");
        assert_eq!(m.quote(), QuoteKind::Single);
    }

    #[test]
    fn escaped_quote_does_not_close() {
        let m = classify(r"x = 'it\'s her").expect("escaped quote stays open");
        assert_eq!(m.raw(), r"it\'s her");
        assert_eq!(m.unescaped(), "it's her");
    }

    #[test]
    fn escaped_backslash_then_quote_closes() {
        // The backslash is escaped, so the following quote terminates.
        assert_eq!(classify(r"x = 'a\\'"), None);
    }

    #[test]
    fn closed_triple_single_then_open_string() {
        let m = classify("'''docstring''' + 'par").expect("open after closed triple");
        assert_eq!(m.quote(), QuoteKind::Single);
        assert_eq!(m.raw(), "par");
    }

    #[test]
    fn closed_triple_double_then_code() {
        assert_eq!(classify("\"\"\"doc \" with quote\"\"\" x = 1"), None);
    }

    #[test]
    fn unterminated_triple_is_no_match() {
        assert_eq!(classify("'''still inside"), None);
        assert_eq!(classify("\"\"\"still inside"), None);
        assert_eq!(classify("x = '''"), None);
    }

    #[test]
    fn triple_opener_not_misread_as_single_string() {
        // The quotes inside the closed triple block must not leak into the
        // single-line string rules and fake an open context.
        assert_eq!(classify("'''a'b'c''' + 1"), None);
    }

    #[test]
    fn quote_in_comment_is_ignored() {
        assert_eq!(classify("x = 1  # don't care"), None);
        let m = classify("# comment 'quoted'\ny = 'op").expect("open after comment line");
        assert_eq!(m.raw(), "op");
    }

    #[test]
    fn comment_to_end_of_input_is_no_match() {
        assert_eq!(classify("x = 1  # trailing '"), None);
    }

    #[test]
    fn newline_inside_trailing_string_invalidates() {
        assert_eq!(classify("x = 'abc\ndef"), None);
    }

    #[test]
    fn closed_string_spanning_newline_still_scans() {
        // A closed string containing a newline is consumed opaquely; the
        // trailing open string after it still matches.
        let m = classify("x = 'a\nb' + 'c").expect("open after closed multi-byte string");
        assert_eq!(m.raw(), "c");
    }

    #[test]
    fn dangling_escape_invalidates() {
        assert_eq!(classify("x = 'abc\\"), None);
    }

    #[test]
    fn empty_open_string_matches() {
        let m = classify("f(\"").expect("just-opened string");
        assert_eq!(m.quote(), QuoteKind::Double);
        assert_eq!(m.raw(), "");
    }

    #[test]
    fn empty_closed_string_pair_is_no_match() {
        assert_eq!(classify("x = ''"), None);
        assert_eq!(classify("x = \"\""), None);
    }

    #[test]
    fn closed_pair_then_reopened_matches_empty() {
        let m = classify("'a''").expect("reopened after closed string");
        assert_eq!(m.raw(), "");
    }

    #[test]
    fn multibyte_content_is_preserved() {
        let m = classify("x = 'héllo/wö").expect("open string with multibyte content");
        assert_eq!(m.raw(), "héllo/wö");
    }

    #[test]
    fn unescape_removes_escape_pairs() {
        assert_eq!(unescape(r"a\'b\\c"), r"a'b\c");
        assert_eq!(unescape("plain"), "plain");
        assert_eq!(unescape(r"trailing\"), r"trailing\");
    }

    #[test]
    fn escape_round_trip_single() {
        for s in ["/tmp/foo", r"back\slash", "it's", "mix'\\end", ""] {
            assert_eq!(unescape(&escape(s, QuoteKind::Single)), s);
        }
    }

    #[test]
    fn escape_round_trip_double() {
        for s in ["say \"hi\"", r"c:\dir\file", "plain"] {
            assert_eq!(unescape(&escape(s, QuoteKind::Double)), s);
        }
    }

    #[test]
    fn escape_targets_active_quote_only() {
        assert_eq!(escape("it's", QuoteKind::Single), r"it\'s");
        assert_eq!(escape("it's", QuoteKind::Double), "it's");
        assert_eq!(escape("say \"hi\"", QuoteKind::Double), r#"say \"hi\""#);
    }
}
