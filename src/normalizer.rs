//! Lexical normalization of tyson source text into strict-JSON-legal text.
//!
//! The normalizer is a single forward pass over the source that tracks
//! string state explicitly, so comment markers, colons, and braces inside
//! string literals are never rewritten. It applies, in one scan:
//!
//! 1. removal of `import ... from '...'` statements,
//! 2. collapse of the header tag (`{ : TypeName` becomes `{`),
//! 3. stripping of `//` line comments,
//! 4. double-quoting of bare object keys,
//! 5. removal of trailing commas before `}` or `]`,
//! 6. a whole-document trim.
//!
//! Alongside the rewritten text it records, for every normalized byte, the
//! byte offset it originated from, so decode failures can be reported
//! against the original document exactly.

/// JSON-legal text derived from a tyson document, plus a byte-level map back
/// to the original source text.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub text: String,
    map: Vec<usize>,
}

impl Normalized {
    /// Original-source byte offset for a byte offset into the normalized
    /// text. Offsets past the end clamp to the last mapped byte.
    pub fn source_offset(&self, offset: usize) -> usize {
        match self.map.get(offset) {
            Some(&origin) => origin,
            None => self.map.last().copied().unwrap_or(0),
        }
    }
}

/// Rewrites tyson source into strict-JSON-legal text. Never fails; text that
/// remains malformed after normalization is left for the decoder to reject.
/// Normalizing strict JSON is a no-op apart from the trim.
pub fn normalize(source: &str) -> Normalized {
    let chars: Vec<(usize, char)> = source.char_indices().collect();
    let len = chars.len();
    let mut out = String::with_capacity(source.len());
    let mut map = Vec::with_capacity(source.len());
    let mut in_string = false;
    let mut i = 0usize;

    while i < len {
        let (origin, c) = chars[i];

        if in_string {
            emit(&mut out, &mut map, c, origin);
            if c == '\\' && i + 1 < len {
                let (next_origin, next) = chars[i + 1];
                emit(&mut out, &mut map, next, next_origin);
                i += 2;
                continue;
            }
            if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                emit(&mut out, &mut map, c, origin);
                i += 1;
            }
            '/' if peek(&chars, i + 1) == Some('/') => {
                // line comment: drop up to, but not including, the newline
                i += 2;
                while i < len && chars[i].1 != '\n' {
                    i += 1;
                }
            }
            '{' => {
                emit(&mut out, &mut map, c, origin);
                i = header_tag_end(&chars, i + 1).unwrap_or(i + 1);
            }
            ',' if closes_scope_after(&chars, i + 1) => {
                // trailing comma
                i += 1;
            }
            c if is_word_char(c) => {
                let end = word_end(&chars, i);
                if word_is(&chars, i, end, "import") {
                    if let Some(stmt_end) = import_statement_end(&chars, end) {
                        i = stmt_end;
                        continue;
                    }
                }
                if colon_follows(&chars, end) {
                    // bare key
                    emit(&mut out, &mut map, '"', origin);
                    for k in i..end {
                        let (o, wc) = chars[k];
                        emit(&mut out, &mut map, wc, o);
                    }
                    emit(&mut out, &mut map, '"', chars[end - 1].0);
                } else {
                    for k in i..end {
                        let (o, wc) = chars[k];
                        emit(&mut out, &mut map, wc, o);
                    }
                }
                i = end;
            }
            _ => {
                emit(&mut out, &mut map, c, origin);
                i += 1;
            }
        }
    }

    let trailing = out.len() - out.trim_end().len();
    out.truncate(out.len() - trailing);
    map.truncate(out.len());
    let leading = out.len() - out.trim_start().len();
    if leading > 0 {
        out.drain(..leading);
        map.drain(..leading);
    }

    Normalized { text: out, map }
}

fn emit(out: &mut String, map: &mut Vec<usize>, c: char, origin: usize) {
    out.push(c);
    for _ in 0..c.len_utf8() {
        map.push(origin);
    }
}

fn peek(chars: &[(usize, char)], i: usize) -> Option<char> {
    chars.get(i).map(|&(_, c)| c)
}

/// Bare keys follow the same shape as the `\w+` class: letters, digits, and
/// underscores.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn word_end(chars: &[(usize, char)], start: usize) -> usize {
    let mut i = start + 1;
    while i < chars.len() && is_word_char(chars[i].1) {
        i += 1;
    }
    i
}

fn word_is(chars: &[(usize, char)], start: usize, end: usize, word: &str) -> bool {
    chars[start..end].iter().map(|&(_, c)| c).eq(word.chars())
}

/// Recognizes the `: TypeName` part of a header tag directly after an open
/// brace, returning the index just past the type name.
fn header_tag_end(chars: &[(usize, char)], start: usize) -> Option<usize> {
    let mut i = start;
    while i < chars.len() && chars[i].1.is_whitespace() {
        i += 1;
    }
    if peek(chars, i) != Some(':') {
        return None;
    }
    i += 1;
    while i < chars.len() && chars[i].1.is_whitespace() {
        i += 1;
    }
    if !peek(chars, i).is_some_and(is_word_char) {
        return None;
    }
    Some(word_end(chars, i))
}

/// True when the next significant character, looking through whitespace and
/// line comments, closes an object or array.
fn closes_scope_after(chars: &[(usize, char)], mut i: usize) -> bool {
    while i < chars.len() {
        let c = chars[i].1;
        if c.is_whitespace() {
            i += 1;
        } else if c == '/' && peek(chars, i + 1) == Some('/') {
            i += 2;
            while i < chars.len() && chars[i].1 != '\n' {
                i += 1;
            }
        } else {
            return c == '}' || c == ']';
        }
    }
    false
}

fn colon_follows(chars: &[(usize, char)], mut i: usize) -> bool {
    while i < chars.len() && chars[i].1.is_whitespace() {
        i += 1;
    }
    peek(chars, i) == Some(':')
}

/// Recognizes the remainder of an import statement on the current line:
/// a `from` keyword followed by a quoted module path, optionally terminated
/// with a semicolon. Returns the index just past the statement, or `None`
/// when the word `import` is not actually an import (for example, a bare key
/// named `import`).
fn import_statement_end(chars: &[(usize, char)], after_import: usize) -> Option<usize> {
    let mut line_end = after_import;
    while line_end < chars.len() && chars[line_end].1 != '\n' {
        line_end += 1;
    }

    let mut i = after_import;
    let mut saw_from = false;
    while i < line_end {
        let c = chars[i].1;
        if !saw_from {
            if is_word_char(c) {
                let end = word_end(chars, i);
                if word_is(chars, i, end, "from") {
                    saw_from = true;
                }
                i = end;
            } else {
                i += 1;
            }
        } else if c == '\'' || c == '"' {
            let mut close = i + 1;
            while close < line_end && chars[close].1 != c {
                close += 1;
            }
            if close >= line_end {
                return None;
            }
            let mut after = close + 1;
            while after < line_end && chars[after].1.is_whitespace() {
                after += 1;
            }
            if after < line_end && chars[after].1 == ';' {
                after += 1;
            }
            return Some(after);
        } else {
            i += 1;
        }
    }
    None
}
