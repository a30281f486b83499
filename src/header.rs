//! Extraction of tyson header metadata: the optional `{: TypeName` tag and
//! the optional `import { TypeName } from '<path>'` statement.
//!
//! Extraction is pure and never fails; an untyped document (no tag, no
//! import) is the common case and simply yields empty metadata.

use std::path::{Path, PathBuf};

/// Resolved header information for a tyson document. Caller-supplied options
/// have already been folded in: these are the values the validator consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMetadata {
    /// Type name to validate against, if any.
    pub type_name: Option<String>,
    /// Location of the declaration source for that type, if any.
    pub declaration_ref: Option<PathBuf>,
}

/// Resolves header metadata from raw tyson text and caller-supplied
/// overrides. Explicit `interface_name` / `interface_file` values win over
/// anything recovered from the text; the header tag wins over the imported
/// name when both are present.
pub fn extract(
    source: &str,
    interface_name: Option<&str>,
    interface_file: Option<&Path>,
) -> HeaderMetadata {
    let tag_name = find_header_tag(source);
    let (import_name, import_path) = match find_import(source) {
        Some((name, path)) => (Some(name), Some(path)),
        None => (None, None),
    };

    HeaderMetadata {
        type_name: interface_name
            .map(str::to_string)
            .or(tag_name)
            .or(import_name),
        declaration_ref: interface_file
            .map(Path::to_path_buf)
            .or_else(|| import_path.map(PathBuf::from)),
    }
}

/// Finds the first `{ : Identifier` tag outside string literals and
/// comments.
fn find_header_tag(source: &str) -> Option<String> {
    let chars: Vec<char> = source.chars().collect();
    let mut in_string = false;
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            if c == '\\' {
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
                i += 1;
            }
            '/' if chars.get(i + 1) == Some(&'/') => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '{' => {
                let mut j = i + 1;
                while j < chars.len() && chars[j].is_whitespace() {
                    j += 1;
                }
                if chars.get(j) == Some(&':') {
                    j += 1;
                    while j < chars.len() && chars[j].is_whitespace() {
                        j += 1;
                    }
                    let start = j;
                    while j < chars.len() && (chars[j].is_ascii_alphanumeric() || chars[j] == '_') {
                        j += 1;
                    }
                    if j > start {
                        return Some(chars[start..j].iter().collect());
                    }
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    None
}

/// Finds the first line of the shape `import { Identifier } from '<path>'`
/// and returns the identifier and path. Line-oriented on purpose: import
/// statements do not span lines in the accepted grammar.
fn find_import(source: &str) -> Option<(String, String)> {
    for line in source.lines() {
        let trimmed = line.trim_start();
        let Some(rest) = trimmed.strip_prefix("import") else {
            continue;
        };
        if !rest.starts_with(|c: char| c.is_whitespace() || c == '{') {
            continue;
        }
        let Some(open) = rest.find('{') else { continue };
        let Some(close) = rest[open..].find('}') else {
            continue;
        };
        let name = rest[open + 1..open + close].trim();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            continue;
        }
        let after = &rest[open + close + 1..];
        let Some(from) = after.find("from") else {
            continue;
        };
        let path_part = &after[from + 4..];
        let Some(quote_at) = path_part.find(['\'', '"']) else {
            continue;
        };
        let quote = path_part[quote_at..].chars().next().unwrap_or('\'');
        let path_rest = &path_part[quote_at + 1..];
        let Some(quote_end) = path_rest.find(quote) else {
            continue;
        };
        let path = &path_rest[..quote_end];
        if path.is_empty() {
            continue;
        }
        return Some((name.to_string(), path.to_string()));
    }
    None
}
