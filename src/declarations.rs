//! Declaration-description adapter: resolves a named structural type out of
//! an external declaration source.
//!
//! The validator only needs an ordered list of `(field name, expected kind,
//! optional)` entries per type, expressed here as the [`DeclarationProvider`]
//! capability. The shipped provider reads a lightweight interface grammar
//! (`export interface Name { field?: kind; ... }`) and caches every loaded
//! file for the lifetime of the compiler instance; other backends (JSON
//! schemas, a real compiler AST) can implement the same trait.

use crate::error::TysonError;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Expected primitive kind for a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Null,
    Object,
    Array,
    Any,
}

impl FieldKind {
    /// Maps a type annotation from a declaration source onto a checkable
    /// kind. Named types are treated as objects: structurally, a reference to
    /// another declaration is an object at this level. Annotations with no
    /// structural meaning degrade to `Any`.
    pub fn from_annotation(annotation: &str) -> FieldKind {
        let annotation = annotation.trim();
        if annotation.ends_with("[]") || annotation.starts_with("Array<") {
            return FieldKind::Array;
        }
        match annotation {
            "string" => FieldKind::String,
            "number" => FieldKind::Number,
            "boolean" => FieldKind::Boolean,
            "null" => FieldKind::Null,
            "object" => FieldKind::Object,
            "any" | "unknown" => FieldKind::Any,
            _ if annotation.starts_with('{') => FieldKind::Object,
            _ if annotation
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_uppercase()) =>
            {
                FieldKind::Object
            }
            _ => FieldKind::Any,
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FieldKind::String => "a string",
            FieldKind::Number => "a number",
            FieldKind::Boolean => "a boolean",
            FieldKind::Null => "null",
            FieldKind::Object => "an object",
            FieldKind::Array => "an array",
            FieldKind::Any => "any value",
        };
        write!(f, "{name}")
    }
}

/// A single declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDecl {
    pub name: String,
    pub kind: FieldKind,
    pub optional: bool,
}

/// A named structural type declaration: an ordered field list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDecl {
    pub name: String,
    pub fields: Vec<FieldDecl>,
}

/// Capability for resolving a named type declaration from a declaration
/// source.
pub trait DeclarationProvider {
    /// Returns the declaration for `type_name` within `reference`, or `None`
    /// when the source loads but does not declare that name. Errors are
    /// reserved for the source itself being unreadable.
    fn resolve(
        &mut self,
        reference: &Path,
        type_name: &str,
    ) -> Result<Option<TypeDecl>, TysonError>;
}

/// The default provider: parses interface declaration files, keyed and
/// cached by path. The cache is append-only and is never invalidated for
/// the lifetime of the instance; the declaration source is assumed stable.
#[derive(Debug, Default)]
pub struct InterfaceDeclarations {
    cache: HashMap<PathBuf, HashMap<String, TypeDecl>>,
}

impl InterfaceDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    fn load(&mut self, reference: &Path) -> Result<&HashMap<String, TypeDecl>, TysonError> {
        if !self.cache.contains_key(reference) {
            let text =
                std::fs::read_to_string(reference).map_err(|source| TysonError::Read {
                    path: reference.display().to_string(),
                    source,
                })?;
            self.cache
                .insert(reference.to_path_buf(), parse_declarations(&text));
        }
        Ok(&self.cache[reference])
    }
}

impl DeclarationProvider for InterfaceDeclarations {
    fn resolve(
        &mut self,
        reference: &Path,
        type_name: &str,
    ) -> Result<Option<TypeDecl>, TysonError> {
        Ok(self.load(reference)?.get(type_name).cloned())
    }
}

/// Parses every `interface Name { ... }` block out of a declaration source.
/// Text that does not fit the grammar is skipped rather than rejected; a
/// declaration file with no usable interfaces simply yields an empty table.
pub fn parse_declarations(text: &str) -> HashMap<String, TypeDecl> {
    let chars: Vec<char> = text.chars().collect();
    let mut declarations = HashMap::new();
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];
        if c == '/' && chars.get(i + 1) == Some(&'/') {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            continue;
        }
        if c == '/' && chars.get(i + 1) == Some(&'*') {
            i = block_comment_end(&chars, i + 2);
            continue;
        }
        if c == '"' || c == '\'' {
            i = string_end(&chars, i);
            continue;
        }
        if is_word_start(c) {
            let end = word_end(&chars, i);
            if word_is(&chars, i, end, "interface") {
                if let Some((decl, next)) = parse_interface(&chars, end) {
                    declarations.insert(decl.name.clone(), decl);
                    i = next;
                    continue;
                }
            }
            i = end;
            continue;
        }
        i += 1;
    }
    declarations
}

fn parse_interface(chars: &[char], mut i: usize) -> Option<(TypeDecl, usize)> {
    i = skip_trivia(chars, i);
    if !chars.get(i).copied().is_some_and(is_word_start) {
        return None;
    }
    let name_end = word_end(chars, i);
    let name: String = chars[i..name_end].iter().collect();
    i = name_end;

    // tolerate `extends Base` between the name and the body
    while i < chars.len() && chars[i] != '{' {
        let c = chars[i];
        if !(c.is_whitespace() || is_word_char(c) || c == ',') {
            return None;
        }
        i += 1;
    }
    if i >= chars.len() {
        return None;
    }
    i += 1;

    let mut fields = Vec::new();
    loop {
        i = skip_trivia(chars, i);
        match chars.get(i) {
            None => return None, // unterminated body
            Some('}') => return Some((TypeDecl { name, fields }, i + 1)),
            Some(&c) if is_word_start(c) || c == '"' || c == '\'' => {
                let (field_name, after_name) = read_field_name(chars, i)?;
                i = skip_trivia(chars, after_name);
                let optional = chars.get(i) == Some(&'?');
                if optional {
                    i = skip_trivia(chars, i + 1);
                }
                if chars.get(i) != Some(&':') {
                    return None;
                }
                let (annotation, after_annotation) = read_annotation(chars, i + 1);
                i = after_annotation;
                fields.push(FieldDecl {
                    name: field_name,
                    kind: FieldKind::from_annotation(&annotation),
                    optional,
                });
                if matches!(chars.get(i), Some(';') | Some(',')) {
                    i += 1;
                }
            }
            _ => return None,
        }
    }
}

fn read_field_name(chars: &[char], i: usize) -> Option<(String, usize)> {
    let c = chars[i];
    if c == '"' || c == '\'' {
        let mut j = i + 1;
        while j < chars.len() && chars[j] != c {
            j += 1;
        }
        if j >= chars.len() {
            return None;
        }
        Some((chars[i + 1..j].iter().collect(), j + 1))
    } else {
        let end = word_end(chars, i);
        Some((chars[i..end].iter().collect(), end))
    }
}

/// Collects the type annotation text up to the field delimiter, tracking
/// bracket depth so inline object and generic annotations stay intact.
fn read_annotation(chars: &[char], mut i: usize) -> (String, usize) {
    let mut depth = 0i32;
    let mut text = String::new();
    while let Some(&c) = chars.get(i) {
        match c {
            '{' | '<' | '[' | '(' => depth += 1,
            '}' if depth == 0 => break,
            '}' | '>' | ']' | ')' => depth -= 1,
            ';' | ',' | '\n' if depth == 0 => break,
            _ => {}
        }
        text.push(c);
        i += 1;
    }
    (text.trim().to_string(), i)
}

fn skip_trivia(chars: &[char], mut i: usize) -> usize {
    loop {
        match chars.get(i) {
            Some(c) if c.is_whitespace() => i += 1,
            Some('/') if chars.get(i + 1) == Some(&'/') => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            Some('/') if chars.get(i + 1) == Some(&'*') => {
                i = block_comment_end(chars, i + 2);
            }
            _ => return i,
        }
    }
}

fn block_comment_end(chars: &[char], mut i: usize) -> usize {
    while i + 1 < chars.len() && !(chars[i] == '*' && chars[i + 1] == '/') {
        i += 1;
    }
    (i + 2).min(chars.len())
}

fn string_end(chars: &[char], start: usize) -> usize {
    let quote = chars[start];
    let mut i = start + 1;
    while i < chars.len() {
        if chars[i] == '\\' {
            i += 2;
            continue;
        }
        if chars[i] == quote {
            return i + 1;
        }
        i += 1;
    }
    i
}

fn is_word_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn word_end(chars: &[char], start: usize) -> usize {
    let mut i = start + 1;
    while i < chars.len() && is_word_char(chars[i]) {
        i += 1;
    }
    i
}

fn word_is(chars: &[char], start: usize, end: usize, word: &str) -> bool {
    chars[start..end].iter().copied().eq(word.chars())
}
