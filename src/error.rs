use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum TysonError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    #[error("output file is required for compilation")]
    #[diagnostic(
        code(tyson::missing_output),
        help("Pass an output path, or use parse() if you only need the decoded value.")
    )]
    MissingOutput,

    #[error("failed to read {path}")]
    #[diagnostic(code(tyson::read))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    #[diagnostic(code(tyson::write))]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize decoded value: {message}")]
    #[diagnostic(code(tyson::serialize))]
    Serialize { message: String },
}

#[derive(Error, Debug, Diagnostic)]
pub enum DecodeError {
    #[error("error parsing tyson content at line {line}, column {column}: {message}")]
    #[diagnostic(
        code(tyson::decode::syntax),
        help("Tyson must reduce to strict JSON once comments, the header tag, and import lines are removed.")
    )]
    Syntax {
        message: String,
        line: usize,
        column: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("decoding stopped here")]
        span: SourceSpan,
    },

    #[error("error parsing tyson content: {message}")]
    #[diagnostic(code(tyson::decode::unlocated))]
    Unlocated { message: String },
}

#[derive(Error, Debug, Diagnostic)]
pub enum ValidationError {
    #[error("expected an object conforming to '{type_name}', found {found}")]
    #[diagnostic(code(tyson::validate::not_an_object))]
    NotAnObject {
        type_name: String,
        found: &'static str,
    },

    #[error("missing required field '{field}' declared by '{type_name}'")]
    #[diagnostic(
        code(tyson::validate::missing_field),
        help("Add the field to the document, or mark it optional in the interface declaration.")
    )]
    MissingField { field: String, type_name: String },

    #[error("field '{field}' of '{type_name}' expects {expected}, found {found}")]
    #[diagnostic(code(tyson::validate::type_mismatch))]
    FieldTypeMismatch {
        field: String,
        type_name: String,
        expected: String,
        found: &'static str,
    },

    #[error("unknown field '{field}' is not declared by '{type_name}'")]
    #[diagnostic(
        code(tyson::validate::unknown_field),
        help("Remove the field, or run with unknown fields allowed.")
    )]
    UnknownField { field: String, type_name: String },
}
