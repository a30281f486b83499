//! The compiler facade: wires header extraction, normalization, decoding,
//! and validation into `parse` and `compile`.

use crate::declarations::{DeclarationProvider, InterfaceDeclarations};
use crate::decoder;
use crate::error::TysonError;
use crate::header::{self, HeaderMetadata};
use crate::normalizer;
use crate::validator::{self, UnknownFieldPolicy};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Options accepted by the tyson compiler.
#[derive(Debug, Clone, Default)]
pub struct TysonOptions {
    /// The `.tyson` document to compile.
    pub input_file: PathBuf,
    /// Target for `compile`; `parse` ignores it.
    pub output_file: Option<PathBuf>,
    /// Declaration source to validate against, overriding any in-file
    /// import statement.
    pub interface_file: Option<PathBuf>,
    /// Type name to validate against, overriding any in-file header tag.
    pub interface_name: Option<String>,
    /// Project build settings, passed through to declaration providers that
    /// understand them. The shipped interface-file provider does not read it.
    pub extra_config: Option<PathBuf>,
    /// Policy for object fields the declaration does not name.
    pub unknown_fields: UnknownFieldPolicy,
    /// When set, the normalized text is logged at debug level if decoding
    /// fails.
    pub debug: bool,
}

/// Parses and compiles tyson documents. Declarations loaded for validation
/// are cached on the instance, so repeated `parse` calls against the same
/// declaration source read it once.
pub struct TysonCompiler {
    options: TysonOptions,
    declarations: InterfaceDeclarations,
}

impl TysonCompiler {
    pub fn new(options: TysonOptions) -> Self {
        Self {
            options,
            declarations: InterfaceDeclarations::new(),
        }
    }

    /// Parses the configured input file and returns the decoded value.
    ///
    /// # Errors
    ///
    /// Returns a `TysonError` when the file cannot be read, the normalized
    /// text is not valid JSON, or validation against a located declaration
    /// fails.
    pub fn parse(&mut self) -> Result<Value, TysonError> {
        let path = self.options.input_file.clone();
        let source = fs::read_to_string(&path).map_err(|source| TysonError::Read {
            path: path.display().to_string(),
            source,
        })?;
        self.parse_source(&source, &path.display().to_string())
    }

    /// Parses tyson text directly; `name` labels the text in diagnostics.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`parse`](Self::parse), minus the file read.
    pub fn parse_str(&mut self, source: &str, name: &str) -> Result<Value, TysonError> {
        self.parse_source(source, name)
    }

    fn parse_source(&mut self, source: &str, name: &str) -> Result<Value, TysonError> {
        let metadata = header::extract(
            source,
            self.options.interface_name.as_deref(),
            self.options.interface_file.as_deref(),
        );
        let normalized = normalizer::normalize(source);
        let value = decoder::decode(source, name, &normalized, self.options.debug)?;
        self.validate(&value, &metadata)?;
        Ok(value)
    }

    fn validate(&mut self, value: &Value, metadata: &HeaderMetadata) -> Result<(), TysonError> {
        let Some(type_name) = &metadata.type_name else {
            // untyped document
            return Ok(());
        };
        let Some(reference) = &metadata.declaration_ref else {
            log::warn!("no declaration source for type '{type_name}', skipping validation");
            return Ok(());
        };
        let decl = match self.declarations.resolve(reference, type_name) {
            Ok(Some(decl)) => decl,
            Ok(None) => {
                log::warn!(
                    "type '{}' not found in {}, skipping validation",
                    type_name,
                    reference.display()
                );
                return Ok(());
            }
            Err(err) => {
                log::warn!(
                    "could not load declarations from {}: {err}, skipping validation",
                    reference.display()
                );
                return Ok(());
            }
        };
        log::info!("validating against '{type_name}'");
        validator::validate(value, &decl, self.options.unknown_fields)
    }

    /// Compiles the input file to pretty-printed JSON at the configured
    /// output target, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Fails with `TysonError::MissingOutput` when no output target is
    /// configured; this check runs before any parsing, so it never masks a
    /// parse error. Otherwise propagates `parse` failures and write errors.
    pub fn compile(&mut self) -> Result<(), TysonError> {
        let Some(output) = self.options.output_file.clone() else {
            return Err(TysonError::MissingOutput);
        };
        let value = self.parse()?;
        let mut text = serde_json::to_string_pretty(&value).map_err(|err| {
            TysonError::Serialize {
                message: err.to_string(),
            }
        })?;
        text.push('\n');
        fs::write(&output, text).map_err(|source| TysonError::Write {
            path: output.display().to_string(),
            source,
        })?;
        log::info!(
            "compiled {} to {}",
            self.options.input_file.display(),
            output.display()
        );
        Ok(())
    }
}

/// One-shot helper: parse a tyson file and return the decoded value.
///
/// # Errors
///
/// See [`TysonCompiler::parse`].
pub fn parse_tyson(options: TysonOptions) -> Result<Value, TysonError> {
    TysonCompiler::new(options).parse()
}

/// One-shot helper: compile a tyson file to its JSON output target.
///
/// # Errors
///
/// See [`TysonCompiler::compile`].
pub fn compile_tyson(options: TysonOptions) -> Result<(), TysonError> {
    TysonCompiler::new(options).compile()
}
