//! Decoding of normalized text as strict JSON, with failures mapped back to
//! the original, un-normalized source.

use crate::error::{DecodeError, TysonError};
use crate::normalizer::Normalized;
use crate::utils;
use miette::NamedSource;
use serde_json::Value;

/// Parses normalized text as strict JSON. All-or-nothing: on failure no
/// partial value is returned. The decoder's position (which addresses the
/// normalized text) is translated through the normalizer's position map so
/// the reported line and column point into `source`.
pub fn decode(
    source: &str,
    source_name: &str,
    normalized: &Normalized,
    debug: bool,
) -> Result<Value, TysonError> {
    match serde_json::from_str::<Value>(&normalized.text) {
        Ok(value) => Ok(value),
        Err(err) => {
            if debug {
                log::debug!(
                    "normalized text that failed to decode:\n{}",
                    normalized.text
                );
            }
            // serde_json reports line 0 when it has no position to offer
            if err.line() == 0 {
                return Err(DecodeError::Unlocated {
                    message: err.to_string(),
                }
                .into());
            }
            let normalized_offset = utils::offset_at(&normalized.text, err.line(), err.column());
            let offset = normalized.source_offset(normalized_offset);
            let (line, column) = utils::line_col_at(source, offset);
            Err(DecodeError::Syntax {
                message: err.to_string(),
                line,
                column,
                src: NamedSource::new(source_name, source.to_string()),
                span: (offset.min(source.len()), 0).into(),
            }
            .into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;

    fn decode_str(source: &str) -> Result<Value, TysonError> {
        decode(source, "test.tyson", &normalize(source), false)
    }

    #[test]
    fn test_decodes_plain_json() {
        let value = decode_str(r#"{"a": 1, "b": [true, null, "x"]}"#).unwrap();
        assert_eq!(value["a"], 1);
        assert_eq!(value["b"][2], "x");
    }

    #[test]
    fn test_failure_reports_position_in_original_text() {
        let source = "{\n  \"a\": nope,\n}";
        let err = decode_str(source).unwrap_err();
        match err {
            TysonError::Decode(DecodeError::Syntax { line, column, .. }) => {
                assert_eq!(line, 2);
                // the malformed token starts at column 8
                assert!((7..=9).contains(&column), "column was {column}");
            }
            other => panic!("expected a located decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_failure_position_survives_stripped_content() {
        // a comment line above the error must not shift the reported line
        let source = "// header comment\n{\n  \"a\": oops\n}";
        let err = decode_str(source).unwrap_err();
        match err {
            TysonError::Decode(DecodeError::Syntax { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected a located decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_no_partial_value_on_failure() {
        assert!(decode_str("{ \"a\": 1, \"b\": }").is_err());
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(decode_str("").is_err());
    }
}
