//! Field-level conformance checking of a decoded value against a type
//! declaration.

use crate::declarations::{FieldKind, TypeDecl};
use crate::error::{TysonError, ValidationError};
use serde_json::Value;

/// Policy for object fields the declaration does not name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFieldPolicy {
    /// Extra fields are a validation error.
    #[default]
    Deny,
    /// Extra fields pass through unchecked.
    Allow,
}

/// Checks that `value` is an object whose fields conform to `decl`: every
/// non-optional declared field must be present, and present fields must
/// match their declared kind. The value is never mutated.
pub fn validate(
    value: &Value,
    decl: &TypeDecl,
    policy: UnknownFieldPolicy,
) -> Result<(), TysonError> {
    let Value::Object(object) = value else {
        return Err(ValidationError::NotAnObject {
            type_name: decl.name.clone(),
            found: kind_name(value),
        }
        .into());
    };

    for field in &decl.fields {
        match object.get(&field.name) {
            None if field.optional => {}
            None => {
                return Err(ValidationError::MissingField {
                    field: field.name.clone(),
                    type_name: decl.name.clone(),
                }
                .into())
            }
            Some(found) if conforms(found, field.kind) => {}
            Some(found) => {
                return Err(ValidationError::FieldTypeMismatch {
                    field: field.name.clone(),
                    type_name: decl.name.clone(),
                    expected: field.kind.to_string(),
                    found: kind_name(found),
                }
                .into())
            }
        }
    }

    if policy == UnknownFieldPolicy::Deny {
        for key in object.keys() {
            if !decl.fields.iter().any(|f| &f.name == key) {
                return Err(ValidationError::UnknownField {
                    field: key.clone(),
                    type_name: decl.name.clone(),
                }
                .into());
            }
        }
    }

    Ok(())
}

fn conforms(value: &Value, kind: FieldKind) -> bool {
    match kind {
        FieldKind::Any => true,
        FieldKind::String => value.is_string(),
        FieldKind::Number => value.is_number(),
        FieldKind::Boolean => value.is_boolean(),
        FieldKind::Null => value.is_null(),
        FieldKind::Object => value.is_object(),
        FieldKind::Array => value.is_array(),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
