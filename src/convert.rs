//! YAML ↔ JSON document conversion
//!
//! Both directions go through [`serde_yaml::Value`], whose mappings keep
//! insertion order, so keys come out in the order the source declared them.
//!
//! Empty documents convert to the neutral form of the target format:
//! `{}` for JSON and the empty string for YAML.
//!
//! ## CloudFormation short-form tags
//!
//! YAML templates may use short-form intrinsic functions, which have no JSON
//! equivalent. They are rewritten to their long form:
//!
//! ```yaml
//! BucketName: !Ref Bucket          # {"Ref": "Bucket"}
//! Arn: !GetAtt Bucket.Arn          # {"Fn::GetAtt": ["Bucket", "Arn"]}
//! Url: !Sub "https://${Host}"      # {"Fn::Sub": "https://${Host}"}
//! ```

use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};

use crate::error::{CfnSphereError, Result};

/// Convert a YAML document to pretty-printed JSON (2-space indentation)
///
/// Blank input, or a document holding nothing but null, yields `"{}"`.
/// Merge keys (`<<: *anchor`) are resolved. Infinite and NaN floats have no
/// JSON form and are rejected.
pub fn convert_yaml_to_json_string(text: &str) -> Result<String> {
    if text.trim().is_empty() {
        return Ok("{}".to_string());
    }

    let mut document: Value = serde_yaml::from_str(text)?;
    if document.is_null() {
        return Ok("{}".to_string());
    }

    document.apply_merge()?;
    ensure_finite(&document, "$")?;

    let document = expand_intrinsics(document);
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Convert a JSON document to block-style YAML
///
/// Blank input, `null` and the empty object all yield `""`.
pub fn convert_json_to_yaml_string(text: &str) -> Result<String> {
    if text.trim().is_empty() {
        return Ok(String::new());
    }

    let document: Value = serde_json::from_str(text)?;
    if is_empty_document(&document) {
        return Ok(String::new());
    }

    Ok(serde_yaml::to_string(&document)?)
}

fn is_empty_document(document: &Value) -> bool {
    match document {
        Value::Null => true,
        Value::Mapping(mapping) => mapping.is_empty(),
        _ => false,
    }
}

/// Reject floats JSON cannot represent; `path` locates the offending value
fn ensure_finite(value: &Value, path: &str) -> Result<()> {
    match value {
        Value::Number(number) if number.is_nan() || number.is_infinite() => Err(
            CfnSphereError::Unrepresentable(format!("{} is {}", path, number)),
        ),
        Value::Mapping(mapping) => mapping.iter().try_for_each(|(key, value)| {
            let key = key.as_str().map_or_else(|| format!("{:?}", key), str::to_string);
            ensure_finite(value, &format!("{}.{}", path, key))
        }),
        Value::Sequence(items) => items
            .iter()
            .enumerate()
            .try_for_each(|(index, item)| ensure_finite(item, &format!("{}[{}]", path, index))),
        Value::Tagged(tagged) => ensure_finite(&tagged.value, path),
        _ => Ok(()),
    }
}

/// Rewrite short-form intrinsic tags (`!Ref`, `!GetAtt`, `!Sub`, ...) into
/// their single-key mapping form
fn expand_intrinsics(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => {
            let TaggedValue { tag, value } = *tagged;
            let tag = tag.to_string();
            let name = tag.trim_start_matches('!');

            let inner = match (name, expand_intrinsics(value)) {
                ("GetAtt", Value::String(attribute)) => match attribute.split_once('.') {
                    Some((resource, attr)) => {
                        Value::Sequence(vec![Value::from(resource), Value::from(attr)])
                    }
                    None => Value::String(attribute),
                },
                (_, inner) => inner,
            };

            let key = match name {
                "Ref" | "Condition" => name.to_string(),
                _ => format!("Fn::{}", name),
            };

            let mut mapping = Mapping::new();
            mapping.insert(Value::String(key), inner);
            Value::Mapping(mapping)
        }
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .into_iter()
                .map(|(key, value)| (key, expand_intrinsics(value)))
                .collect(),
        ),
        Value::Sequence(items) => {
            Value::Sequence(items.into_iter().map(expand_intrinsics).collect())
        }
        other => other,
    }
}
