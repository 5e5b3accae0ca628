use models::{join_path, ParseOptions, ValidationNode, ValidationTree, ValidatorError};
use serde_json::{Map, Value};

use crate::validate_string;

/// Validate a string or an arbitrarily nested object of strings.
///
/// The result has exactly the keys of the input. Any other JSON value is
/// rejected with the dotted path of the key holding it.
pub fn validate_tree(
    source: &Value,
    options: &ParseOptions,
    tag_mode: bool,
) -> Result<ValidationNode, ValidatorError> {
    validate_value(source, "", options, tag_mode)
}

/// Validate every value of a JSON object
pub fn validate_object(
    source: &Map<String, Value>,
    options: &ParseOptions,
    tag_mode: bool,
) -> Result<ValidationNode, ValidatorError> {
    validate_map(source, "", options, tag_mode)
}

fn validate_value(
    value: &Value,
    path: &str,
    options: &ParseOptions,
    tag_mode: bool,
) -> Result<ValidationNode, ValidatorError> {
    match value {
        Value::String(text) => Ok(ValidationNode::Outcome(validate_string(
            text, options, tag_mode,
        ))),
        Value::Object(map) => validate_map(map, path, options, tag_mode),
        other => Err(ValidatorError::InvalidInputKind {
            path: path.to_string(),
            found: kind_name(other),
        }),
    }
}

fn validate_map(
    map: &Map<String, Value>,
    path: &str,
    options: &ParseOptions,
    tag_mode: bool,
) -> Result<ValidationNode, ValidatorError> {
    let mut tree = ValidationTree::with_capacity(map.len());
    for (key, value) in map {
        let child_path = join_path(path, key);
        let node = validate_value(value, &child_path, options, tag_mode)?;
        tree.insert(key.clone(), node);
    }
    Ok(ValidationNode::Tree(tree))
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Object(_) => "object",
    }
}
