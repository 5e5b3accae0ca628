use models::{FileResult, ValidationOptions, ValidatorError};
use serde_json::Value;
use std::fs;
use std::path::Path;
use validators::validate_tree;

fn ensure_json(path: &Path) -> Result<(), ValidatorError> {
    if utils::is_json_file_name(path) {
        Ok(())
    } else {
        Err(ValidatorError::UnsupportedFileType(path.to_path_buf()))
    }
}

/// Decode file contents and validate the resulting tree
pub(crate) fn evaluate_contents(
    path: &Path,
    content: &str,
    options: &ValidationOptions,
) -> Result<FileResult, ValidatorError> {
    let source: Value = serde_json::from_str(content).map_err(|e| ValidatorError::JsonParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    let tree = validate_tree(
        &source,
        &options.parse_options,
        options.ignore_component_tags,
    )?;

    let result = FileResult::new(path.display().to_string(), tree);
    logging::debug(&format!(
        "Validated {} ({} message(s), valid: {})",
        result.file_name(),
        result.tree().leaf_count(),
        result.is_valid()
    ));
    Ok(result)
}

/// Validate one JSON translation file, blocking on the read
pub fn validate_json_file_sync(
    path: &Path,
    options: &ValidationOptions,
) -> Result<FileResult, ValidatorError> {
    ensure_json(path)?;

    let content = fs::read_to_string(path).map_err(|e| ValidatorError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    evaluate_contents(path, &content, options)
}

/// Validate one JSON translation file
pub async fn validate_json_file(
    path: &Path,
    options: &ValidationOptions,
) -> Result<FileResult, ValidatorError> {
    ensure_json(path)?;

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ValidatorError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    evaluate_contents(path, &content, options)
}
