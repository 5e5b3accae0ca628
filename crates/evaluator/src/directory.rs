use futures::future::join_all;
use models::{FileReport, ValidationOptions, ValidatorError};
use std::fs;
use std::path::{Path, PathBuf};

use crate::file::{evaluate_contents, validate_json_file_sync};

fn directory_error(path: &Path, source: std::io::Error) -> ValidatorError {
    ValidatorError::DirectoryRead {
        path: path.to_path_buf(),
        source,
    }
}

fn into_report(path: &Path, result: Result<models::FileResult, ValidatorError>) -> FileReport {
    match result {
        Ok(result) => FileReport::Checked(result),
        Err(error) => {
            logging::warning(&format!("Skipping {}: {}", path.display(), error));
            FileReport::Failed {
                file_name: path.display().to_string(),
                error,
            }
        }
    }
}

/// JSON files directly inside `path`, sorted by file name
fn list_json_files(path: &Path) -> Result<Vec<PathBuf>, ValidatorError> {
    let entries = fs::read_dir(path).map_err(|e| directory_error(path, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry_path = entry.map_err(|e| directory_error(path, e))?.path();
        if utils::is_json_file(&entry_path) {
            files.push(entry_path);
        }
    }
    files.sort();

    logging::info(&format!(
        "Found {} JSON file(s) in {}",
        files.len(),
        path.display()
    ));
    Ok(files)
}

async fn list_json_files_async(path: &Path) -> Result<Vec<PathBuf>, ValidatorError> {
    let mut entries = tokio::fs::read_dir(path)
        .await
        .map_err(|e| directory_error(path, e))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| directory_error(path, e))?
    {
        let entry_path = entry.path();
        let is_file = tokio::fs::metadata(&entry_path)
            .await
            .map(|metadata| metadata.is_file())
            .unwrap_or(false);
        if is_file && utils::is_json_file_name(&entry_path) {
            files.push(entry_path);
        }
    }
    files.sort();

    logging::info(&format!(
        "Found {} JSON file(s) in {}",
        files.len(),
        path.display()
    ));
    Ok(files)
}

/// Validate every JSON file directly inside a directory, blocking on each read
pub fn validate_directory_sync(
    path: &Path,
    options: &ValidationOptions,
) -> Result<Vec<FileReport>, ValidatorError> {
    let files = list_json_files(path)?;

    Ok(files
        .iter()
        .map(|file| into_report(file, validate_json_file_sync(file, options)))
        .collect())
}

/// Validate every JSON file directly inside a directory. All files are read
/// concurrently; reports come back in file name order.
pub async fn validate_directory(
    path: &Path,
    options: &ValidationOptions,
) -> Result<Vec<FileReport>, ValidatorError> {
    let files = list_json_files_async(path).await?;

    let contents = join_all(files.iter().map(tokio::fs::read_to_string)).await;

    Ok(files
        .iter()
        .zip(contents)
        .map(|(file, content)| {
            let result = content
                .map_err(|e| ValidatorError::FileRead {
                    path: file.clone(),
                    source: e,
                })
                .and_then(|content| evaluate_contents(file, &content, options));
            into_report(file, result)
        })
        .collect())
}
