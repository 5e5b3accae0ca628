pub mod options;

use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub use options::{Locale, LocaleError, ParseOptions, ValidationOptions};

/// A point inside a message. `offset` counts Unicode scalar values, `line` and
/// `column` start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn start() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

/// Span between two positions of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub start: Position,
    pub end: Position,
}

impl Location {
    pub fn new(start: Position, end: Position) -> Self {
        Location { start, end }
    }
}

/// Why a message failed to parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub error_message: String,
    /// The message as the user wrote it, with any internal rewriting undone
    pub original_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// Result of validating a single message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(ErrorDetail),
}

impl ValidationOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, ValidationOutcome::Invalid(_))
    }

    pub fn detail(&self) -> Option<&ErrorDetail> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid(detail) => Some(detail),
        }
    }
}

impl Serialize for ValidationOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ValidationOutcome::Valid => {
                let mut state = serializer.serialize_struct("ValidationOutcome", 1)?;
                state.serialize_field("isError", &false)?;
                state.end()
            }
            ValidationOutcome::Invalid(detail) => {
                let mut state = serializer.serialize_struct("ValidationOutcome", 2)?;
                state.serialize_field("isError", &true)?;
                state.serialize_field("detail", detail)?;
                state.end()
            }
        }
    }
}

/// Key-ordered validation results mirroring the shape of the validated object
pub type ValidationTree = IndexMap<String, ValidationNode>;

/// Either the outcome for a single string or a nested tree of outcomes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ValidationNode {
    Outcome(ValidationOutcome),
    Tree(ValidationTree),
}

impl ValidationNode {
    /// True when every outcome reachable from this node is valid
    pub fn is_valid(&self) -> bool {
        match self {
            ValidationNode::Outcome(outcome) => !outcome.is_error(),
            ValidationNode::Tree(tree) => tree.values().all(ValidationNode::is_valid),
        }
    }

    /// Number of outcomes reachable from this node
    pub fn leaf_count(&self) -> usize {
        match self {
            ValidationNode::Outcome(_) => 1,
            ValidationNode::Tree(tree) => tree.values().map(ValidationNode::leaf_count).sum(),
        }
    }

    /// Every invalid outcome with its dotted key path, in key order.
    /// A bare outcome at the root reports an empty path.
    pub fn invalid_leaves(&self) -> Vec<(String, &ErrorDetail)> {
        let mut leaves = Vec::new();
        collect_invalid(self, "", &mut leaves);
        leaves
    }
}

fn collect_invalid<'a>(
    node: &'a ValidationNode,
    path: &str,
    leaves: &mut Vec<(String, &'a ErrorDetail)>,
) {
    match node {
        ValidationNode::Outcome(outcome) => {
            if let Some(detail) = outcome.detail() {
                leaves.push((path.to_string(), detail));
            }
        }
        ValidationNode::Tree(tree) => {
            for (key, child) in tree {
                let child_path = join_path(path, key);
                collect_invalid(child, &child_path, leaves);
            }
        }
    }
}

/// Append `key` to a dotted object path
pub fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

/// Validation result for one JSON file. Only built through [`FileResult::new`],
/// so `is_valid` always agrees with the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResult {
    file_name: String,
    is_valid: bool,
    tree: ValidationNode,
}

impl FileResult {
    pub fn new(file_name: impl Into<String>, tree: ValidationNode) -> Self {
        FileResult {
            file_name: file_name.into(),
            is_valid: tree.is_valid(),
            tree,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn tree(&self) -> &ValidationNode {
        &self.tree
    }
}

/// One entry of a directory batch. A file that could not be read or decoded
/// is reported on its own instead of failing the whole batch.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum FileReport {
    Checked(FileResult),
    #[serde(rename_all = "camelCase")]
    Failed {
        file_name: String,
        #[serde(serialize_with = "serialize_error")]
        error: ValidatorError,
    },
}

impl FileReport {
    pub fn file_name(&self) -> &str {
        match self {
            FileReport::Checked(result) => result.file_name(),
            FileReport::Failed { file_name, .. } => file_name,
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            FileReport::Checked(result) => result.is_valid(),
            FileReport::Failed { .. } => false,
        }
    }
}

fn serialize_error<S: Serializer>(error: &ValidatorError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// What the top-level dispatcher produced, depending on the source it was given
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Validation {
    String(ValidationOutcome),
    Tree(ValidationNode),
    File(FileResult),
    Directory(Vec<FileReport>),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        match self {
            Validation::String(outcome) => !outcome.is_error(),
            Validation::Tree(node) => node.is_valid(),
            Validation::File(result) => result.is_valid(),
            Validation::Directory(reports) => reports.iter().all(FileReport::is_valid),
        }
    }
}

/// Failures that mean the input could not be validated at all.
/// Grammar violations are never reported through this type.
#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("Translation source must either be string or an object (found {found} at '{path}')")]
    InvalidInputKind { path: String, found: &'static str },

    #[error("Only JSON file can be validated: {0}")]
    UnsupportedFileType(PathBuf),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
