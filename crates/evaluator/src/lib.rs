// evaluator crate

mod directory;
mod file;

use models::{Validation, ValidationOptions, ValidatorError};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::Path;
use validators::{validate_string, validate_tree};

pub use directory::{validate_directory, validate_directory_sync};
pub use file::{validate_json_file, validate_json_file_sync};

/// What the dispatcher was asked to validate
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// An in-memory translation object (or a bare JSON string)
    Object(Value),
    /// A path to a JSON file or directory, or else a literal message
    Text(String),
}

impl From<Value> for Source {
    fn from(value: Value) -> Self {
        Source::Object(value)
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Source::Text(text.to_string())
    }
}

impl From<String> for Source {
    fn from(text: String) -> Self {
        Source::Text(text)
    }
}

enum TextKind {
    File,
    Directory,
    Literal,
}

fn classify(text: &str) -> TextKind {
    match fs::metadata(text) {
        Ok(metadata) if metadata.is_file() => TextKind::File,
        Ok(metadata) if metadata.is_dir() => TextKind::Directory,
        Ok(_) => TextKind::Literal,
        Err(e) if e.kind() == io::ErrorKind::NotFound => TextKind::Literal,
        Err(e) => {
            logging::debug(&format!(
                "Treating input as a message, path probe failed: {}",
                e
            ));
            TextKind::Literal
        }
    }
}

/// Validate a literal message, a translation object, a JSON file or a
/// directory of JSON files, picking the route from the source itself.
///
/// Text naming an existing file or directory is validated from disk; any other
/// text is treated as the message to check.
pub fn validate(
    source: &Source,
    options: &ValidationOptions,
) -> Result<Validation, ValidatorError> {
    let validation = match source {
        Source::Object(value) => {
            logging::debug("Validating translation object");
            Validation::Tree(validate_tree(
                value,
                &options.parse_options,
                options.ignore_component_tags,
            )?)
        }
        Source::Text(text) => match classify(text) {
            TextKind::File => {
                logging::info(&format!("Validating file {}", text));
                Validation::File(validate_json_file_sync(Path::new(text), options)?)
            }
            TextKind::Directory => {
                logging::info(&format!("Validating directory {}", text));
                Validation::Directory(validate_directory_sync(Path::new(text), options)?)
            }
            TextKind::Literal => Validation::String(validate_string(
                text,
                &options.parse_options,
                options.ignore_component_tags,
            )),
        },
    };

    if options.pretty_print {
        present(source, &validation, options.verbose);
    }

    Ok(validation)
}

/// Print a dispatcher result to stdout
pub fn present(source: &Source, validation: &Validation, verbose: bool) {
    match validation {
        Validation::String(outcome) => {
            let text = match source {
                Source::Text(text) => text.as_str(),
                Source::Object(_) => "",
            };
            ui::print_outcome(text, outcome);
        }
        Validation::Tree(node) => {
            // A bare JSON string validates to a single outcome
            if let (Source::Object(Value::String(text)), models::ValidationNode::Outcome(outcome)) =
                (source, node)
            {
                ui::print_outcome(text, outcome);
            } else {
                ui::print_tree(node);
            }
        }
        Validation::File(result) => ui::print_file(result, verbose),
        Validation::Directory(reports) => ui::print_directory(reports, verbose),
    }
}
