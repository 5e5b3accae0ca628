//! Validate ICU MessageFormat strings, translation objects, JSON translation
//! files and directories of them.
//!
//! ```no_run
//! use icu_validator::{validate, Source, ValidationOptions};
//!
//! let options = ValidationOptions::default();
//! let validation = validate(&Source::from("Hello {name}"), &options).unwrap();
//! assert!(validation.is_valid());
//! ```

use std::path::Path;

pub use evaluator::{validate, validate_directory_sync, validate_json_file_sync, Source};
pub use models::{
    ErrorDetail, FileReport, FileResult, Locale, LocaleError, Location, ParseOptions, Position,
    Validation, ValidationNode, ValidationOptions, ValidationOutcome, ValidationTree,
    ValidatorError,
};
pub use parser::{parse, ErrorKind, ParserError};
pub use validators::{validate_object, validate_string, validate_tree};

/// Validate a single JSON translation file, printing the result when
/// `pretty_print` is set
pub async fn validate_file(
    path: impl AsRef<Path>,
    options: &ValidationOptions,
) -> Result<FileResult, ValidatorError> {
    let result = evaluator::validate_json_file(path.as_ref(), options).await?;
    if options.pretty_print {
        ui::print_file(&result, options.verbose);
    }
    Ok(result)
}

/// Validate every JSON file directly inside a directory, printing the batch
/// when `pretty_print` is set
pub async fn validate_directory(
    path: impl AsRef<Path>,
    options: &ValidationOptions,
) -> Result<Vec<FileReport>, ValidatorError> {
    let reports = evaluator::validate_directory(path.as_ref(), options).await?;
    if options.pretty_print {
        ui::print_directory(&reports, options.verbose);
    }
    Ok(reports)
}
