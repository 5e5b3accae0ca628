use models::{ErrorDetail, ParseOptions, ValidationOutcome};
use utils::{sanitize_for_display, sanitize_for_parsing};

/// Check a single message against the ICU grammar.
///
/// With `tag_mode` on, numeric component tags are renamed before parsing and
/// the reported `original_text` shows them as the user wrote them.
pub fn validate_string(text: &str, options: &ParseOptions, tag_mode: bool) -> ValidationOutcome {
    let sanitized = sanitize_for_parsing(text, tag_mode);

    match parser::parse(&sanitized, options) {
        Ok(_) => ValidationOutcome::Valid,
        Err(error) => ValidationOutcome::Invalid(ErrorDetail {
            error_message: error.to_string(),
            original_text: sanitize_for_display(text, tag_mode).into_owned(),
            location: error.location(),
        }),
    }
}
