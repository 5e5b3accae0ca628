use colored::*;
use models::{FileReport, FileResult};
use std::io::{self, Write};

use crate::views::message::render_tree;

fn render_header(out: &mut dyn Write, file_name: &str) -> io::Result<()> {
    writeln!(
        out,
        "{}",
        format!("Validating file :- {}", file_name).black().on_green()
    )
}

/// Render one file. Valid files stay silent unless `verbose` is set.
pub fn render_file(out: &mut dyn Write, result: &FileResult, verbose: bool) -> io::Result<()> {
    if result.is_valid() && !verbose {
        return Ok(());
    }

    render_header(out, result.file_name())?;
    render_tree(out, result.tree())?;
    writeln!(out, "{}", "Done!!!".black().on_green())
}

/// Render a batch entry; files that could not be checked are always shown
pub fn render_report(out: &mut dyn Write, report: &FileReport, verbose: bool) -> io::Result<()> {
    match report {
        FileReport::Checked(result) => render_file(out, result, verbose),
        FileReport::Failed { file_name, error } => {
            render_header(out, file_name)?;
            writeln!(out, "Error :- {}", error.to_string().red())
        }
    }
}

/// Render every entry of a batch followed by a summary line
pub fn render_directory(
    out: &mut dyn Write,
    reports: &[FileReport],
    verbose: bool,
) -> io::Result<()> {
    for report in reports {
        render_report(out, report, verbose)?;
    }

    let valid_count = reports.iter().filter(|report| report.is_valid()).count();
    writeln!(
        out,
        "\nSummary: {} valid, {} invalid",
        valid_count,
        reports.len() - valid_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::render_to_string;
    use models::{
        ErrorDetail, ValidationNode, ValidationOutcome, ValidationTree, ValidatorError,
    };
    use std::path::PathBuf;

    fn file(name: &str, valid: bool) -> FileResult {
        let outcome = if valid {
            ValidationOutcome::Valid
        } else {
            ValidationOutcome::Invalid(ErrorDetail {
                error_message: "EMPTY_ARGUMENT".to_string(),
                original_text: "Hi {}".to_string(),
                location: None,
            })
        };
        let mut tree = ValidationTree::new();
        tree.insert("greeting".to_string(), ValidationNode::Outcome(outcome));
        FileResult::new(name, ValidationNode::Tree(tree))
    }

    #[test]
    fn test_valid_file_is_silent_by_default() {
        let output = render_to_string(|out| render_file(out, &file("en.json", true), false));
        assert!(output.is_empty());
    }

    #[test]
    fn test_valid_file_is_shown_when_verbose() {
        let output = render_to_string(|out| render_file(out, &file("en.json", true), true));
        assert_eq!(output, "Validating file :- en.json\nDone!!!\n");
    }

    #[test]
    fn test_invalid_file_banner() {
        let output = render_to_string(|out| render_file(out, &file("de.json", false), false));
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.first(), Some(&"Validating file :- de.json"));
        assert!(lines.contains(&"Object path :- greeting"));
        assert!(lines.contains(&"Error :- EMPTY_ARGUMENT"));
        assert_eq!(lines.last(), Some(&"Done!!!"));
    }

    #[test]
    fn test_directory_summary_counts_failures_as_invalid() {
        let reports = vec![
            FileReport::Checked(file("a.json", true)),
            FileReport::Checked(file("b.json", false)),
            FileReport::Failed {
                file_name: "c.json".to_string(),
                error: ValidatorError::UnsupportedFileType(PathBuf::from("c.json")),
            },
        ];

        let output = render_to_string(|out| render_directory(out, &reports, false));

        assert!(!output.contains("a.json"));
        assert!(output.contains("Validating file :- b.json"));
        assert!(output.contains("Validating file :- c.json"));
        assert!(output.contains("Error :- Only JSON file can be validated: c.json"));
        assert!(output.ends_with("Summary: 1 valid, 2 invalid\n"));
    }
}
