use colored::*;
use models::{ErrorDetail, ValidationNode, ValidationOutcome};
use std::io::{self, Write};

fn location_text(detail: &ErrorDetail) -> String {
    detail
        .location
        .as_ref()
        .and_then(|location| serde_json::to_string(location).ok())
        .unwrap_or_else(|| "n/a".to_string())
}

fn render_detail(out: &mut dyn Write, detail: &ErrorDetail) -> io::Result<()> {
    writeln!(out, "Error :- {}", detail.error_message.red())?;
    writeln!(out, "Location :- {}", location_text(detail))
}

fn render_invalid_header(out: &mut dyn Write, detail: &ErrorDetail) -> io::Result<()> {
    writeln!(
        out,
        "{}",
        format!("Invalid ICU string :- {}", detail.original_text).on_red()
    )
}

/// Render the outcome for one message
pub fn render_outcome(
    out: &mut dyn Write,
    text: &str,
    outcome: &ValidationOutcome,
) -> io::Result<()> {
    match outcome {
        ValidationOutcome::Valid => {
            writeln!(out, "{}", format!("Valid ICU string :- {}", text).green())
        }
        ValidationOutcome::Invalid(detail) => {
            render_invalid_header(out, detail)?;
            render_detail(out, detail)
        }
    }
}

/// Render the invalid leaves of a tree with their dotted key path.
/// Valid leaves print nothing. A bare string at the root has no path to show.
pub fn render_tree(out: &mut dyn Write, node: &ValidationNode) -> io::Result<()> {
    if let ValidationNode::Outcome(outcome) = node {
        return match outcome.detail() {
            Some(detail) => {
                render_invalid_header(out, detail)?;
                render_detail(out, detail)
            }
            None => Ok(()),
        };
    }

    for (path, detail) in node.invalid_leaves() {
        render_invalid_header(out, detail)?;
        writeln!(out, "{}", format!("Object path :- {}", path).magenta())?;
        render_detail(out, detail)?;
    }
    Ok(())
}
