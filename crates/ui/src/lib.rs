// Console presenter for icu-validator
//
// - views::message: single outcomes and nested validation trees
// - views::file: file banners and directory batches
//
// Every view renders into an `io::Write` sink; the `print_*` entry points
// write to stdout.

pub mod views;

use models::{FileReport, FileResult, ValidationNode, ValidationOutcome};
use std::io::{self, Write};

pub use views::file::{render_directory, render_file, render_report};
pub use views::message::{render_outcome, render_tree};

fn to_stdout<F>(render: F)
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    // A closed stdout is not worth failing validation over
    let _ = render(&mut handle).and_then(|_| handle.flush());
}

pub fn print_outcome(text: &str, outcome: &ValidationOutcome) {
    to_stdout(|out| render_outcome(out, text, outcome));
}

pub fn print_tree(node: &ValidationNode) {
    to_stdout(|out| render_tree(out, node));
}

pub fn print_file(result: &FileResult, verbose: bool) {
    to_stdout(|out| render_file(out, result, verbose));
}

pub fn print_report(report: &FileReport, verbose: bool) {
    to_stdout(|out| render_report(out, report, verbose));
}

pub fn print_directory(reports: &[FileReport], verbose: bool) {
    to_stdout(|out| render_directory(out, reports, verbose));
}
