// validators crate

mod string;
mod tree;

pub use string::validate_string;
pub use tree::{validate_object, validate_tree};
