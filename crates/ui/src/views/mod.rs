pub mod file;
pub mod message;

#[cfg(test)]
pub(crate) fn render_to_string<F>(render: F) -> String
where
    F: FnOnce(&mut dyn std::io::Write) -> std::io::Result<()>,
{
    colored::control::set_override(false);
    let mut buffer = Vec::new();
    render(&mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}
