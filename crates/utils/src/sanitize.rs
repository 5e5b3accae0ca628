use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::borrow::Cow;

lazy_static! {
    // <0> <1> </0> </1> ... ASCII digits only
    static ref NUMERIC_TAG: Regex =
        Regex::new(r"<(/?)([0-9]+)>").expect("numeric tag pattern is valid");

    // <Trans0> </Trans0> ...
    static ref RENAMED_TAG: Regex =
        Regex::new(r"<(/?)Trans([0-9]+)>").expect("renamed tag pattern is valid");
}

/// Rename numeric component tags (`<0>`, `</0>`) to `<Trans0>`, `</Trans0>` so
/// the grammar parser sees ordinary rich text tags. Identity when `tag_mode`
/// is off. Tags are not balanced or checked here.
pub fn sanitize_for_parsing(text: &str, tag_mode: bool) -> Cow<'_, str> {
    if !tag_mode {
        return Cow::Borrowed(text);
    }

    NUMERIC_TAG.replace_all(text, |caps: &Captures| format!("<{}Trans{}>", &caps[1], &caps[2]))
}

/// Inverse of [`sanitize_for_parsing`], used before showing text to the user
pub fn sanitize_for_display(text: &str, tag_mode: bool) -> Cow<'_, str> {
    if !tag_mode {
        return Cow::Borrowed(text);
    }

    RENAMED_TAG.replace_all(text, |caps: &Captures| format!("<{}{}>", &caps[1], &caps[2]))
}
