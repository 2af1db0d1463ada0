use once_cell::sync::Lazy;
use regex_lite::Regex;

/// Any single `[...]`, `(...)` or `{...}` span, shortest first.
static BRACKETED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\[\(\{].*?[\]\)\}]").expect("bracket pattern is valid")
});

/// Canonical form of a title for fuzzy comparison.
///
/// Lower-cases, drops bracketed spans such as "(Remastered)" or
/// "[Deluxe Edition]", strips everything that is not alphanumeric or
/// whitespace, then trims.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let unbracketed = BRACKETED.replace_all(&lowered, "");
    unbracketed
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}
