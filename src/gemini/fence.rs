use lazy_static::lazy_static;
use regex::Regex;

/// Removes every ```` ```json ```` / ```` ``` ```` marker and trims the rest.
pub fn strip_code_fences(text: &str) -> String {
    lazy_static! {
        static ref FENCE_RE: Regex = Regex::new(r"```(?:json)?").unwrap();
    }
    FENCE_RE.replace_all(text, "").trim().to_string()
}
