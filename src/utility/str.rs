use once_cell::sync::Lazy;
use regex::Regex;

// Only U+0020; tabs and newlines are left as they are
pub fn collapse_spaces(s: &str) -> String {
    static REGEX_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());
    REGEX_SPACES.replace_all(s, " ").into_owned()
}

// Field safe to put in a tab separated row
pub fn clean_tsv_field(s: &str) -> String {
    let s = s.replace(['\t', '\n', '\r'], " ");
    collapse_spaces(&s).trim().to_owned()
}
