use once_cell::sync::Lazy;
use regex::Regex;

use crate::usfm::error::ParseError;

// \tag content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker<'a> {
    pub tag: &'a str,
    pub content: &'a str,
    pub line: usize, // for error messages only
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind<'a> {
    Id,             // \id
    Header,         // \h
    Toc(u8),        // \toc1 \toc2 \toc3
    MainTitle,      // \mt1
    Chapter,        // \c
    Section(u8),    // \s1 \s2 \s3
    Reference,      // \r
    Verse,          // \v
    Unknown(&'a str),
}

impl<'a> MarkerKind<'a> {
    pub fn of(tag: &'a str) -> Self {
        match tag {
            "id" => Self::Id,
            "h" => Self::Header,
            "toc1" => Self::Toc(1),
            "toc2" => Self::Toc(2),
            "toc3" => Self::Toc(3),
            "mt1" => Self::MainTitle,
            "c" => Self::Chapter,
            "s1" | "s2" | "s3" => Self::Section(section_level(tag)),
            "r" => Self::Reference,
            "v" => Self::Verse,
            tag => Self::Unknown(tag),
        }
    }
}

fn section_level(tag: &str) -> u8 {
    match tag {
        "s2" => 2,
        "s3" => 3,
        _ => 1,
    }
}

// `line` must be trimmed and non-empty
pub fn tokenize_marker(line: &str, line_number: usize) -> Result<Marker<'_>, ParseError> {
    // "*" after the tag closes a span (\f*)
    static REGEX_MARKER: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^\\([a-z0-9]+)\*?\s*(.*)$").unwrap());

    if !line.starts_with('\\') {
        return Err(ParseError::NotAMarker { line: line_number });
    }

    let captures = REGEX_MARKER
        .captures(line)
        .ok_or_else(|| ParseError::InvalidMarkerFormat {
            line: line_number,
            text: line.to_owned(),
        })?;

    let (_, [tag, content]) = captures.extract();

    Ok(Marker {
        tag,
        content: content.trim(),
        line: line_number,
    })
}
