use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    usfm::{
        document::{Footnote, Verse},
        error::ParseError,
    },
    utility::str::collapse_spaces,
};

// \f + \fr 1:1 \ft text\f*
static REGEX_FOOTNOTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\f\s*([^\\]*?)\\fr\s*([^\\]*?)\\ft\s*([^\\]*?)\\f\*").unwrap()
});

// `content` is everything after "\v": the verse number then the body
pub fn parse_verse(
    content: &str,
    include_footnotes: bool,
    line_number: usize,
) -> Result<Verse, ParseError> {
    let content = content.trim();
    let (number, body) = match content.split_once(char::is_whitespace) {
        Some((number, body)) => (number, body.trim_start()),
        None => (content, ""),
    };

    let number: i64 = number
        .parse()
        .map_err(|_| ParseError::InvalidVerseNumber {
            line: line_number,
            value: number.to_owned(),
        })?;

    if !include_footnotes {
        return Ok(Verse {
            number,
            text: body.to_owned(),
            footnotes: Vec::new(),
        });
    }

    Ok(Verse {
        number,
        text: remove_footnotes(body),
        footnotes: extract_footnotes(body),
    })
}

pub fn extract_footnotes(body: &str) -> Vec<Footnote> {
    REGEX_FOOTNOTE
        .captures_iter(body)
        .map(|captures| {
            let (_, [caller, reference, text]) = captures.extract();
            Footnote {
                caller: caller.trim().to_owned(),
                reference: reference.trim().to_owned(),
                text: text.trim().to_owned(),
            }
        })
        .collect()
}

// An unterminated \f is not matched and stays in the text
pub fn remove_footnotes(body: &str) -> String {
    let removed = REGEX_FOOTNOTE.replace_all(body, "");
    collapse_spaces(&removed).trim().to_owned()
}
