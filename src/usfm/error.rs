use std::io;

use thiserror::Error;

// Every variant carries the 1-based line number of the input
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("line {line}: line does not start with a marker")]
    NotAMarker { line: usize },

    #[error("line {line}: invalid marker format: {text:?}")]
    InvalidMarkerFormat { line: usize, text: String },

    #[error("line {line}: invalid chapter number: {value:?}")]
    InvalidChapterNumber { line: usize, value: String },

    #[error("line {line}: invalid verse number: {value:?}")]
    InvalidVerseNumber { line: usize, value: String },

    #[error("line {line}: unknown marker '\\{tag}'")]
    UnknownMarker { line: usize, tag: String },

    #[error("line {line}: error reading input")]
    InputRead {
        line: usize,
        #[source]
        source: io::Error,
    },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::NotAMarker { line }
            | ParseError::InvalidMarkerFormat { line, .. }
            | ParseError::InvalidChapterNumber { line, .. }
            | ParseError::InvalidVerseNumber { line, .. }
            | ParseError::UnknownMarker { line, .. }
            | ParseError::InputRead { line, .. } => *line,
        }
    }
}
