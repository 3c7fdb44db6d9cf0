// Parsing according to USFM 3.1 https://docs.usfm.bible/usfm/3.1/index.html
//
// Only the book structure (\id \h \toc1-3 \mt1 \c \s1-3 \r \v) and footnotes
// (\f ... \f*) are handled:
// - one marker per line; a line that does not start with "\" is not a marker
// - markers outside the set above are skipped unless strict mode is on

pub mod document;
pub mod error;
pub mod marker;
pub mod parser;
pub mod verse;

pub use document::{Chapter, Document, Footnote, Section, TocEntry, Verse};
pub use error::ParseError;
pub use parser::{ParseOptions, Parser};
