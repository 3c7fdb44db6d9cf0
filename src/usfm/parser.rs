use std::io::BufRead;

use tracing::{debug, info};

use crate::usfm::{
    document::{Chapter, Document, Section, TocEntry},
    error::ParseError,
    marker::{tokenize_marker, MarkerKind},
    verse::parse_verse,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub strict_mode: bool,        // unknown or malformed markers are errors
    pub include_footnotes: bool,  // extract \f ... \f* from verses
    pub include_references: bool, // attach \r to sections
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            strict_mode: false,
            include_footnotes: true,
            include_references: true,
        }
    }
}

// Holds no per-document state, so one parser can be shared between threads
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Parser { options }
    }

    pub fn parse_str(&self, input: &str, source_file: &str) -> Result<Document, ParseError> {
        self.parse(input.as_bytes(), source_file)
    }

    // Invalid UTF-8 is replaced with U+FFFD; only a failing reader is an error
    pub fn parse<R: BufRead>(&self, mut reader: R, source_file: &str) -> Result<Document, ParseError> {
        let mut document = Document::new(source_file);

        let mut current_chapter: Option<Chapter> = None;
        let mut current_section: Option<Section> = None;

        let mut buffer = Vec::new();
        let mut line_number = 0;

        loop {
            buffer.clear();
            let read = reader
                .read_until(b'\n', &mut buffer)
                .map_err(|source| ParseError::InputRead {
                    line: line_number + 1,
                    source,
                })?;
            if read == 0 {
                break;
            }
            line_number += 1;

            let line = String::from_utf8_lossy(&buffer);
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let marker = match tokenize_marker(line, line_number) {
                Ok(marker) => marker,
                Err(err) if self.options.strict_mode => return Err(err),
                Err(err) => {
                    debug!(%err, "Skipping line");
                    continue;
                }
            };

            match MarkerKind::of(marker.tag) {
                MarkerKind::Id => document.id = marker.content.to_owned(),
                MarkerKind::Header => document.header = marker.content.to_owned(),
                MarkerKind::MainTitle => document.main_title = marker.content.to_owned(),

                MarkerKind::Toc(level) => document.table_of_contents.push(TocEntry {
                    level,
                    text: marker.content.to_owned(),
                }),

                MarkerKind::Chapter => {
                    let number: i64 = marker.content.parse().map_err(|_| {
                        ParseError::InvalidChapterNumber {
                            line: marker.line,
                            value: marker.content.to_owned(),
                        }
                    })?;

                    flush_section(&mut current_chapter, current_section.take());
                    flush_chapter(&mut document, current_chapter.take());

                    current_chapter = Some(Chapter::new(number));
                }

                MarkerKind::Section(level) => {
                    flush_section(&mut current_chapter, current_section.take());
                    current_section = Some(Section::new(level, marker.content));
                }

                MarkerKind::Reference => {
                    if self.options.include_references {
                        if let Some(section) = current_section.as_mut() {
                            section.reference = marker.content.to_owned();
                        }
                    }
                }

                MarkerKind::Verse => {
                    let verse =
                        parse_verse(marker.content, self.options.include_footnotes, marker.line)?;

                    current_section
                        .get_or_insert_with(Section::implicit)
                        .verses
                        .push(verse);
                }

                MarkerKind::Unknown(tag) => {
                    if self.options.strict_mode {
                        return Err(ParseError::UnknownMarker {
                            line: marker.line,
                            tag: tag.to_owned(),
                        });
                    }
                    debug!(line = marker.line, tag, "Skipping unknown marker");
                }
            }
        }

        flush_section(&mut current_chapter, current_section.take());
        flush_chapter(&mut document, current_chapter.take());

        info!(
            source_file,
            id = %document.id,
            chapters = document.chapters.len(),
            verses = document.verse_count(),
            "Parsed document"
        );

        Ok(document)
    }
}

// A section opened before the first \c has no chapter to go to and is dropped
fn flush_section(chapter: &mut Option<Chapter>, section: Option<Section>) {
    if let (Some(chapter), Some(section)) = (chapter.as_mut(), section) {
        chapter.sections.push(section);
    }
}

fn flush_chapter(document: &mut Document, chapter: Option<Chapter>) {
    if let Some(chapter) = chapter {
        debug!(number = chapter.number, sections = chapter.sections.len(), "Chapter finished");
        document.chapters.push(chapter);
    }
}
