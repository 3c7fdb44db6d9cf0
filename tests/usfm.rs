use std::{
    fs,
    io::{self, BufReader, Read},
};

use anyhow::Result;

use usfmp::{
    renderer::{render_json, render_text, render_tsv},
    usfm::{Document, Footnote, ParseError, ParseOptions, Parser},
};

static USFM_SUFFIX: &str = ".usfm";

fn parse(input: &str) -> Document {
    Parser::default().parse_str(input, "test.sfm").unwrap()
}

fn strict() -> Parser {
    Parser::new(ParseOptions {
        strict_mode: true,
        ..ParseOptions::default()
    })
}

#[test]
fn test_usfm_all() -> Result<()> {
    let parser = Parser::default();

    let paths = fs::read_dir("./tests")?;
    for path in paths {
        let path = path?.path();
        let file_name = path.file_name().unwrap().to_str().unwrap();
        if !file_name.ends_with(USFM_SUFFIX) {
            continue;
        }

        let txt = fs::read_to_string(&path)?;
        let document = parser.parse_str(&txt, file_name)?;
        assert!(!document.chapters.is_empty(), "{} has no chapters", file_name);

        let documents = [document];
        assert!(!render_json(&documents)?.is_empty());
        assert!(!render_text(&documents)?.is_empty());
        assert!(1 < render_tsv(&documents)?.lines().count());
    }

    Ok(())
}

#[test]
fn test_parse_genesis() -> Result<()> {
    let txt = fs::read_to_string("./tests/genesis.usfm")?;
    let document = Parser::default().parse_str(&txt, "genesis.usfm")?;

    assert_eq!(document.id, "GEN - Test Bible");
    assert_eq!(document.header, "Genesis");
    assert_eq!(document.main_title, "Genesis");
    assert_eq!(document.source_file, "genesis.usfm");
    assert_eq!(document.table_of_contents.len(), 3);
    assert_eq!(document.table_of_contents[2].level, 3);
    assert_eq!(document.table_of_contents[2].text, "Gen");

    assert_eq!(document.chapters.len(), 2);

    let chapter = &document.chapters[0];
    assert_eq!(chapter.number, 1);
    assert_eq!(chapter.sections.len(), 2);

    let section = &chapter.sections[0];
    assert_eq!(section.level, 1);
    assert_eq!(section.title, "The Creation");
    assert_eq!(section.reference, "(John 1:1–5; Hebrews 11:1–3)");
    assert_eq!(section.verses.len(), 3);
    assert_eq!(
        section.verses[0].text,
        "In the beginning God created the heavens and the earth."
    );

    let verse = &section.verses[2];
    assert_eq!(
        verse.text,
        r#"And God said, "Let there be light," and there was light."#
    );
    assert_eq!(
        verse.footnotes,
        vec![Footnote {
            caller: "+".to_owned(),
            reference: "1:3".to_owned(),
            text: "Cited in 2 Corinthians 4:6".to_owned(),
        }]
    );

    assert_eq!(chapter.sections[1].level, 2);
    assert_eq!(chapter.sections[1].verses[0].footnotes[0].text, "Literally day one");

    let chapter = &document.chapters[1];
    assert_eq!(chapter.sections.len(), 2);
    assert_eq!(chapter.sections[1].reference, "(Matthew 19:1–12; Mark 10:1–12)");

    assert_eq!(document.verse_count(), 6);
    assert_eq!(document.chapter_verses(1).len(), 4);
    assert!(document.chapter_verses(3).is_empty());
    assert_eq!(
        document
            .verses_with_footnotes()
            .map(|(chapter, verse)| (chapter, verse.number))
            .collect::<Vec<_>>(),
        vec![(1, 3), (1, 5)]
    );

    Ok(())
}

#[test]
fn test_implicit_section() {
    let document = parse("\\id X\n\\c 1\n\\v 1 Hello.");

    assert_eq!(document.chapters.len(), 1);
    let sections = &document.chapters[0].sections;
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].level, 1);
    assert_eq!(sections[0].title, "");
    assert_eq!(sections[0].verses.len(), 1);
    assert_eq!(sections[0].verses[0].number, 1);
    assert_eq!(sections[0].verses[0].text, "Hello.");
}

#[test]
fn test_footnote_is_removed_from_text() {
    let document = parse("\\c 1\n\\v 1 A \\f + \\fr 1:1 \\ft Note text\\f* B");
    let verse = &document.chapters[0].sections[0].verses[0];

    assert_eq!(verse.text, "A B");
    assert_eq!(verse.footnotes.len(), 1);
    assert_eq!(verse.footnotes[0].caller, "+");
    assert_eq!(verse.footnotes[0].reference, "1:1");
    assert_eq!(verse.footnotes[0].text, "Note text");
}

#[test]
fn test_footnotes_disabled_keeps_markup() {
    let parser = Parser::new(ParseOptions {
        include_footnotes: false,
        ..ParseOptions::default()
    });
    let document = parser
        .parse_str("\\c 1\n\\v 1 A \\f + \\fr 1:1 \\ft Note text\\f* B", "test.sfm")
        .unwrap();
    let verse = &document.chapters[0].sections[0].verses[0];

    assert_eq!(verse.text, "A \\f + \\fr 1:1 \\ft Note text\\f* B");
    assert!(verse.footnotes.is_empty());
}

#[test]
fn test_references() {
    let input = "\\c 1\n\\r (ignored)\n\\s1 Title\n\\r (first)\n\\r (second)\n\\v 1 Text";

    let document = parse(input);
    let sections = &document.chapters[0].sections;
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].reference, "(second)");

    let parser = Parser::new(ParseOptions {
        include_references: false,
        ..ParseOptions::default()
    });
    let document = parser.parse_str(input, "test.sfm").unwrap();
    assert_eq!(document.chapters[0].sections[0].reference, "");
}

#[test]
fn test_multiple_sections() {
    let document = parse(
        "\\c 1\n\\s1 Major Section\n\\v 1 First.\n\\s2 Minor Section\n\\v 2 Second.\n\\s3 Sub-section\n\\v 3 Third.",
    );

    let sections = &document.chapters[0].sections;
    assert_eq!(
        sections
            .iter()
            .map(|s| (s.level, s.title.as_str(), s.verses.len()))
            .collect::<Vec<_>>(),
        vec![
            (1, "Major Section", 1),
            (2, "Minor Section", 1),
            (3, "Sub-section", 1)
        ]
    );
}

#[test]
fn test_empty_section_is_kept() {
    let document = parse("\\c 1\n\\s1 Empty\n\\s1 Full\n\\v 1 Text");
    let sections = &document.chapters[0].sections;
    assert_eq!(sections.len(), 2);
    assert!(sections[0].verses.is_empty());
}

#[test]
fn test_chapters_keep_source_order() {
    let document = parse("\\c 2\n\\v 1 Two.\n\\c 1\n\\v 1 One.\n\\c 2\n\\v 1 Again.");
    assert_eq!(
        document.chapters.iter().map(|c| c.number).collect::<Vec<_>>(),
        vec![2, 1, 2]
    );
    assert_eq!(document.chapter(2).unwrap().sections[0].verses[0].text, "Two.");
}

#[test]
fn test_content_before_first_chapter_is_dropped() {
    let document = parse("\\id X\n\\s1 Intro\n\\v 1 Orphan.\n\\c 1\n\\v 1 Kept.");
    assert_eq!(document.chapters.len(), 1);
    assert_eq!(document.chapters[0].sections.len(), 1);
    assert_eq!(document.chapters[0].sections[0].verses[0].text, "Kept.");
}

#[test]
fn test_metadata_last_wins() {
    let document = parse("\\id A\n\\id B\n\\h One\n\\h Two\n\\mt1 First\n\\mt1 Second");
    assert_eq!(document.id, "B");
    assert_eq!(document.header, "Two");
    assert_eq!(document.main_title, "Second");
    assert!(document.chapters.is_empty());
}

#[test]
fn test_empty_input() {
    for input in ["", "\n\n   \n\t\n"] {
        let document = parse(input);
        assert!(document.chapters.is_empty());
        assert!(document.table_of_contents.is_empty());
        assert_eq!(document.id, "");
    }
}

#[test]
fn test_strict_mode_unknown_marker() {
    let input = "\\id GEN - Test Bible\n\n\\xyz foo\n\\c 1\n\\v 1 First verse.";

    match strict().parse_str(input, "test.sfm") {
        Err(ParseError::UnknownMarker { line, tag }) => {
            assert_eq!(line, 3);
            assert_eq!(tag, "xyz");
        }
        other => panic!("expected UnknownMarker, got {:?}", other),
    }

    let document = parse(input);
    assert_eq!(document.id, "GEN - Test Bible");
    assert_eq!(document.chapters.len(), 1);
    assert_eq!(document.chapters[0].sections[0].verses[0].text, "First verse.");
}

#[test]
fn test_strict_mode_malformed_lines() {
    let err = strict()
        .parse_str("\\id X\nplain text\n\\c 1", "test.sfm")
        .unwrap_err();
    assert!(matches!(err, ParseError::NotAMarker { line: 2 }));

    let err = strict()
        .parse_str("\\id X\n\\c 1\n\\\n", "test.sfm")
        .unwrap_err();
    assert!(matches!(err, ParseError::InvalidMarkerFormat { line: 3, .. }));
    assert_eq!(err.line(), 3);

    let document = parse("\\id X\nplain text\n\\\n\\c 1\n\\v 1 Text");
    assert_eq!(document.chapters[0].sections[0].verses.len(), 1);
}

#[test]
fn test_invalid_numbers_are_always_fatal() {
    for parser in [Parser::default(), strict()] {
        let err = parser
            .parse_str("\\id X\n\\c one\n\\v 1 Text", "test.sfm")
            .unwrap_err();
        match err {
            ParseError::InvalidChapterNumber { line, value } => {
                assert_eq!(line, 2);
                assert_eq!(value, "one");
            }
            err => panic!("unexpected error: {:?}", err),
        }

        let err = parser
            .parse_str("\\c 1\n\n\\v a Text", "test.sfm")
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidVerseNumber { line: 3, .. }));
        assert_eq!(err.to_string(), "line 3: invalid verse number: \"a\"");
    }
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let bytes: &[u8] = b"\\c 1\n\\v 1 Caf\xe9 text\n\\v 2 Next\n";
    let document = Parser::default().parse(bytes, "latin1.sfm").unwrap();
    let verses = &document.chapters[0].sections[0].verses;

    assert_eq!(verses.len(), 2);
    assert_eq!(verses[0].text, "Caf\u{FFFD} text");
    assert_eq!(verses[1].text, "Next");
}

struct FailingReader {
    data: &'static [u8],
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
        }
        let len = self.data.len().min(buf.len());
        buf[..len].copy_from_slice(&self.data[..len]);
        self.data = &self.data[len..];
        Ok(len)
    }
}

#[test]
fn test_read_error() {
    let reader = BufReader::new(FailingReader {
        data: b"\\c 1\n\\v 1 Text\n",
    });
    let err = Parser::default().parse(reader, "broken.sfm").unwrap_err();
    assert!(matches!(err, ParseError::InputRead { line: 3, .. }));
}

#[test]
fn test_crlf_input() {
    let document = parse("\\id X\r\n\\c 1\r\n\\v 1 Text\r\n");
    assert_eq!(document.id, "X");
    assert_eq!(document.chapters[0].sections[0].verses[0].text, "Text");
}
