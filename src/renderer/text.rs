use std::fmt::Write;

use anyhow::Result;

use crate::usfm::{Document, Section, Verse};

pub fn render_text(documents: &[Document]) -> Result<String> {
    let mut out = String::new();

    for (i, document) in documents.iter().enumerate() {
        if 0 < i {
            write!(out, "\n{}\n\n", "=".repeat(80))?;
        }

        render_document(&mut out, document)?;
    }

    Ok(out)
}

fn render_document(out: &mut String, document: &Document) -> Result<()> {
    if !document.main_title.is_empty() {
        writeln!(out, "{}", document.main_title)?;
        writeln!(out, "{}\n", "-".repeat(document.main_title.chars().count()))?;
    }

    if !document.id.is_empty() {
        writeln!(out, "Book: {}", document.id)?;
    }

    if !document.header.is_empty() {
        writeln!(out, "Header: {}", document.header)?;
    }

    writeln!(out)?;

    for chapter in &document.chapters {
        writeln!(out, "Chapter {}", chapter.number)?;
        writeln!(out, "{}\n", "-".repeat(20))?;

        for section in &chapter.sections {
            render_section(out, section)?;
        }
    }

    Ok(())
}

fn render_section(out: &mut String, section: &Section) -> Result<()> {
    // Implicit sections have no heading
    if !section.title.is_empty() {
        let indent = "  ".repeat(usize::from(section.level.saturating_sub(1)));
        writeln!(out, "{}{}", indent, section.title)?;

        if !section.reference.is_empty() {
            writeln!(out, "{}({})", indent, section.reference)?;
        }
        writeln!(out)?;
    }

    for verse in &section.verses {
        render_verse(out, verse)?;
    }
    writeln!(out)?;

    Ok(())
}

// 1. text [+:1:1 - note; +:1:2 - note]
fn render_verse(out: &mut String, verse: &Verse) -> Result<()> {
    write!(out, "{}. {}", verse.number, verse.text)?;

    if !verse.footnotes.is_empty() {
        let footnotes = verse
            .footnotes
            .iter()
            .map(|f| format!("{}:{} - {}", f.caller, f.reference, f.text))
            .collect::<Vec<_>>();
        write!(out, " [{}]", footnotes.join("; "))?;
    }

    writeln!(out)?;
    Ok(())
}
