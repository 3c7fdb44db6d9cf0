use anyhow::{Context, Result};

use crate::{usfm::Document, utility::str::clean_tsv_field};

static HEADER: [&str; 8] = [
    "Book",
    "Chapter",
    "Verse",
    "Section_Title",
    "Section_Level",
    "Verse_Text",
    "Footnotes",
    "References",
];

// One row per verse
pub fn render_tsv(documents: &[Document]) -> Result<String> {
    // Fields are cleaned of tabs and newlines beforehand, so nothing is quoted
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;

    for document in documents {
        let book: &str = if document.id.is_empty() {
            "UNKNOWN"
        } else {
            &document.id
        };

        for chapter in &document.chapters {
            let chapter_number = chapter.number.to_string();

            for section in &chapter.sections {
                let title = clean_tsv_field(&section.title);
                let level = section.level.to_string();
                let references = clean_tsv_field(&section.reference);

                for verse in &section.verses {
                    let footnotes = verse
                        .footnotes
                        .iter()
                        .map(|f| format!("{}:{}={}", f.caller, f.reference, f.text))
                        .collect::<Vec<_>>()
                        .join("; ");

                    let verse_number = verse.number.to_string();
                    let text = clean_tsv_field(&verse.text);
                    let footnotes = clean_tsv_field(&footnotes);

                    writer
                        .write_record([
                            book,
                            chapter_number.as_str(),
                            verse_number.as_str(),
                            title.as_str(),
                            level.as_str(),
                            text.as_str(),
                            footnotes.as_str(),
                            references.as_str(),
                        ])
                        .with_context(|| {
                            format!("Failed to write {} {}:{}", book, chapter.number, verse.number)
                        })?;
                }
            }
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| err.into_error())
        .context("Failed to flush TSV")?;
    String::from_utf8(bytes).context("TSV is not valid UTF-8")
}
