use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,     // \id
    pub header: String, // \h
    #[serde(rename = "toc", default)]
    pub table_of_contents: Vec<TocEntry>, // \toc1 \toc2 \toc3
    pub main_title: String, // \mt1

    pub chapters: Vec<Chapter>,

    pub parsed_at: DateTime<Utc>,
    pub source_file: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub level: u8,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub number: i64,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub level: u8,
    pub title: String,
    // \r
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reference: String,
    pub verses: Vec<Verse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub number: i64,
    pub text: String, // footnote markup removed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub footnotes: Vec<Footnote>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footnote {
    pub caller: String,    // usually "+"
    pub reference: String, // \fr
    pub text: String,      // \ft
}

impl Document {
    pub fn new(source_file: &str) -> Self {
        Document {
            id: String::new(),
            header: String::new(),
            table_of_contents: Vec::new(),
            main_title: String::new(),
            chapters: Vec::new(),
            parsed_at: Utc::now(),
            source_file: source_file.to_owned(),
        }
    }

    pub fn chapter(&self, number: i64) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.number == number)
    }

    // Verses of the chapter across all of its sections
    pub fn chapter_verses(&self, number: i64) -> Vec<&Verse> {
        match self.chapter(number) {
            Some(chapter) => chapter.verses().collect(),
            None => Vec::new(),
        }
    }

    pub fn verses_with_footnotes(&self) -> impl Iterator<Item = (i64, &Verse)> {
        self.chapters.iter().flat_map(|chapter| {
            chapter
                .verses()
                .filter(|v| !v.footnotes.is_empty())
                .map(move |v| (chapter.number, v))
        })
    }

    pub fn verse_count(&self) -> usize {
        self.chapters.iter().map(Chapter::verse_count).sum()
    }
}

impl Chapter {
    pub fn new(number: i64) -> Self {
        Chapter {
            number,
            sections: Vec::new(),
        }
    }

    pub fn verses(&self) -> impl Iterator<Item = &Verse> {
        self.sections.iter().flat_map(|s| s.verses.iter())
    }

    pub fn verse_count(&self) -> usize {
        self.sections.iter().map(|s| s.verses.len()).sum()
    }
}

impl Section {
    pub fn new(level: u8, title: &str) -> Self {
        Section {
            level,
            title: title.to_owned(),
            reference: String::new(),
            verses: Vec::new(),
        }
    }

    // Opened by a verse with no preceding heading
    pub fn implicit() -> Self {
        Section::new(1, "")
    }
}
