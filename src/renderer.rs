// Serializers over already parsed documents

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

use crate::usfm::Document;

pub mod json;
pub mod text;
pub mod tsv;

pub use json::render_json;
pub use text::render_text;
pub use tsv::render_tsv;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
    Tsv,
}

impl OutputFormat {
    pub const NAMES: &'static [&'static str] = &["json", "txt", "tsv"];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "txt",
            Self::Tsv => "tsv",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(Self::Json),
            "txt" => Ok(Self::Text),
            "tsv" => Ok(Self::Tsv),
            "pdf" => bail!("PDF output is not supported"),
            s => bail!(
                "Invalid output format: {} (valid: {})",
                s,
                Self::NAMES.join(", ")
            ),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn render(format: OutputFormat, documents: &[Document]) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(documents),
        OutputFormat::Text => render_text(documents),
        OutputFormat::Tsv => render_tsv(documents),
    }
}
