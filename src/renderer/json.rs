use anyhow::{Context, Result};

use crate::usfm::Document;

// One document is written as an object, anything else as an array
pub fn render_json(documents: &[Document]) -> Result<String> {
    match documents {
        [] => Ok("[]".to_owned()),
        [document] => serde_json::to_string_pretty(document)
            .context("Failed to serialize document to JSON"),
        documents => serde_json::to_string_pretty(documents)
            .context("Failed to serialize documents to JSON"),
    }
}
