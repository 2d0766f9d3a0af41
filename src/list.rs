//! The `ls` command: tabular and JSON listings of a dossier's documents.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::Document;
use crate::parse;

/// One listing row; also the JSON shape emitted by `ls --json`.
#[derive(Debug, Serialize)]
pub struct ListEntry {
    pub date: String,
    pub size: String,
    pub mime: String,
    pub filename: String,
    pub transforms: Vec<String>,
}

impl ListEntry {
    fn from_document(doc: &Document) -> Self {
        Self {
            date: doc.creation_date.clone(),
            size: doc.size(),
            mime: doc.mime(),
            filename: doc.filename.clone(),
            transforms: doc
                .transform_chain
                .iter()
                .map(|t| t.name().to_string())
                .collect(),
        }
    }
}

/// Parse the container and print one row per embedded document.
pub fn run_ls(input: &Path, json: bool) -> Result<()> {
    let xml = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let dossier = parse::parse_str(&xml)?;

    let entries: Vec<ListEntry> = dossier
        .documents
        .iter()
        .map(ListEntry::from_document)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!(
        "{:<20} | {:<10} | {:<20} | {}",
        "Date", "Size", "MIME", "Filename"
    );
    println!(
        "{:<20} | {:<10} | {:<20} | {}",
        "----", "----", "----", "--------"
    );
    for entry in &entries {
        println!(
            "{:<20} | {:<10} | {:<20} | {}",
            entry.date, entry.size, entry.mime, entry.filename
        );
    }

    Ok(())
}
