//! The `extract` command: decode every document into an output directory.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::decode;
use crate::parse;

/// Decode all documents and write each to `output_dir/filename`, printing
/// filenames as they are written.
///
/// Decode failures are local to one document: the error is reported and the
/// remaining documents are still extracted. The command fails at the end if
/// any document could not be decoded.
pub fn run_extract(input: &Path, output_dir: &Path) -> Result<()> {
    let xml = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let dossier = parse::parse_str(&xml)?;

    std::fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    let mut failed = 0usize;
    for document in &dossier.documents {
        match decode::decode(document) {
            Ok(bytes) => {
                let target = output_dir.join(&document.filename);
                std::fs::write(&target, &bytes)
                    .with_context(|| format!("Failed to write {}", target.display()))?;
                println!("{}", document.filename);
            }
            Err(e) => {
                eprintln!("Error: {}: {}", document.filename, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!(
            "{} of {} documents could not be decoded",
            failed,
            dossier.documents.len()
        );
    }

    Ok(())
}
