//! Payload decoding: undoing a document's transform chain.
//!
//! Transforms are stored in encoding order (outermost step last), so
//! recovery walks the chain back to front, one step per entry. The decoder
//! is a pure function of the document's chain and payload text; failures
//! are local to the document being decoded and other documents in the same
//! dossier stay usable.

use std::io::Read;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::models::{Document, Transform};

/// Decode failure for a single document.
#[derive(Debug)]
pub enum DecodeError {
    /// The chain names an algorithm the decoder does not implement.
    UnsupportedTransform(String),
    /// The accumulator is not valid standard base64.
    InvalidBase64(String),
    /// The accumulator is not a readable single-entry zip archive.
    UnsupportedArchiveShape(String),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::UnsupportedTransform(name) => {
                write!(f, "unsupported transform algorithm: {}", name)
            }
            DecodeError::InvalidBase64(detail) => write!(f, "invalid base64 payload: {}", detail),
            DecodeError::UnsupportedArchiveShape(detail) => {
                write!(f, "unsupported archive shape: {}", detail)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Recover a document's original bytes by undoing its transform chain.
///
/// An empty chain returns the stored payload text as bytes unchanged.
pub fn decode(document: &Document) -> Result<Vec<u8>, DecodeError> {
    let mut payload = document.encoded_payload.clone().into_bytes();
    for transform in document.transform_chain.iter().rev() {
        payload = match transform {
            Transform::Base64 => decode_base64(&payload)?,
            Transform::Zip => unwrap_zip(&payload)?,
            Transform::Other(name) => {
                return Err(DecodeError::UnsupportedTransform(name.clone()))
            }
        };
    }
    Ok(payload)
}

/// Standard base64 decode after stripping the whitespace that XML
/// pretty-printing inserts into payload text.
fn decode_base64(payload: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let compact: Vec<u8> = payload
        .iter()
        .copied()
        .filter(|b| !matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
        .collect();
    STANDARD
        .decode(&compact)
        .map_err(|e| DecodeError::InvalidBase64(e.to_string()))
}

/// Read the single entry of a zip-wrapped payload. Archives with zero or
/// several entries are a format violation the decoder refuses to guess
/// about.
fn unwrap_zip(payload: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(payload))
        .map_err(|e| DecodeError::UnsupportedArchiveShape(e.to_string()))?;
    if archive.len() != 1 {
        return Err(DecodeError::UnsupportedArchiveShape(format!(
            "expected exactly one entry, found {}",
            archive.len()
        )));
    }
    let mut entry = archive
        .by_index(0)
        .map_err(|e| DecodeError::UnsupportedArchiveShape(e.to_string()))?;
    let mut out = Vec::new();
    entry
        .read_to_end(&mut out)
        .map_err(|e| DecodeError::UnsupportedArchiveShape(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn document_with(chain: Vec<Transform>, payload: &str) -> Document {
        Document {
            title: "fixture.bin".to_string(),
            creation_date: "2024-05-02".to_string(),
            mime_type: "application".to_string(),
            mime_subtype: "octet-stream".to_string(),
            extension: "bin".to_string(),
            size_value: "1".to_string(),
            size_unit: "KB".to_string(),
            filename: "fixture.bin".to_string(),
            transform_chain: chain,
            encoded_payload: payload.to_string(),
        }
    }

    fn zip_entries(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut writer = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
            for (name, bytes) in entries {
                writer
                    .start_file(*name, zip::write::SimpleFileOptions::default())
                    .unwrap();
                writer.write_all(bytes).unwrap();
            }
            writer.finish().unwrap();
        }
        buf
    }

    #[test]
    fn empty_chain_is_identity_on_payload_bytes() {
        let doc = document_with(vec![], "already raw text");
        assert_eq!(decode(&doc).unwrap(), b"already raw text");
    }

    #[test]
    fn base64_step_ignores_embedded_whitespace() {
        // "hello world" with the line breaks and indentation XML storage adds.
        let doc = document_with(vec![Transform::Base64], "aGVs\n  bG8g\r\nd29y bGQ=\n");
        assert_eq!(decode(&doc).unwrap(), b"hello world");
    }

    #[test]
    fn zip_then_base64_round_trip_recovers_original_bytes() {
        let original: &[u8] = b"%PDF-1.4 arbitrary embedded bytes \x00\x01\x02";
        let zipped = zip_entries(&[("report.pdf", original)]);
        let stored = STANDARD.encode(&zipped);

        let doc = document_with(vec![Transform::Zip, Transform::Base64], &stored);
        assert_eq!(decode(&doc).unwrap(), original);
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let doc = document_with(vec![Transform::Base64], "not*base64*at*all");
        assert!(matches!(
            decode(&doc).unwrap_err(),
            DecodeError::InvalidBase64(_)
        ));
    }

    #[test]
    fn zip_with_two_entries_is_rejected() {
        let zipped = zip_entries(&[("a.txt", b"one"), ("b.txt", b"two")]);
        let stored = STANDARD.encode(&zipped);

        let doc = document_with(vec![Transform::Zip, Transform::Base64], &stored);
        assert!(matches!(
            decode(&doc).unwrap_err(),
            DecodeError::UnsupportedArchiveShape(_)
        ));
    }

    #[test]
    fn zip_with_zero_entries_is_rejected() {
        let zipped = zip_entries(&[]);
        let stored = STANDARD.encode(&zipped);

        let doc = document_with(vec![Transform::Zip, Transform::Base64], &stored);
        assert!(matches!(
            decode(&doc).unwrap_err(),
            DecodeError::UnsupportedArchiveShape(_)
        ));
    }

    #[test]
    fn bytes_that_are_not_an_archive_are_rejected() {
        let doc = document_with(vec![Transform::Zip], "definitely not a zip archive");
        assert!(matches!(
            decode(&doc).unwrap_err(),
            DecodeError::UnsupportedArchiveShape(_)
        ));
    }

    #[test]
    fn unknown_algorithm_fails_without_affecting_siblings() {
        let exotic = document_with(vec![Transform::Other("rot13".to_string())], "abcd");
        let plain = document_with(vec![], "fine");

        match decode(&exotic).unwrap_err() {
            DecodeError::UnsupportedTransform(name) => assert_eq!(name, "rot13"),
            other => panic!("expected UnsupportedTransform, got {:?}", other),
        }
        // The failure above is local; an untouched sibling still decodes.
        assert_eq!(decode(&plain).unwrap(), b"fine");
    }
}
