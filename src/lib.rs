//! # eszigno-extract
//!
//! Reader for e-Szigno `.es3` signed-document containers.
//!
//! An `.es3` file is an XML dossier wrapping one or more embedded files.
//! Each embedded file carries display metadata and an encoded payload: the
//! original bytes run through an ordered chain of reversible transforms
//! (zip compression, base64) before being stored as text in a
//! signature-namespace `Object` element. This crate parses the dossier,
//! exposes the metadata, and reverses each document's transform chain to
//! recover the original bytes.
//!
//! Signature elements are never validated — this is an archival/extraction
//! tool, not a verifier.
//!
//! ## Quick Start
//!
//! ```bash
//! es3x ls dossier.es3            # list embedded files
//! es3x ls dossier.es3 --json    # machine-readable listing
//! es3x extract dossier.es3 -o out/
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | `Dossier`, `Document` and transform-chain types |
//! | [`parse`] | Dossier parsing over an XML tree |
//! | [`decode`] | Payload decoding (reverse transform chain) |
//! | [`list`] | `ls` command output |
//! | [`extract_cmd`] | `extract` command output |

pub mod decode;
pub mod extract_cmd;
pub mod list;
pub mod models;
pub mod parse;
