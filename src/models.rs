//! Core data models for parsed e-Szigno containers.
//!
//! These types represent the documents recovered from a dossier: display
//! metadata, the encoded payload text, and the transform chain that
//! produced it. All of them are built once per parse and read-only after.

/// One encoding step applied to a document's payload.
///
/// Chains are recorded in encoding order (the order applied to produce the
/// stored payload). Unknown algorithm names are preserved as
/// [`Transform::Other`] at parse time and only rejected when that document
/// is decoded, so one exotic document never blocks listing or decoding of
/// its siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    Base64,
    Zip,
    Other(String),
}

impl Transform {
    pub fn from_name(name: &str) -> Self {
        match name {
            "base64" => Transform::Base64,
            "zip" => Transform::Zip,
            other => Transform::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Transform::Base64 => "base64",
            Transform::Zip => "zip",
            Transform::Other(name) => name,
        }
    }
}

/// One embedded file's metadata and encoded form.
#[derive(Debug, Clone)]
pub struct Document {
    pub title: String,
    /// Opaque display string; no date parsing is performed.
    pub creation_date: String,
    pub mime_type: String,
    pub mime_subtype: String,
    pub extension: String,
    pub size_value: String,
    pub size_unit: String,
    /// `title` if it already ends with `.{extension}`, otherwise
    /// `{title}.{extension}`. Never empty.
    pub filename: String,
    /// Encoding steps in the order they were applied to the original bytes.
    pub transform_chain: Vec<Transform>,
    /// Text content of the referenced payload object.
    pub encoded_payload: String,
}

impl Document {
    /// `type/subtype` display form.
    pub fn mime(&self) -> String {
        format!("{}/{}", self.mime_type, self.mime_subtype)
    }

    /// `value unit` display form of the original file size.
    pub fn size(&self) -> String {
        format!("{} {}", self.size_value, self.size_unit)
    }
}

/// The whole parsed container: documents in source-tree order.
#[derive(Debug, Clone)]
pub struct Dossier {
    pub documents: Vec<Document>,
}
