//! Dossier parsing over an e-Szigno XML tree.
//!
//! A container is an XML dossier: document-profile elements carry the
//! metadata for each embedded file, and each profile references a
//! signature-namespace `Object` element (by `OBJREF` → `Id`) holding the
//! encoded payload text. The parser consumes a tree the caller has already
//! parsed; [`parse_str`] wraps the XML parse for callers starting from a
//! string.
//!
//! Extraction does not partially succeed: any malformed document aborts the
//! whole parse with enough context (title or index) to report usefully.

use std::collections::HashMap;

use roxmltree::Node;

use crate::models::{Document, Dossier, Transform};

/// Document-profile namespace, qualifying `Document`, `Title`,
/// `CreationDate`, `Format`, `MIME-Type`, `SourceSize`, `DocumentProfile`
/// and `Transform`.
pub const NS_PROFILE: &str = "https://www.microsec.hu/ds/e-szigno30#";
/// XML digital-signature namespace, qualifying the payload-carrying
/// `Object` elements.
pub const NS_SIGNATURE: &str = "http://www.w3.org/2000/09/xmldsig#";

/// Parse failure. Every variant aborts the whole dossier parse; partial
/// dossiers are never returned.
#[derive(Debug)]
pub enum ParseError {
    /// Input is not well-formed XML, or contains no document elements.
    MalformedContainer(String),
    /// A required child element is absent for one document.
    MissingField {
        document: String,
        field: &'static str,
    },
    /// A document's `OBJREF` matched zero or several payload objects.
    UnresolvedPayloadReference {
        document: String,
        objref: String,
        matches: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MalformedContainer(detail) => {
                write!(f, "malformed container: {}", detail)
            }
            ParseError::MissingField { document, field } => {
                write!(f, "{}: missing required element {}", document, field)
            }
            ParseError::UnresolvedPayloadReference {
                document,
                objref,
                matches,
            } => write!(
                f,
                "{}: payload reference {:?} matched {} objects, expected exactly 1",
                document, objref, matches
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse an XML string into a [`Dossier`].
pub fn parse_str(xml: &str) -> Result<Dossier, ParseError> {
    let tree = roxmltree::Document::parse(xml)
        .map_err(|e| ParseError::MalformedContainer(e.to_string()))?;
    parse_dossier(&tree)
}

/// Parse an already-parsed XML tree into a [`Dossier`].
///
/// Documents are returned in source-tree order. A container with zero
/// document elements is treated as malformed rather than as a valid empty
/// dossier: it is indistinguishable from pointing the tool at the wrong
/// kind of XML file.
pub fn parse_dossier(tree: &roxmltree::Document) -> Result<Dossier, ParseError> {
    let payloads = payload_table(tree);

    let mut documents = Vec::new();
    for (index, node) in tree
        .descendants()
        .filter(|n| is_named(*n, NS_PROFILE, "Document"))
        .enumerate()
    {
        documents.push(extract_document(node, &payloads, index)?);
    }

    if documents.is_empty() {
        return Err(ParseError::MalformedContainer(
            "no e-szigno Document elements found".to_string(),
        ));
    }

    Ok(Dossier { documents })
}

/// All signature-namespace `Object` elements keyed by `Id`, built once per
/// dossier so each document's `OBJREF` is a table lookup instead of a tree
/// rescan. Duplicate ids are kept so the exactly-one rule can be enforced.
fn payload_table<'a, 'input>(
    tree: &'a roxmltree::Document<'input>,
) -> HashMap<&'a str, Vec<&'a str>> {
    let mut table: HashMap<&str, Vec<&str>> = HashMap::new();
    for node in tree
        .descendants()
        .filter(|n| is_named(*n, NS_SIGNATURE, "Object"))
    {
        if let Some(id) = node.attribute("Id") {
            table
                .entry(id)
                .or_default()
                .push(node.text().unwrap_or_default());
        }
    }
    table
}

/// Extract one [`Document`] from its profile-namespace `Document` element.
fn extract_document(
    node: Node,
    payloads: &HashMap<&str, Vec<&str>>,
    index: usize,
) -> Result<Document, ParseError> {
    // Until the title is read, errors name the document by position.
    let label = format!("document #{}", index);
    let title = required_text(node, "Title", &label)?;
    let label = title.clone();

    let creation_date = required_text(node, "CreationDate", &label)?;

    let format = required_child(node, "Format", &label)?;
    let mime = required_child(format, "MIME-Type", &label)?;
    let mime_type = attr(mime, "type");
    let mime_subtype = attr(mime, "subtype");
    let extension = attr(mime, "extension");

    let size = required_child(node, "SourceSize", &label)?;
    let size_value = attr(size, "sizeValue");
    let size_unit = attr(size, "sizeUnit");

    let filename = derive_filename(&title, &extension);

    let profile = required_child(node, "DocumentProfile", &label)?;
    let transform_chain: Vec<Transform> = profile
        .descendants()
        .filter(|n| is_named(*n, NS_PROFILE, "Transform"))
        .map(|n| Transform::from_name(&attr(n, "Algorithm")))
        .collect();

    let objref = attr(profile, "OBJREF");
    let matches = payloads
        .get(objref.as_str())
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    if matches.len() != 1 {
        return Err(ParseError::UnresolvedPayloadReference {
            document: label,
            objref,
            matches: matches.len(),
        });
    }
    let encoded_payload = matches[0].to_string();

    Ok(Document {
        title,
        creation_date,
        mime_type,
        mime_subtype,
        extension,
        size_value,
        size_unit,
        filename,
        transform_chain,
        encoded_payload,
    })
}

/// `title` already carrying the `.{extension}` suffix is used as-is,
/// otherwise the suffix is appended.
fn derive_filename(title: &str, extension: &str) -> String {
    if title.ends_with(&format!(".{}", extension)) {
        title.to_string()
    } else {
        format!("{}.{}", title, extension)
    }
}

fn is_named(node: Node, ns: &str, name: &str) -> bool {
    node.is_element() && node.tag_name().namespace() == Some(ns) && node.tag_name().name() == name
}

/// First descendant element with the given namespace + local name, the
/// container format's lookup primitive.
fn find_descendant<'a, 'input>(
    node: Node<'a, 'input>,
    ns: &str,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.descendants().find(|n| is_named(*n, ns, name))
}

fn required_child<'a, 'input>(
    node: Node<'a, 'input>,
    field: &'static str,
    document: &str,
) -> Result<Node<'a, 'input>, ParseError> {
    find_descendant(node, NS_PROFILE, field).ok_or_else(|| ParseError::MissingField {
        document: document.to_string(),
        field,
    })
}

fn required_text(node: Node, field: &'static str, document: &str) -> Result<String, ParseError> {
    let child = required_child(node, field, document)?;
    Ok(child.text().unwrap_or_default().to_string())
}

/// Value of `name` on `node` as an owned string, empty when absent.
fn attr(node: Node, name: &str) -> String {
    node.attribute(name).unwrap_or_default().to_string()
}
