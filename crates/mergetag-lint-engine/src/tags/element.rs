//! Parsing a directive body as one empty XML element.

use quick_xml::Reader;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use std::collections::BTreeMap;
use thiserror::Error;

/// Why a directive body is not a single well-formed empty element.
#[derive(Debug, Error)]
pub enum XmlError {
    #[error(transparent)]
    Syntax(#[from] quick_xml::Error),

    #[error(transparent)]
    Attribute(#[from] AttrError),

    #[error("expected exactly one empty element")]
    NotSingleElement,

    #[error("text outside the element")]
    TextOutsideElement,

    #[error("'{0}' is not a valid XML name")]
    InvalidName(String),

    #[error("attributes must be separated by whitespace")]
    MissingSeparator,

    #[error("'<' not allowed in value of attribute '{0}'")]
    LessThanInValue(String),
}

/// An empty element with its attributes, entity references decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
}

/// Parse `text` as exactly one empty element, e.g. `<Content Select="//a"/>`.
///
/// Whitespace around the element is allowed. Text, comments, processing
/// instructions and further elements are not.
pub fn parse_element(text: &str) -> Result<Element, XmlError> {
    let mut reader = Reader::from_str(text);
    let mut element = None;

    loop {
        match reader.read_event()? {
            Event::Empty(start) if element.is_none() => element = Some(read_element(&start)?),
            Event::Text(content) if content.iter().all(|b| b.is_ascii_whitespace()) => {}
            Event::Text(_) => return Err(XmlError::TextOutsideElement),
            Event::Eof => break,
            _ => return Err(XmlError::NotSingleElement),
        }
    }

    element.ok_or(XmlError::NotSingleElement)
}

fn read_element(start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    if !is_xml_name(&name) {
        return Err(XmlError::InvalidName(name));
    }

    check_separators(start.attributes_raw())?;

    let mut attributes = BTreeMap::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        if !is_xml_name(&key) {
            return Err(XmlError::InvalidName(key));
        }
        if attr.value.contains(&b'<') {
            return Err(XmlError::LessThanInValue(key));
        }
        let value = attr.unescape_value()?.into_owned();
        attributes.insert(key, value);
    }

    Ok(Element { name, attributes })
}

/// A closing quote must be followed by whitespace or the end of the tag.
fn check_separators(raw: &[u8]) -> Result<(), XmlError> {
    let mut quote = None;
    for (i, &b) in raw.iter().enumerate() {
        match quote {
            Some(q) if b == q => {
                quote = None;
                if raw
                    .get(i + 1)
                    .is_some_and(|&next| !next.is_ascii_whitespace() && next != b'/')
                {
                    return Err(XmlError::MissingSeparator);
                }
            }
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None => {}
        }
    }
    Ok(())
}

/// XML 1.0 Name: a letter, `_` or `:`, then letters, digits, `.`, `-`, `_`
/// or `:`.
fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == ':')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '_' | ':'))
}
