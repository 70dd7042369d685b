//! Tree construction from `quick-xml` events.

use std::fs;
use std::path::Path;

use encoding_rs::Encoding;
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use crate::element::XmlElement;
use crate::error::{Result, XmlError};

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    /// The single top-level element.
    pub root: XmlElement,
}

impl XmlDocument {
    /// Read and parse the file at `path`.
    ///
    /// The file is decoded as described for [`XmlDocument::parse_bytes`].
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::Io`] when the file cannot be read and
    /// [`XmlError::Parse`] wrapping the underlying cause when the content is
    /// not a well-formed tree in its declared encoding.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read(path).map_err(|e| XmlError::io(path, e))?;
        let document = Self::parse_bytes(&contents).map_err(|e| e.with_path(path))?;
        debug!(
            path = %path.display(),
            bytes = contents.len(),
            root = %document.root.name,
            "loaded XML document"
        );
        Ok(document)
    }

    /// Parse a document held in memory.
    ///
    /// # Errors
    ///
    /// Returns an error when the input is not a single well-formed element
    /// tree.
    pub fn parse_str(input: &str) -> Result<Self> {
        TreeBuilder::default().build(Reader::from_str(input))
    }

    /// Parse raw document bytes.
    ///
    /// ASCII-compatible encodings (UTF-8, ISO-8859-1, Windows-1252, ...) are
    /// decoded according to the byte order mark or the `encoding` of the XML
    /// declaration, UTF-8 when neither is present. UTF-16 input is recognised
    /// by its byte order mark and transcoded before parsing.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::Malformed`] for bytes that are invalid in the
    /// detected encoding, and the other parse errors of
    /// [`XmlDocument::parse_str`].
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self> {
        match Encoding::for_bom(bytes) {
            Some((encoding, bom_length)) if !encoding.is_ascii_compatible() => {
                let text = encoding
                    .decode_without_bom_handling_and_without_replacement(&bytes[bom_length..])
                    .ok_or_else(|| {
                        XmlError::malformed(0, format!("invalid {} content", encoding.name()))
                    })?;
                Self::parse_str(&text)
            }
            _ => TreeBuilder::default().build(Reader::from_reader(bytes)),
        }
    }
}

#[derive(Default)]
struct TreeBuilder {
    open: Vec<XmlElement>,
    root: Option<XmlElement>,
}

impl TreeBuilder {
    fn build(mut self, mut reader: Reader<&[u8]>) -> Result<XmlDocument> {
        loop {
            let position = reader.buffer_position() as u64;
            let event = reader
                .read_event()
                .map_err(|e| XmlError::malformed(reader.error_position() as u64, e))?;
            match event {
                Event::Start(start) => {
                    let element = self.open_element(&reader, &start, position)?;
                    self.open.push(element);
                }
                Event::Empty(start) => {
                    let element = self.open_element(&reader, &start, position)?;
                    self.close_element(element);
                }
                Event::End(_) => {
                    let element = self.open.pop().ok_or_else(|| {
                        XmlError::malformed(position, "end tag without a matching start tag")
                    })?;
                    self.close_element(element);
                }
                Event::Text(text) => {
                    let decoded = reader
                        .decoder()
                        .decode(&text)
                        .map_err(|e| XmlError::malformed(position, e))?;
                    self.push_text(&decoded, position)?;
                }
                Event::CData(data) => {
                    let decoded = reader
                        .decoder()
                        .decode(&data)
                        .map_err(|e| XmlError::malformed(position, e))?;
                    self.push_text(&decoded, position)?;
                }
                Event::GeneralRef(reference) => {
                    let resolved = match reference
                        .resolve_char_ref()
                        .map_err(|e| XmlError::malformed(position, e))?
                    {
                        Some(ch) => ch.to_string(),
                        None => {
                            let name = reader
                                .decoder()
                                .decode(&reference)
                                .map_err(|e| XmlError::malformed(position, e))?;
                            resolve_predefined_entity(&name)
                                .ok_or_else(|| {
                                    XmlError::malformed(
                                        position,
                                        format!("undefined entity &{name};"),
                                    )
                                })?
                                .to_string()
                        }
                    };
                    self.push_text(&resolved, position)?;
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions and DOCTYPE
                // carry nothing the tree keeps.
                _ => {}
            }
        }

        if let Some(unclosed) = self.open.last() {
            return Err(XmlError::Unclosed {
                name: unclosed.name.clone(),
            });
        }
        self.root
            .map(|root| XmlDocument { root })
            .ok_or(XmlError::Empty)
    }

    fn open_element(
        &self,
        reader: &Reader<&[u8]>,
        start: &BytesStart<'_>,
        position: u64,
    ) -> Result<XmlElement> {
        if self.open.is_empty() && self.root.is_some() {
            return Err(XmlError::TrailingContent { position });
        }
        let qname = start.name();
        let name = reader
            .decoder()
            .decode(qname.as_ref())
            .map_err(|e| XmlError::malformed(position, e))?;
        Ok(XmlElement::new(name.into_owned()))
    }

    fn close_element(&mut self, element: XmlElement) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(element),
            None => self.root = Some(element),
        }
    }

    fn push_text(&mut self, text: &str, position: u64) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        match self.open.last_mut() {
            Some(current) => {
                current.push_text(text);
                Ok(())
            }
            None if text.trim().is_empty() => Ok(()),
            None => Err(XmlError::malformed(
                position,
                "text outside the root element",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_and_text() {
        let document =
            XmlDocument::parse_str("<root><a>one</a><b><c>two</c></b><d/></root>").unwrap();
        let root = &document.root;
        assert_eq!(root.name, "root");
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.child("a").and_then(XmlElement::text), Some("one"));
        assert_eq!(root.find_path(&["b", "c"]).and_then(XmlElement::text), Some("two"));
        assert_eq!(root.child("d").and_then(XmlElement::text), None);
    }

    #[test]
    fn start_end_pair_without_content_has_no_text() {
        let document = XmlDocument::parse_str("<root><a></a></root>").unwrap();
        assert_eq!(document.root.child("a").unwrap().text, None);
    }

    #[test]
    fn whitespace_text_is_preserved() {
        let document = XmlDocument::parse_str("<root><a>   </a></root>").unwrap();
        assert_eq!(document.root.child("a").and_then(XmlElement::text), Some("   "));
    }

    #[test]
    fn entities_and_cdata_are_resolved() {
        let document = XmlDocument::parse_str(
            "<root><a>R&amp;D &#233;&#x41;</a><b><![CDATA[<raw>]]></b></root>",
        )
        .unwrap();
        assert_eq!(
            document.root.child("a").and_then(XmlElement::text),
            Some("R&D éA")
        );
        assert_eq!(
            document.root.child("b").and_then(XmlElement::text),
            Some("<raw>")
        );
    }

    #[test]
    fn declaration_comments_and_doctype_are_skipped() {
        let input = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE root>
<!-- header -->
<root><a>x</a></root>
"#;
        let document = XmlDocument::parse_str(input).unwrap();
        assert_eq!(document.root.name, "root");
    }

    #[test]
    fn mismatched_end_tag_is_malformed() {
        let error = XmlDocument::parse_str("<root><a></b></root>").unwrap_err();
        assert!(matches!(error, XmlError::Malformed { .. }), "{error:?}");
    }

    #[test]
    fn unclosed_root_is_rejected() {
        let error = XmlDocument::parse_str("<root><a>text</a>").unwrap_err();
        assert!(
            matches!(&error, XmlError::Unclosed { name } if name == "root"),
            "{error:?}"
        );
    }

    #[test]
    fn declared_latin1_bytes_are_decoded() {
        let mut input = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><root><a>".to_vec();
        input.extend_from_slice(&[0x4E, 0x41, 0xD1, 0x4F]);
        input.extend_from_slice(b"</a></root>");

        let document = XmlDocument::parse_bytes(&input).unwrap();
        assert_eq!(document.root.child("a").and_then(XmlElement::text), Some("NAÑO"));
    }

    #[test]
    fn invalid_utf8_bytes_are_malformed() {
        let error = XmlDocument::parse_bytes(b"<root><a>\xFF</a></root>").unwrap_err();
        assert!(matches!(error, XmlError::Malformed { .. }), "{error:?}");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            XmlDocument::parse_str("  \n").unwrap_err(),
            XmlError::Empty
        ));
    }

    #[test]
    fn second_root_is_rejected() {
        let error = XmlDocument::parse_str("<a/><b/>").unwrap_err();
        assert!(matches!(error, XmlError::TrailingContent { .. }));
    }

    #[test]
    fn text_outside_root_is_rejected() {
        let error = XmlDocument::parse_str("<a/>junk").unwrap_err();
        assert!(matches!(error, XmlError::Malformed { .. }));
    }

    #[test]
    fn undefined_entity_is_rejected() {
        let error = XmlDocument::parse_str("<a>&nbsp;</a>").unwrap_err();
        assert!(matches!(error, XmlError::Malformed { .. }));
    }
}
