//! Owned XML element tree for cadastral registry files.
//!
//! Registry files ("Registro catastral") are read once into an in-memory
//! tree of [`XmlElement`]s built from `quick-xml` events. The tree keeps tag
//! names, direct text and child order, which is everything the registry
//! queries need: descendant search and single-match path lookups.
//!
//! # Example
//!
//! ```
//! use predial_xml::XmlDocument;
//!
//! let document = XmlDocument::parse_str(
//!     "<registro><predio><codigo_predial_nacional>001</codigo_predial_nacional></predio></registro>",
//! )
//! .unwrap();
//! let predio = document.root.descendants_named("predio").next().unwrap();
//! assert_eq!(
//!     predio.child("codigo_predial_nacional").and_then(|c| c.text()),
//!     Some("001")
//! );
//! ```

pub mod element;
pub mod error;
pub mod parser;

pub use element::{Descendants, XmlElement};
pub use error::{Result, XmlError};
pub use parser::XmlDocument;
