//! Properties whose first natural-person owner has no identification document.

use std::collections::HashMap;
use std::path::Path;

use predial_model::QueryResult;
use predial_xml::{XmlDocument, XmlElement};
use tracing::{debug, error};

use crate::error::Result;
use crate::select::property_code;
use crate::tags::{DOCUMENTO_PATH, PREDIO};

/// Find the property codes that lack an owner identification document.
///
/// Every `predio` below the root is visited in document order. Properties
/// without a non-empty `codigo_predial_nacional` are skipped. For the rest
/// only the first `interesados/persona_natural/documento` match is
/// inspected; the property is flagged when that element is absent or its
/// text is blank. A code shared by several properties is reported once, at
/// the position of its first appearance.
pub fn find_ownerless_properties(document: &XmlDocument) -> QueryResult {
    let mut tally = CodeTally::default();
    for predio in document.root.descendants_named(PREDIO) {
        let Some(code) = property_code(predio) else {
            continue;
        };
        tally.observe(code, has_blank_document(predio));
    }
    QueryResult::from_codes(tally.into_flagged())
}

/// Load a registry file and find its ownerless properties.
///
/// # Errors
///
/// Returns an error when the file cannot be read or is not a well-formed
/// XML tree. No partial result is produced in that case.
pub fn try_identify_ownerless_properties(path: &Path) -> Result<QueryResult> {
    let document = XmlDocument::load(path)?;
    let result = find_ownerless_properties(&document);
    debug!(
        path = %path.display(),
        ownerless = result.count,
        "ownerless query complete"
    );
    Ok(result)
}

/// Load a registry file and find its ownerless properties, never failing.
///
/// A file that cannot be loaded is logged with its path and cause, and
/// yields [`QueryResult::empty`].
pub fn identify_ownerless_properties(path: &Path) -> QueryResult {
    match try_identify_ownerless_properties(path) {
        Ok(result) => result,
        Err(err) => {
            error!(path = %path.display(), error = %err, "error processing registry file");
            QueryResult::empty()
        }
    }
}

fn has_blank_document(predio: &XmlElement) -> bool {
    predio
        .find_path(&DOCUMENTO_PATH)
        .and_then(XmlElement::text)
        .is_none_or(|text| text.trim().is_empty())
}

/// Insertion-ordered counter of blank documents per property code.
#[derive(Default)]
struct CodeTally {
    order: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl CodeTally {
    fn observe(&mut self, code: &str, blank: bool) {
        let slot = match self.index.get(code) {
            Some(&slot) => slot,
            None => {
                self.order.push((code.to_string(), 0));
                self.index.insert(code.to_string(), self.order.len() - 1);
                self.order.len() - 1
            }
        };
        if blank {
            self.order[slot].1 += 1;
        }
    }

    fn into_flagged(self) -> Vec<String> {
        self.order
            .into_iter()
            .filter(|(_, blanks)| *blanks > 0)
            .map(|(code, _)| code)
            .collect()
    }
}
