use serde::{Deserialize, Serialize};

/// Outcome of a registry query: the unique property codes that matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Number of unique codes in `property_codes`.
    #[serde(rename = "conteo")]
    pub count: usize,
    /// Matching national property codes in first-appearance order.
    #[serde(rename = "numeros_prediales")]
    pub property_codes: Vec<String>,
}

impl QueryResult {
    /// The zero result, also returned when a registry file fails to load.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a result whose count matches the number of codes.
    pub fn from_codes(property_codes: Vec<String>) -> Self {
        Self {
            count: property_codes.len(),
            property_codes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.property_codes.is_empty()
    }
}
