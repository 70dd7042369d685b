//! Element names used by the cadastral registry schema.

/// A property record.
pub const PREDIO: &str = "predio";

/// National property code, a direct child of [`PREDIO`].
pub const CODIGO_PREDIAL_NACIONAL: &str = "codigo_predial_nacional";

/// Path from a property to the owner's identification document.
pub const DOCUMENTO_PATH: [&str; 3] = ["interesados", "persona_natural", "documento"];
