//! Registry entries.

use serde::{Deserialize, Serialize};

/// One catalog record: an ordered token sequence under a stable identifier
/// (for example a folio-plus-line label such as `f1r.3`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub id: String,
    pub tokens: Vec<String>,
}

impl RegistryEntry {
    pub fn new<I, S>(id: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}
