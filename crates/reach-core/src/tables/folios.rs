//! Context-folio catalog.

use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

use crate::error::TableError;

/// Reference container with a fixed MIDDLE vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextFolio {
    id: String,
    vocabulary: BTreeSet<String>,
}

impl ContextFolio {
    pub fn new<I, S>(id: impl Into<String>, vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            vocabulary: vocabulary.into_iter().map(Into::into).collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn vocabulary(&self) -> &BTreeSet<String> {
        &self.vocabulary
    }

    pub fn contains(&self, middle: &str) -> bool {
        self.vocabulary.contains(middle)
    }
}

/// Ordered list of context-folios with unique ids.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct FolioCatalog {
    folios: Vec<ContextFolio>,
}

impl FolioCatalog {
    pub fn new(folios: Vec<ContextFolio>) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        for folio in &folios {
            if !seen.insert(folio.id.as_str()) {
                return Err(TableError::DuplicateFolio(folio.id.clone()));
            }
        }
        Ok(Self { folios })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContextFolio> {
        self.folios.iter()
    }

    pub fn get(&self, id: &str) -> Option<&ContextFolio> {
        self.folios.iter().find(|f| f.id == id)
    }

    pub fn len(&self) -> usize {
        self.folios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folios.is_empty()
    }
}

impl<'a> IntoIterator for &'a FolioCatalog {
    type Item = &'a ContextFolio;
    type IntoIter = std::slice::Iter<'a, ContextFolio>;

    fn into_iter(self) -> Self::IntoIter {
        self.folios.iter()
    }
}
