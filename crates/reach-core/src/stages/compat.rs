//! Target-folio compatibility filter.

use std::collections::BTreeSet;

use crate::tables::{ContextFolio, FolioCatalog};

/// True iff every RESTRICTED middle appears in the folio's vocabulary.
///
/// Only RESTRICTED middles are passed in. UNIVERSAL middles would match
/// every folio and UNKNOWN middles would match none; neither may influence
/// compatibility.
pub fn is_compatible(restricted: &BTreeSet<String>, folio: &ContextFolio) -> bool {
    restricted.is_subset(folio.vocabulary())
}

/// Compatible folios in catalog order. An empty restricted set admits all.
pub fn compatible_folios<'f>(
    restricted: &BTreeSet<String>,
    folios: &'f FolioCatalog,
) -> Vec<&'f ContextFolio> {
    folios
        .iter()
        .filter(|folio| is_compatible(restricted, folio))
        .collect()
}
