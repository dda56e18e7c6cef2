//! Token decomposition into marker prefix, middle and universal suffix.

use reach_types::{Decomposition, Morphology};

use crate::tables::MarkerTables;

/// Split one token using the marker tables.
///
/// 1. exact infrastructure tokens short-circuit
/// 2. longest marker prefix (extended variants report their base family);
///    no match means the token is invalid
/// 3. longest universal suffix at the end of what follows the prefix
/// 4. whatever lies strictly between is the middle, possibly empty
pub fn decompose_token(token: &str, markers: &MarkerTables) -> Decomposition {
    if markers.is_infrastructure(token) {
        return Decomposition::Infrastructure;
    }

    let Some((marker, family)) = markers.match_prefix(token) else {
        return Decomposition::Invalid;
    };

    let rest = &token[marker.len()..];
    let suffix = markers.match_suffix(rest);
    let middle = match suffix {
        Some(s) => &rest[..rest.len() - s.len()],
        None => rest,
    };

    Decomposition::Parsed(Morphology {
        family: family.to_string(),
        marker: marker.to_string(),
        middle: middle.to_string(),
        suffix: suffix.map(str::to_string),
    })
}
