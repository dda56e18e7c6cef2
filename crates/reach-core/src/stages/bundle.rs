//! Bundle aggregation over one registry entry.

use reach_types::{ConstraintBundle, Decomposition};

use super::decompose::decompose_token;
use crate::tables::MarkerTables;

/// A bundle plus the tokens that did not contribute to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleAggregate {
    pub bundle: ConstraintBundle,
    /// Tokens that matched no marker family, in first-seen order
    pub invalid_tokens: Vec<String>,
    pub infrastructure_tokens: usize,
}

/// Decompose every token and union the surviving middles and families.
///
/// Invalid and infrastructure tokens contribute nothing. An empty middle
/// (prefix and suffix consumed the whole token) contributes its family but
/// no middle.
pub fn aggregate_tokens<'a, I>(tokens: I, markers: &MarkerTables) -> BundleAggregate
where
    I: IntoIterator<Item = &'a str>,
{
    let mut aggregate = BundleAggregate::default();
    for token in tokens {
        match decompose_token(token, markers) {
            Decomposition::Infrastructure => aggregate.infrastructure_tokens += 1,
            Decomposition::Invalid => {
                if !aggregate.invalid_tokens.iter().any(|t| t == token) {
                    aggregate.invalid_tokens.push(token.to_string());
                }
            }
            Decomposition::Parsed(morphology) => {
                aggregate.bundle.prefix_families.insert(morphology.family);
                if !morphology.middle.is_empty() {
                    aggregate.bundle.middles.insert(morphology.middle);
                }
            }
        }
    }
    aggregate
}

/// Bundle only, for callers that do not need the rejected tokens.
pub fn aggregate_bundle<'a, I>(tokens: I, markers: &MarkerTables) -> ConstraintBundle
where
    I: IntoIterator<Item = &'a str>,
{
    aggregate_tokens(tokens, markers).bundle
}
