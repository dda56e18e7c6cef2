//! Effective vocabulary aggregation.

use std::collections::BTreeSet;

/// Union of the vocabularies of every compatible folio.
///
/// Must stay a union: compatible folios are alternative legality postures
/// for one bundle, not joint requirements. No input yields an empty
/// vocabulary.
pub fn aggregate_as_union<'a, I>(vocabularies: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a BTreeSet<String>>,
{
    let mut effective = BTreeSet::new();
    for vocabulary in vocabularies {
        effective.extend(vocabulary.iter().cloned());
    }
    effective
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn two_folios_union_not_intersection() {
        let f1 = set(&["e", "i", "sho", "od"]);
        let f2 = set(&["e", "ke", "ckh"]);
        let effective = aggregate_as_union([&f1, &f2]);

        assert_eq!(effective, set(&["e", "i", "sho", "od", "ke", "ckh"]));
        let intersection: BTreeSet<String> = f1.intersection(&f2).cloned().collect();
        assert_ne!(effective, intersection);
    }

    #[test]
    fn no_folios_yields_empty_vocabulary() {
        assert!(aggregate_as_union(std::iter::empty()).is_empty());
    }

    proptest! {
        #[test]
        fn union_is_superset_of_every_input(
            vocabularies in prop::collection::vec(
                prop::collection::btree_set("[a-h]{1,2}", 0..12),
                0..8,
            )
        ) {
            let effective = aggregate_as_union(&vocabularies);
            for vocabulary in &vocabularies {
                prop_assert!(vocabulary.is_subset(&effective));
            }
            let total: BTreeSet<String> = vocabularies.iter().flatten().cloned().collect();
            prop_assert_eq!(effective, total);
        }
    }
}
