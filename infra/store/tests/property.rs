use proptest::prelude::*;
use std::collections::BTreeMap;
use vars_store::format::{escape, parse, serialize, unescape};

/// Keys the format can carry: no `=`, no line breaks, no surrounding whitespace, no `#` lead.
fn key() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_.-][A-Za-z0-9_. -]{0,15}[A-Za-z0-9_.-]|[A-Za-z0-9_.-]"
}

/// Values without backslashes (the known escape ambiguity) and without edge whitespace.
fn value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[^\\\\\\s]([^\\\\]{0,30}[^\\\\\\s])?",
        "[a-z]{1,5}(\n|\r|\r\n)[a-z=#]{1,5}",
    ]
}

proptest! {
    #[test]
    fn escape_roundtrip_without_backslashes(s in "[^\\\\]{0,64}") {
        prop_assert_eq!(unescape(&escape(&s)), s.clone());
        prop_assert!(!escape(&s).contains('\n'));
        prop_assert!(!escape(&s).contains('\r'));
    }

    #[test]
    fn parse_inverts_serialize(map in proptest::collection::btree_map(key(), value(), 0..16)) {
        let text = serialize(&map);
        prop_assert_eq!(text.lines().count(), map.len());
        prop_assert_eq!(parse(&text), map);
    }

    #[test]
    fn serialization_is_order_independent(entries in proptest::collection::vec((key(), value()), 0..16)) {
        let forward: BTreeMap<_, _> = entries.iter().cloned().collect();
        let mut reversed = BTreeMap::new();
        for (k, v) in entries.iter().rev() {
            reversed.entry(k.clone()).or_insert_with(|| v.clone());
        }
        // Same final mapping when the last write of each key wins in both orders.
        let mut last_wins = BTreeMap::new();
        for (k, v) in &entries {
            last_wins.insert(k.clone(), v.clone());
        }
        prop_assert_eq!(&forward, &last_wins);
        prop_assert_eq!(&reversed, &last_wins);
        prop_assert_eq!(serialize(&forward), serialize(&reversed));
    }
}
