//! Phase 1 (P0): corrupt ledger values in storage.
//! Every malformed value must load as empty without an error, and the next toggle must heal it.

use shelfmark_core::ledger::{self, LedgerError};
use shelfmark_core::KeyValueStore;

use crate::support::critical_utils::seeded_store;

#[tokio::test]
async fn p0_malformed_values_load_as_empty() {
    let cases = [
        ("savedPapers", "not json at all"),
        ("savedBooks", r#"{"ids":["b1"]}"#),
        ("savedNotes", "[1,2,3]"),
        ("downloadedPapers", r#"["p1","#),
        ("downloadedBooks", "null"),
        ("downloadedNotes", ""),
    ];
    let (_temp, store) = seeded_store(&cases).await;

    for (key, raw) in cases {
        assert!(
            ledger::load(&store, key).await.is_empty(),
            "corrupt value {raw:?} under {key} should load as empty"
        );
        assert!(matches!(
            ledger::try_load(&store, key).await,
            Err(LedgerError::Decode { .. })
        ));
    }
}

#[tokio::test]
async fn p0_toggle_after_corruption_overwrites_with_valid_json() {
    let (_temp, store) = seeded_store(&[("savedPapers", "\u{0}\u{1}garbage")]).await;

    let current = ledger::load(&store, "savedPapers").await;
    let outcome = ledger::toggle(&store, "savedPapers", &current, "p9").await;

    assert!(outcome.is_persisted());
    assert_eq!(
        store.get_item("savedPapers").await.unwrap().as_deref(),
        Some(r#"["p9"]"#)
    );
}

#[tokio::test]
async fn p0_ids_with_special_characters_survive_storage() {
    let (_temp, store) = seeded_store(&[]).await;
    let tricky = ["quote\"id", "comma,id", "unicode-📄", "back\\slash", "  padded  "];

    let mut current = Vec::new();
    for id in tricky {
        current = ledger::toggle(&store, "savedNotes", &current, id).await.ids;
    }

    let loaded = ledger::load(&store, "savedNotes").await;
    assert_eq!(loaded, tricky.map(String::from).to_vec());
}
