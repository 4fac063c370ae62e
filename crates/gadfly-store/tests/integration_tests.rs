//! Integration tests for the in-memory store

use gadfly_domain::traits::KnowledgeStore;
use gadfly_domain::{
    Annotation, AnnotationKind, ConversationMessage, KnowledgeEntry, SourceRef,
};
use gadfly_store::{MemoryVault, StoreError};
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_thread_appends_are_all_kept() {
    let vault = Arc::new(MemoryVault::new());
    let id = vault
        .create_entry(KnowledgeEntry::new("content", "summary"))
        .unwrap();
    let annotation = Annotation::new(AnnotationKind::Objection, "RedTeam", "objection", 0.8);
    let annotation_id = annotation.id;
    vault.append_annotation(id, annotation).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let vault = Arc::clone(&vault);
            thread::spawn(move || {
                vault
                    .append_thread_message(
                        id,
                        annotation_id,
                        ConversationMessage::user(format!("reply {}", i)),
                    )
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let entry = vault.get_entry(id).unwrap().unwrap();
    assert_eq!(entry.annotations[0].thread.len(), 8);
    // One version for the create, one for the annotation, one per reply
    assert_eq!(entry.version, 10);
    assert_eq!(vault.history(id).unwrap().len(), 10);
}

#[test]
fn test_concurrent_appends_to_different_entries() {
    let vault = Arc::new(MemoryVault::new());
    let ids: Vec<_> = (0..4)
        .map(|i| {
            vault
                .create_entry(KnowledgeEntry::new(format!("c{}", i), format!("s{}", i)))
                .unwrap()
        })
        .collect();

    let handles: Vec<_> = ids
        .iter()
        .copied()
        .map(|id| {
            let vault = Arc::clone(&vault);
            thread::spawn(move || {
                for _ in 0..5 {
                    let a = Annotation::new(AnnotationKind::ScoutFinding, "Scout", "drift", 0.5);
                    vault.append_annotation(id, a).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for id in ids {
        let entry = vault.get_entry(id).unwrap().unwrap();
        assert_eq!(entry.annotations.len(), 5);
    }
}

#[test]
fn test_history_preserves_metadata() {
    let entry = KnowledgeEntry::new("content", "summary")
        .with_confidence(0.9)
        .with_tags(["medical"])
        .with_sources(vec![SourceRef::new("https://a.example/1", "A")]);
    let vault = MemoryVault::with_entries(vec![entry]).unwrap();
    let id = vault.list_entries().unwrap()[0].id;

    vault
        .append_annotation(
            id,
            Annotation::new(AnnotationKind::StalenessWarning, "Watchdog", "stale", 0.3),
        )
        .unwrap();

    for version in vault.history(id).unwrap() {
        assert_eq!(version.metadata.confidence, Some(0.9));
        assert!(version.has_tag("medical"));
        assert_eq!(version.metadata.sources.len(), 1);
    }
}

#[test]
fn test_history_of_missing_entry() {
    let vault = MemoryVault::new();
    let missing = gadfly_domain::EntryId::new();
    assert_eq!(vault.history(missing), Err(StoreError::NotFound(missing)));
}

#[test]
fn test_entry_json_round_trip_through_store() {
    let vault = MemoryVault::new();
    let id = vault
        .create_entry(KnowledgeEntry::new("content", "summary").with_tags(["tech"]))
        .unwrap();
    let entry = vault.get_entry(id).unwrap().unwrap();

    let json = serde_json::to_string(&entry).unwrap();
    let back: KnowledgeEntry = serde_json::from_str(&json).unwrap();
    assert_eq!(back, entry);
}
