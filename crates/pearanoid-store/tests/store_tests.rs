// SPDX-FileCopyrightText: 2026 Pearanoid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for `FileVaultStore` under concurrent access.

use std::sync::Arc;
use std::time::Duration;

use pearanoid_core::{Vault, VaultEntry, VaultRepository};
use pearanoid_store::FileVaultStore;

fn vault_with(tag: &str, n: usize) -> Vault {
    Vault {
        version: 1,
        entries: (0..n)
            .map(|i| VaultEntry {
                id: format!("{tag}-{i}"),
                name: tag.to_string(),
                password: "x".repeat(512),
                ..Default::default()
            })
            .collect(),
    }
}

/// Loads racing saves always see a complete document equal to one that was saved.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_loads_never_observe_partial_writes() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileVaultStore::new(dir.path()));

    let small = vault_with("small", 1);
    let large = vault_with("large", 200);
    store.save(&small).await.unwrap();

    let valid: Vec<Vec<u8>> = vec![
        Vault::default().to_json_bytes().unwrap(),
        small.to_json_bytes().unwrap(),
        large.to_json_bytes().unwrap(),
    ];

    let mut writers = Vec::new();
    for i in 0..8 {
        let store = Arc::clone(&store);
        let vault = if i % 2 == 0 { large.clone() } else { small.clone() };
        writers.push(tokio::spawn(async move {
            for _ in 0..10 {
                store.save(&vault).await.unwrap();
            }
        }));
    }

    let mut readers = Vec::new();
    for _ in 0..8 {
        let store = Arc::clone(&store);
        let valid = valid.clone();
        readers.push(tokio::spawn(async move {
            for _ in 0..25 {
                let bytes = store.load().await.unwrap();
                assert!(
                    valid.contains(&bytes),
                    "load returned a document that was never saved ({} bytes)",
                    bytes.len()
                );
                serde_json::from_slice::<serde_json::Value>(&bytes).unwrap();
            }
        }));
    }

    for handle in writers.into_iter().chain(readers) {
        handle.await.unwrap();
    }
}

/// Concurrent saves are serialized: the final document is exactly one of them.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_saves_last_writer_wins() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileVaultStore::new(dir.path()));

    let candidates: Vec<Vault> = (0..6).map(|i| vault_with(&format!("w{i}"), i + 1)).collect();
    let handles: Vec<_> = candidates
        .iter()
        .cloned()
        .map(|vault| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.save(&vault).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = Vault::from_slice(&store.load().await.unwrap()).unwrap();
    assert!(candidates.contains(&stored));
}

#[tokio::test]
async fn opaque_fields_are_preserved_byte_for_byte() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileVaultStore::new(dir.path());

    let vault = Vault {
        version: 1,
        entries: vec![
            VaultEntry {
                id: "1".into(),
                password: "U2FsdGVkX1+vupppZksvRf5pq5g5XjFRlipRkwB0K1Y=".into(),
                notes: "ノート: пароль ✓ \u{0}".into(),
                ..Default::default()
            },
            VaultEntry {
                id: "2".into(),
                password: String::new(),
                notes: String::new(),
                ..Default::default()
            },
        ],
    };

    store.save(&vault).await.unwrap();
    let loaded = Vault::from_slice(&store.load().await.unwrap()).unwrap();
    assert_eq!(loaded, vault);
    assert_eq!(loaded.entries[0].notes.as_bytes(), vault.entries[0].notes.as_bytes());
}

/// A save whose caller goes away keeps the write lock until its file is in
/// place, so it cannot land on top of a later acknowledged save.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn abandoned_save_cannot_overwrite_later_save() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileVaultStore::new(dir.path()));

    let stale = Vault {
        version: 1,
        entries: vec![VaultEntry {
            id: "stale".into(),
            notes: "x".repeat(32 * 1024 * 1024),
            ..Default::default()
        }],
    };
    let abandoned = tokio::time::timeout(Duration::from_millis(1), store.save(&stale)).await;
    drop(abandoned);

    let acked = vault_with("acked", 1);
    store.save(&acked).await.unwrap();

    tokio::time::sleep(Duration::from_millis(500)).await;
    let stored = Vault::from_slice(&store.load().await.unwrap()).unwrap();
    assert_eq!(stored, acked);
}
