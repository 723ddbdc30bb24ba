//! Integration tests for the task store.
//!
//! These tests drive the public store API over scratch files and verify the
//! persistence contract: whole-file round trips, positional mutations, and
//! degradation on missing or corrupt backing files.

use std::sync::Arc;

use tasklist::store::TaskStore;
use tasklist::types::Task;
use tempfile::TempDir;

/// Helper to create a store over a scratch file. The TempDir must be kept
/// alive for the duration of the test.
fn setup_store() -> (TempDir, TaskStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = TaskStore::new(dir.path().join("tasks.json"));
    (dir, store)
}

/// Parse the backing file as generic JSON for on-disk assertions.
fn disk_state(store: &TaskStore) -> serde_json::Value {
    let contents = std::fs::read_to_string(store.path()).expect("Failed to read backing file");
    serde_json::from_str(&contents).expect("Backing file is not valid JSON")
}

mod persistence_tests {
    use super::*;

    #[tokio::test]
    async fn save_then_load_round_trips_order_and_fields() {
        let (_dir, store) = setup_store();
        store.add("one".to_string()).await;
        store.add("two".to_string()).await;
        store.add("three".to_string()).await;
        store.complete(1).await.unwrap();

        let tasks = store.load().await;

        assert_eq!(
            tasks,
            vec![
                Task {
                    description: "one".to_string(),
                    completed: false
                },
                Task {
                    description: "two".to_string(),
                    completed: true
                },
                Task {
                    description: "three".to_string(),
                    completed: false
                },
            ]
        );
    }

    #[tokio::test]
    async fn first_access_creates_the_backing_file() {
        let (_dir, store) = setup_store();

        let tasks = store.load().await;

        assert!(tasks.is_empty());
        assert_eq!(disk_state(&store), serde_json::json!([]));
    }

    #[tokio::test]
    async fn corrupt_backing_file_degrades_to_empty() {
        let (_dir, store) = setup_store();
        std::fs::write(store.path(), "{ definitely not an array").unwrap();

        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn duplicate_descriptions_are_allowed() {
        let (_dir, store) = setup_store();
        store.add("same".to_string()).await;
        store.add("same".to_string()).await;

        assert_eq!(store.load().await.len(), 2);
    }
}

mod mutation_tests {
    use super::*;

    #[tokio::test]
    async fn add_appends_without_touching_prior_entries() {
        let (_dir, store) = setup_store();
        store.add("a".to_string()).await;
        store.complete(0).await.unwrap();

        store.add("b".to_string()).await;

        let tasks = store.load().await;
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].description, "a");
        assert!(tasks[0].completed);
        assert_eq!(tasks[1].description, "b");
        assert!(!tasks[1].completed);
    }

    #[tokio::test]
    async fn delete_shifts_subsequent_indices_down_by_one() {
        let (_dir, store) = setup_store();
        for name in ["a", "b", "c", "d"] {
            store.add(name.to_string()).await;
        }

        store.remove(1).await.unwrap();

        let tasks = store.load().await;
        assert_eq!(tasks.len(), 3);
        let names: Vec<&str> = tasks.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(names, vec!["a", "c", "d"]);
        // The entry formerly at index 2 is now addressable at index 1.
        assert_eq!(store.get(1).await.unwrap().description, "c");
    }

    #[tokio::test]
    async fn out_of_range_index_persists_no_partial_mutation() {
        let (_dir, store) = setup_store();
        store.add("only".to_string()).await;
        let before = disk_state(&store);

        assert!(store.complete(1).await.is_err());
        assert!(store.remove(2).await.is_err());
        assert!(store.update(3, "ghost".to_string()).await.is_err());

        assert_eq!(disk_state(&store), before);
    }

    #[tokio::test]
    async fn concurrent_adds_all_land() {
        let (_dir, store) = setup_store();
        let store = Arc::new(store);

        let mut handles = Vec::new();
        for i in 0..10 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(
                async move { store.add(format!("task {i}")).await },
            ));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.load().await.len(), 10);
    }
}

mod scenario_tests {
    use super::*;

    /// The full lifecycle: add, complete, update, delete, asserting the exact
    /// on-disk state after every step.
    #[tokio::test]
    async fn end_to_end_lifecycle_matches_expected_disk_states() {
        let (_dir, store) = setup_store();
        assert_eq!(store.load().await, vec![]);

        store.add("buy milk".to_string()).await;
        assert_eq!(
            disk_state(&store),
            serde_json::json!([{"task": "buy milk", "completed": false}])
        );

        store.complete(0).await.unwrap();
        assert_eq!(
            disk_state(&store),
            serde_json::json!([{"task": "buy milk", "completed": true}])
        );

        store.update(0, "buy oat milk".to_string()).await.unwrap();
        assert_eq!(
            disk_state(&store),
            serde_json::json!([{"task": "buy oat milk", "completed": true}])
        );

        let removed = store.remove(0).await.unwrap();
        assert_eq!(removed.description, "buy oat milk");
        assert_eq!(disk_state(&store), serde_json::json!([]));
    }
}
