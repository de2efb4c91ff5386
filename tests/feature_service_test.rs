//! Service-level tests for feature listing, lookup and creation

use diginativa::feature::{FeatureService, PageRequest};
use diginativa::storage::memory::MemoryFeatureStore;
use diginativa::storage::FeatureStore;
use diginativa::Error;
use futures::future::join_all;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

fn service() -> (Arc<FeatureService>, Arc<MemoryFeatureStore>) {
    let store = Arc::new(MemoryFeatureStore::new());
    (Arc::new(FeatureService::new(store.clone())), store)
}

async fn seed(service: &FeatureService, n: usize) {
    for i in 0..n {
        service
            .create(&json!({
                "name": format!("feature-{i}"),
                "description": "seeded",
                "status": "active"
            }))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn page_lengths_follow_total_count() {
    let (service, _) = service();
    seed(&service, 23).await;

    for page_size in [1i64, 5, 10, 23, 100] {
        for page in 1i64..=6 {
            let result = service
                .list(PageRequest::new(page, page_size).unwrap())
                .await
                .unwrap();
            let expected = (page_size as usize).min(23usize.saturating_sub(((page - 1) * page_size) as usize));
            assert_eq!(
                result.features.len(),
                expected,
                "page={page} page_size={page_size}"
            );
            assert_eq!(result.total_count, 23);
        }
    }
}

#[tokio::test]
async fn create_then_get_returns_equal_feature() {
    let (service, _) = service();
    let created = service
        .create(&json!({ "name": "X", "description": "Y", "status": "deprecated" }))
        .await
        .unwrap();

    let fetched = service.get(&created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert!(fetched.updated_at >= fetched.created_at);
}

#[tokio::test]
async fn empty_name_is_rejected_without_appending() {
    let (service, store) = service();
    seed(&service, 2).await;

    let err = service
        .create(&json!({ "name": "", "description": "Y", "status": "active" }))
        .await
        .unwrap_err();

    match err {
        Error::Validation(violations) => {
            assert!(violations.iter().any(|v| v.field == "name"));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert_eq!(store.count().await.unwrap(), 2);
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let (service, _) = service();
    seed(&service, 1).await;

    assert!(matches!(
        service.get("never-issued").await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn concurrent_creates_produce_unique_ids() {
    let (service, store) = service();

    let tasks = (0..200).map(|i| {
        let service = service.clone();
        tokio::spawn(async move {
            service
                .create(&json!({
                    "name": format!("parallel-{i}"),
                    "description": "concurrent",
                    "status": "active"
                }))
                .await
        })
    });

    let ids: HashSet<String> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap().id)
        .collect();

    assert_eq!(ids.len(), 200);
    assert_eq!(store.count().await.unwrap(), 200);
}

#[tokio::test]
async fn listing_during_writes_is_self_consistent() {
    let (service, _) = service();
    seed(&service, 5).await;

    let writer = {
        let service = service.clone();
        tokio::spawn(async move { seed(&service, 100).await })
    };

    let readers = (0..50).map(|_| {
        let service = service.clone();
        tokio::spawn(async move {
            let page = service
                .list(PageRequest::new(1, 100).unwrap())
                .await
                .unwrap();
            // A page that starts at 0 sees exactly min(total, 100) items.
            assert_eq!(page.features.len(), page.total_count.min(100));
        })
    });

    for reader in join_all(readers).await {
        reader.unwrap();
    }
    writer.await.unwrap();
}
