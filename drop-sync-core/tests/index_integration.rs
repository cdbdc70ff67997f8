use drop_sync_core::channel::Channel;
use drop_sync_core::contract::{MockObjectStore, StoreError};
use drop_sync_core::index::{self, IndexError, INDEX_BLOB};

fn index_text() -> String {
    r#"[
        {"name": "stable", "version": "1.0.0", "files": {}},
        {"name": "unstable", "files": {}},
        {"name": "dev", "files": {}}
    ]"#
    .to_string()
}

#[tokio::test]
async fn fetch_decodes_the_remote_index() {
    let mut store = MockObjectStore::new();
    store
        .expect_get_text()
        .withf(|path| path == INDEX_BLOB)
        .return_once(|_| Ok(index_text()));

    let channels = index::fetch(&store, INDEX_BLOB)
        .await
        .expect("Fetch should succeed");
    let names: Vec<&str> = channels.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["stable", "unstable", "dev"]);
}

#[tokio::test]
async fn fetch_surfaces_missing_index_distinctly() {
    let mut store = MockObjectStore::new();
    store
        .expect_get_text()
        .return_once(|_| Err(StoreError::NotFound));

    let err = index::fetch(&store, INDEX_BLOB)
        .await
        .expect_err("Absent index must fail");
    assert!(
        matches!(err, IndexError::NotFound),
        "404 maps to IndexError::NotFound, got {err:?}"
    );
}

#[tokio::test]
async fn fetch_maps_other_store_failures_to_store_error() {
    let mut store = MockObjectStore::new();
    store.expect_get_text().return_once(|_| {
        Err(StoreError::Http {
            status: 503,
            message: "service unavailable".to_string(),
        })
    });

    let err = index::fetch(&store, INDEX_BLOB)
        .await
        .expect_err("Store failure must fail the fetch");
    match err {
        IndexError::Store(StoreError::Http { status, .. }) => assert_eq!(status, 503),
        other => panic!("Expected IndexError::Store with HTTP 503, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_fails_on_malformed_index() {
    let mut store = MockObjectStore::new();
    store
        .expect_get_text()
        .return_once(|_| Ok("{\"not\": \"an array\"}".to_string()));

    let err = index::fetch(&store, INDEX_BLOB)
        .await
        .expect_err("Malformed index must fail");
    assert!(matches!(err, IndexError::Malformed(_)));
}

#[tokio::test]
async fn publish_writes_the_encoded_index_back() {
    let channels = vec![Channel {
        name: "stable".to_string(),
        version: Some("1.0.0".to_string()),
        url: None,
        files: Default::default(),
        last_modified: None,
    }];

    let mut store = MockObjectStore::new();
    store
        .expect_put_text()
        .withf(|path, text| {
            path == INDEX_BLOB && text.contains("\"name\": \"stable\"")
        })
        .return_once(|_, _| Ok(()));

    index::publish(&store, INDEX_BLOB, &channels)
        .await
        .expect("Publish should succeed");
}

#[tokio::test]
async fn publish_surfaces_store_failures() {
    let mut store = MockObjectStore::new();
    store
        .expect_put_text()
        .return_once(|_, _| Err(StoreError::Transport("connection reset".to_string())));

    let err = index::publish(&store, INDEX_BLOB, &[])
        .await
        .expect_err("Store failure must fail the publish");
    assert!(matches!(err, IndexError::Store(_)));
}
