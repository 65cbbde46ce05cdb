//! Smoke test for the facade surface: everything a user needs should be
//! reachable through the prelude.

use jotdb::json;
use jotdb::prelude::*;
use tempfile::tempdir;

#[tokio::test]
async fn prelude_covers_the_common_surface() -> StoreResult<()> {
    let dir = tempdir().unwrap();
    let store = Store::open("smoke", StoreOptions::with_root(dir.path())).await?;

    let row = store
        .upsert(
            json!({ "kind": "note", "body": "hello", "pinned": true }),
            WriteOptions::consistent(),
        )
        .await?;
    assert!(row[ID_FIELD].is_string());

    let pinned = store
        .filter(
            &FilterRequest::builder()
                .field("pinned", Condition::eq(true))
                .sort("body", SortDirection::Asc)
                .build(),
        )
        .await;
    assert_eq!(pinned.total_rows, 1);

    store.close().await
}
