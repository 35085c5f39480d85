use std::future::Future;

use super::{user_data, TestResult};
use crate::{ComponentRegistry, StorageError, UserStore};

pub(super) async fn run_user_store_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: ComponentRegistry + UserStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    vec![
        TestResult::from_result(
            "user_store",
            "payload_round_trips_unchanged",
            payload_round_trips_unchanged(&factory().await).await,
        ),
        TestResult::from_result(
            "user_store",
            "put_replaces_payload",
            put_replaces_payload(&factory().await).await,
        ),
        TestResult::from_result(
            "user_store",
            "get_unknown_user_is_not_found",
            get_unknown_user_is_not_found(&factory().await).await,
        ),
    ]
}

async fn payload_round_trips_unchanged<S: UserStore>(store: &S) -> Result<(), String> {
    let payload = serde_json::json!({
        "nested": {"list": [1, 2.5, "three", null, true]},
        "unicode": "héllo ✓",
    });
    store
        .put_user_data(user_data("user-1", payload.clone()))
        .await
        .map_err(|e| e.to_string())?;
    let got = store
        .get_user_data("user-1")
        .await
        .map_err(|e| e.to_string())?;
    if got.data != payload {
        return Err(format!("payload changed: {:?}", got.data));
    }
    Ok(())
}

async fn put_replaces_payload<S: UserStore>(store: &S) -> Result<(), String> {
    store
        .put_user_data(user_data("user-1", serde_json::json!(1)))
        .await
        .map_err(|e| e.to_string())?;
    store
        .put_user_data(user_data("user-1", serde_json::json!(2)))
        .await
        .map_err(|e| e.to_string())?;
    let got = store
        .get_user_data("user-1")
        .await
        .map_err(|e| e.to_string())?;
    if got.data != serde_json::json!(2) {
        return Err(format!("expected 2, got {:?}", got.data));
    }
    Ok(())
}

async fn get_unknown_user_is_not_found<S: UserStore>(store: &S) -> Result<(), String> {
    match store.get_user_data("nobody").await {
        Err(StorageError::UserDataNotFound { user_id }) if user_id == "nobody" => Ok(()),
        other => Err(format!("expected UserDataNotFound, got {other:?}")),
    }
}
