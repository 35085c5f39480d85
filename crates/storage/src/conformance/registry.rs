use std::future::Future;

use super::{component, TestResult};
use crate::{ComponentRegistry, StorageError, UserStore};

pub(super) async fn run_registry_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: ComponentRegistry + UserStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    vec![
        TestResult::from_result(
            "registry",
            "put_then_get_round_trips",
            put_then_get_round_trips(&factory().await).await,
        ),
        TestResult::from_result(
            "registry",
            "put_overwrites_previous_record",
            put_overwrites_previous_record(&factory().await).await,
        ),
        TestResult::from_result(
            "registry",
            "get_unknown_is_not_found",
            get_unknown_is_not_found(&factory().await).await,
        ),
        TestResult::from_result(
            "registry",
            "empty_id_is_rejected",
            empty_id_is_rejected(&factory().await).await,
        ),
    ]
}

async fn put_then_get_round_trips<S: ComponentRegistry>(store: &S) -> Result<(), String> {
    let config = serde_json::json!({"title": "Contact", "fields": []});
    let record = component("form-u1-1700000000000", "form", config);
    store
        .put_component(record.clone())
        .await
        .map_err(|e| format!("put failed: {e}"))?;
    let got = store
        .get_component("form-u1-1700000000000")
        .await
        .map_err(|e| format!("get failed: {e}"))?;
    if got != record {
        return Err(format!("expected {record:?}, got {got:?}"));
    }
    Ok(())
}

async fn put_overwrites_previous_record<S: ComponentRegistry>(store: &S) -> Result<(), String> {
    let first = component("chart-u1-1", "chart", serde_json::json!({"kind": "bar"}));
    let second = component("chart-u1-1", "chart", serde_json::json!({"kind": "pie"}));
    store.put_component(first).await.map_err(|e| e.to_string())?;
    store
        .put_component(second.clone())
        .await
        .map_err(|e| e.to_string())?;
    let got = store
        .get_component("chart-u1-1")
        .await
        .map_err(|e| e.to_string())?;
    if got.config != second.config {
        return Err(format!("expected last write to win, got {:?}", got.config));
    }
    Ok(())
}

async fn get_unknown_is_not_found<S: ComponentRegistry>(store: &S) -> Result<(), String> {
    match store.get_component("missing").await {
        Err(StorageError::ComponentNotFound { component_id }) if component_id == "missing" => Ok(()),
        other => Err(format!("expected ComponentNotFound, got {other:?}")),
    }
}

async fn empty_id_is_rejected<S: ComponentRegistry>(store: &S) -> Result<(), String> {
    match store
        .put_component(component("", "form", serde_json::Value::Null))
        .await
    {
        Err(StorageError::InvalidKey { .. }) => Ok(()),
        other => Err(format!("expected InvalidKey, got {other:?}")),
    }
}
