use std::future::Future;
use std::sync::Arc;

use super::{component, TestResult};
use crate::{ComponentRegistry, UserStore};

/// Number of concurrent tasks to spawn in each test.
const N: usize = 10;

pub(super) async fn run_concurrent_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: ComponentRegistry + UserStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    vec![
        TestResult::from_result(
            "concurrent",
            "parallel_puts_to_distinct_ids_all_visible",
            parallel_puts_to_distinct_ids_all_visible(Arc::new(factory().await)).await,
        ),
        TestResult::from_result(
            "concurrent",
            "parallel_puts_to_same_id_leave_one_whole_record",
            parallel_puts_to_same_id_leave_one_whole_record(Arc::new(factory().await)).await,
        ),
    ]
}

/// N tasks record N different components; every one must be readable afterwards.
async fn parallel_puts_to_distinct_ids_all_visible<S: ComponentRegistry>(
    store: Arc<S>,
) -> Result<(), String> {
    let mut handles = Vec::with_capacity(N);
    for i in 0..N {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .put_component(component(
                    &format!("form-u{i}-1"),
                    "form",
                    serde_json::json!({ "i": i }),
                ))
                .await
        }));
    }
    for h in handles {
        h.await
            .map_err(|e| format!("task panicked: {e}"))?
            .map_err(|e| format!("put failed: {e}"))?;
    }
    for i in 0..N {
        let got = store
            .get_component(&format!("form-u{i}-1"))
            .await
            .map_err(|e| format!("get {i} failed: {e}"))?;
        if got.config != serde_json::json!({ "i": i }) {
            return Err(format!("record {i} has wrong config {:?}", got.config));
        }
    }
    Ok(())
}

/// N tasks overwrite the same id; the survivor must be exactly one of the writes.
async fn parallel_puts_to_same_id_leave_one_whole_record<S: ComponentRegistry>(
    store: Arc<S>,
) -> Result<(), String> {
    let mut handles = Vec::with_capacity(N);
    for i in 0..N {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .put_component(component(
                    "dashboard-shared-1",
                    "dashboard",
                    serde_json::json!({ "writer": i, "title": format!("t{i}") }),
                ))
                .await
        }));
    }
    for h in handles {
        h.await
            .map_err(|e| format!("task panicked: {e}"))?
            .map_err(|e| format!("put failed: {e}"))?;
    }
    let got = store
        .get_component("dashboard-shared-1")
        .await
        .map_err(|e| e.to_string())?;
    let writer = got
        .config
        .get("writer")
        .and_then(|w| w.as_u64())
        .ok_or_else(|| format!("record lost its writer field: {:?}", got.config))?;
    let title = got.config.get("title").and_then(|t| t.as_str());
    if title != Some(format!("t{writer}").as_str()) {
        return Err(format!("torn record: {:?}", got.config));
    }
    Ok(())
}
