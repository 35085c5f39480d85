//! Conformance test suite for storage backends.
//!
//! Backend-agnostic checks that any implementation of both
//! [`ComponentRegistry`] and [`UserStore`] can run:
//!
//! - **Registry**: put/get round-trip, overwrite, not-found, key validation
//! - **User store**: opaque payload round-trip, overwrite, not-found
//! - **Concurrency**: parallel writers to distinct and shared keys
//!
//! # Usage
//!
//! ```ignore
//! use widgetry_storage::conformance::run_conformance_suite;
//!
//! #[tokio::test]
//! async fn sqlite_conformance() {
//!     let report = run_conformance_suite(|| async { open_test_store().await }).await;
//!     assert!(report.failed == 0, "{report}");
//! }
//! ```

mod concurrent;
mod registry;
mod user_store;

use std::fmt;
use std::future::Future;

use crate::record::{ComponentRecord, UserDataRecord};
use crate::{ComponentRegistry, UserStore};

/// Result of a single conformance test.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Test category (e.g. "registry", "user_store").
    pub category: String,
    pub name: String,
    pub passed: bool,
    /// Error message if the test failed.
    pub message: Option<String>,
}

impl TestResult {
    fn from_result(category: &str, name: &str, result: Result<(), String>) -> Self {
        let (passed, message) = match result {
            Ok(()) => (true, None),
            Err(msg) => (false, Some(msg)),
        };
        Self {
            category: category.to_string(),
            name: name.to_string(),
            passed,
            message,
        }
    }
}

/// Aggregated report from a full conformance suite run.
#[derive(Debug, Clone)]
pub struct ConformanceReport {
    pub results: Vec<TestResult>,
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Conformance: {}/{} passed ({} failed)",
            self.passed, self.total, self.failed
        )?;
        for r in self.results.iter().filter(|r| !r.passed) {
            writeln!(
                f,
                "  FAIL [{}/{}]: {}",
                r.category,
                r.name,
                r.message.as_deref().unwrap_or("(no message)")
            )?;
        }
        Ok(())
    }
}

/// Run the full conformance suite against a storage backend.
///
/// `factory` is called once per test so every test starts from an empty store.
pub async fn run_conformance_suite<S, F, Fut>(factory: F) -> ConformanceReport
where
    S: ComponentRegistry + UserStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let mut results = Vec::new();

    results.extend(registry::run_registry_tests(&factory).await);
    results.extend(user_store::run_user_store_tests(&factory).await);
    results.extend(concurrent::run_concurrent_tests(&factory).await);

    let passed = results.iter().filter(|r| r.passed).count();
    let total = results.len();

    ConformanceReport {
        results,
        passed,
        failed: total - passed,
        total,
    }
}

// ── Shared fixtures ──────────────────────────────────────────────────────────

fn component(id: &str, kind: &str, config: serde_json::Value) -> ComponentRecord {
    ComponentRecord {
        component_id: id.to_string(),
        kind: kind.to_string(),
        config,
        created_at: "2026-01-01T00:00:00Z".to_string(),
    }
}

fn user_data(user_id: &str, data: serde_json::Value) -> UserDataRecord {
    UserDataRecord {
        user_id: user_id.to_string(),
        data,
    }
}
