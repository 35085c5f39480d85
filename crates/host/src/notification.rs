//! Transient user-visible notifications.
//!
//! Each pushed notification owns one expiry task that removes it by id once
//! its ttl has elapsed. Reads also filter on the deadline, so a notification
//! is visible for exactly `[created, created + ttl)` whatever the scheduling
//! order of expiry tasks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Distinct per queue, increasing in push order.
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    /// RFC 3339 wall-clock creation time.
    pub created_at: String,
}

#[derive(Debug)]
struct Entry {
    notification: Notification,
    expires_at: Instant,
}

/// Insertion-ordered queue with per-notification expiry.
///
/// Cloning yields another handle to the same queue.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    entries: Arc<Mutex<Vec<Entry>>>,
    next_id: Arc<AtomicU64>,
    ttl: Duration,
}

impl NotificationQueue {
    pub fn new(ttl: Duration) -> Self {
        NotificationQueue {
            entries: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            ttl,
        }
    }

    /// Append a notification and schedule its removal.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn push(&self, message: impl Into<String>, severity: Severity) -> Notification {
        let mut entries = self.entries.lock().await;
        // Ids are taken under the lock so queue order matches id order.
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let expires_at = Instant::now() + self.ttl;
        let notification = Notification {
            id,
            message: message.into(),
            severity,
            created_at: now_rfc3339(),
        };
        entries.push(Entry {
            notification: notification.clone(),
            expires_at,
        });
        drop(entries);

        let queue = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep_until(expires_at).await;
            queue.remove(id).await;
        });
        tracing::debug!(id, severity = ?severity, "notification queued");
        notification
    }

    /// Remove the notification with `id`. Returns whether it was still queued.
    pub async fn remove(&self, id: u64) -> bool {
        let mut entries = self.entries.lock().await;
        match entries.iter().position(|e| e.notification.id == id) {
            Some(index) => {
                entries.remove(index);
                tracing::debug!(id, "notification expired");
                true
            }
            None => false,
        }
    }

    /// Live notifications in insertion order.
    pub async fn snapshot(&self) -> Vec<Notification> {
        let now = Instant::now();
        self.entries
            .lock()
            .await
            .iter()
            .filter(|e| e.expires_at > now)
            .map(|e| e.notification.clone())
            .collect()
    }
}

fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(5);

    fn messages(list: &[Notification]) -> Vec<&str> {
        list.iter().map(|n| n.message.as_str()).collect()
    }

    async fn raw_len(queue: &NotificationQueue) -> usize {
        queue.entries.lock().await.len()
    }

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn visible_for_exactly_the_ttl() {
        let queue = NotificationQueue::new(TTL);
        queue.push("hello", Severity::Info).await;

        tokio::time::advance(Duration::from_millis(4_999)).await;
        assert_eq!(messages(&queue.snapshot().await), vec!["hello"]);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(queue.snapshot().await.is_empty());

        settle().await;
        assert_eq!(raw_len(&queue).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn expiries_are_independent_and_order_is_kept() {
        let queue = NotificationQueue::new(TTL);
        queue.push("a", Severity::Info).await;
        tokio::time::advance(Duration::from_secs(1)).await;
        queue.push("b", Severity::Success).await;
        tokio::time::advance(Duration::from_secs(1)).await;
        queue.push("c", Severity::Warning).await;
        assert_eq!(messages(&queue.snapshot().await), vec!["a", "b", "c"]);

        tokio::time::advance(Duration::from_secs(3)).await;
        settle().await;
        assert_eq!(messages(&queue.snapshot().await), vec!["b", "c"]);

        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(messages(&queue.snapshot().await), vec!["c"]);

        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
        assert!(queue.snapshot().await.is_empty());
        assert_eq!(raw_len(&queue).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn ids_are_distinct_and_removal_happens_once() {
        let queue = NotificationQueue::new(TTL);
        let first = queue.push("x", Severity::Info).await;
        let second = queue.push("x", Severity::Info).await;
        assert!(second.id > first.id);

        assert!(queue.remove(first.id).await);
        assert!(!queue.remove(first.id).await);
        assert_eq!(queue.snapshot().await, vec![second]);

        tokio::time::advance(TTL).await;
        settle().await;
        assert_eq!(raw_len(&queue).await, 0);
    }

    #[tokio::test]
    async fn concurrent_pushes_all_land() {
        let queue = NotificationQueue::new(TTL);
        let handles: Vec<_> = (0..10)
            .map(|i| {
                let q = queue.clone();
                tokio::spawn(async move { q.push(format!("n{}", i), Severity::Info).await })
            })
            .collect();
        for h in handles {
            h.await.unwrap();
        }
        let snapshot = queue.snapshot().await;
        assert_eq!(snapshot.len(), 10);
        let mut ids: Vec<u64> = snapshot.iter().map(|n| n.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn queue_order_matches_id_order_across_threads() {
        let queue = NotificationQueue::new(TTL);
        let handles: Vec<_> = (0..64)
            .map(|i| {
                let q = queue.clone();
                tokio::spawn(async move { q.push(format!("n{}", i), Severity::Info).await })
            })
            .collect();
        for h in handles {
            h.await.unwrap();
        }
        let ids: Vec<u64> = queue.snapshot().await.iter().map(|n| n.id).collect();
        assert_eq!(ids.len(), 64);
        assert!(ids.windows(2).all(|w| w[0] < w[1]), "{ids:?}");
    }
}
