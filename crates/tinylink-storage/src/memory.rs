use async_trait::async_trait;
use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;
use std::cmp::Reverse;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tinylink_core::store::{LinkStore, Result};
use tinylink_core::{Clock, Link, ShortCode, StorageError, SystemClock};
use tracing::trace;

/// In-memory storage entry for a link.
#[derive(Debug, Clone)]
struct Entry {
    link: Link,
    /// Insertion order, used to break `created_at` ties when listing.
    seq: u64,
}

/// In-memory implementation of [`LinkStore`] using DashMap.
///
/// Every operation on a single code runs under that key's shard lock:
/// `create` checks and inserts through the entry API, and
/// `resolve_and_increment` mutates through a write guard, so concurrent
/// callers can neither insert the same code twice nor lose a click.
#[derive(Clone)]
pub struct InMemoryStore {
    storage: Arc<DashMap<String, Entry>>,
    next_seq: Arc<AtomicU64>,
    clock: Arc<dyn Clock>,
}

impl InMemoryStore {
    /// Creates a new in-memory store stamped by the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Creates a new in-memory store with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Arc::new(DashMap::with_capacity(capacity)),
            next_seq: Arc::new(AtomicU64::new(0)),
            clock: Arc::new(SystemClock),
        }
    }

    /// Creates a new in-memory store that reads time from `clock`.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            storage: Arc::new(DashMap::new()),
            next_seq: Arc::new(AtomicU64::new(0)),
            clock: Arc::new(clock),
        }
    }

    /// Number of live links.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("links", &self.storage.len())
            .finish()
    }
}

#[async_trait]
impl LinkStore for InMemoryStore {
    async fn create(&self, code: &ShortCode, target_url: &str) -> Result<Link> {
        match self.storage.entry(code.as_str().to_owned()) {
            MapEntry::Occupied(_) => Err(StorageError::Conflict(code.to_string())),
            MapEntry::Vacant(vacant) => {
                let link = Link::new(code.clone(), target_url, self.clock.now());
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                vacant.insert(Entry {
                    link: link.clone(),
                    seq,
                });
                trace!(code = %code, "inserted link");
                Ok(link)
            }
        }
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<Link>> {
        Ok(self
            .storage
            .get(code.as_str())
            .map(|entry| entry.link.clone()))
    }

    async fn resolve_and_increment(&self, code: &ShortCode) -> Result<Option<Link>> {
        let Some(mut entry) = self.storage.get_mut(code.as_str()) else {
            return Ok(None);
        };

        let now = self.clock.now();
        entry.link.record_click(now);
        Ok(Some(entry.link.clone()))
    }

    async fn delete(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.storage.remove(code.as_str()).is_some())
    }

    async fn list(&self) -> Result<Vec<Link>> {
        let mut entries: Vec<Entry> = self
            .storage
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        entries.sort_by_key(|entry| Reverse((entry.link.created_at, entry.seq)));
        Ok(entries.into_iter().map(|entry| entry.link).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::{SignedDuration, Timestamp};
    use tinylink_core::clock::test_clock::TestClock;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    fn epoch() -> Timestamp {
        Timestamp::from_second(1_700_000_000).unwrap()
    }

    #[tokio::test]
    async fn create_and_get() {
        let store = InMemoryStore::with_clock(TestClock::new(epoch()));

        let created = store
            .create(&code("abc123"), "https://example.com")
            .await
            .unwrap();
        assert_eq!(created.total_clicks, 0);
        assert_eq!(created.last_clicked_at, None);
        assert_eq!(created.created_at, epoch());

        let fetched = store.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let store = InMemoryStore::new();

        assert!(store.get(&code("nope12")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_conflict_leaves_existing_record() {
        let store = InMemoryStore::new();

        store
            .create(&code("abc123"), "https://example.com")
            .await
            .unwrap();
        store.resolve_and_increment(&code("abc123")).await.unwrap();

        let err = store
            .create(&code("abc123"), "https://other.com")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(ref c) if c == "abc123"));

        let existing = store.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(existing.target_url, "https://example.com");
        assert_eq!(existing.total_clicks, 1);
    }

    #[tokio::test]
    async fn resolve_increments_and_stamps() {
        let clock = TestClock::new(epoch());
        let store = InMemoryStore::with_clock(clock.clone());
        store
            .create(&code("abc123"), "https://example.com")
            .await
            .unwrap();

        clock.advance(SignedDuration::from_secs(30));
        let first = store
            .resolve_and_increment(&code("abc123"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.total_clicks, 1);
        assert_eq!(
            first.last_clicked_at,
            Some(epoch() + SignedDuration::from_secs(30))
        );

        clock.advance(SignedDuration::from_secs(30));
        let second = store
            .resolve_and_increment(&code("abc123"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(second.total_clicks, 2);
        assert_eq!(
            second.last_clicked_at,
            Some(epoch() + SignedDuration::from_secs(60))
        );
        assert_eq!(second.created_at, epoch());
    }

    #[tokio::test]
    async fn resolve_nonexistent() {
        let store = InMemoryStore::new();

        assert!(store
            .resolve_and_increment(&code("nope12"))
            .await
            .unwrap()
            .is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn delete_frees_the_code() {
        let store = InMemoryStore::new();

        store
            .create(&code("abc123"), "https://example.com")
            .await
            .unwrap();
        store.resolve_and_increment(&code("abc123")).await.unwrap();

        assert!(store.delete(&code("abc123")).await.unwrap());
        assert!(store.get(&code("abc123")).await.unwrap().is_none());
        assert!(!store.delete(&code("abc123")).await.unwrap());

        let recreated = store
            .create(&code("abc123"), "https://new.example.com")
            .await
            .unwrap();
        assert_eq!(recreated.total_clicks, 0);
        assert_eq!(recreated.last_clicked_at, None);
        assert_eq!(recreated.target_url, "https://new.example.com");
    }

    #[tokio::test]
    async fn list_orders_newest_first() {
        let clock = TestClock::new(epoch());
        let store = InMemoryStore::with_clock(clock.clone());

        store.create(&code("first1"), "https://a.com").await.unwrap();
        clock.advance(SignedDuration::from_secs(1));
        store.create(&code("second"), "https://b.com").await.unwrap();
        // same timestamp as "second": insertion order decides
        store.create(&code("third3"), "https://c.com").await.unwrap();

        let codes: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|link| link.code.to_string())
            .collect();
        assert_eq!(codes, vec!["third3", "second", "first1"]);
    }

    #[tokio::test]
    async fn list_empty() {
        let store = InMemoryStore::new();

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_resolves_are_not_lost() {
        let store = InMemoryStore::new();
        store
            .create(&code("hot123"), "https://example.com")
            .await
            .unwrap();

        let mut handles = vec![];
        for _ in 0..200 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .resolve_and_increment(&code("hot123"))
                    .await
                    .unwrap()
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let link = store.get(&code("hot123")).await.unwrap().unwrap();
        assert_eq!(link.total_clicks, 200);
        assert!(link.last_clicked_at.is_some());
    }

    #[tokio::test]
    async fn concurrent_creates_admit_exactly_one() {
        let store = InMemoryStore::new();

        let mut handles = vec![];
        for i in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .create(&code("same12"), &format!("https://example{i}.com"))
                    .await
            }));
        }

        let mut created = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(StorageError::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(conflicts, 49);
        assert_eq!(store.len(), 1);
    }
}
