use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::messages::domain::{Deleted, Message, NewMessage};
use crate::messages::store::MessageStore;

#[derive(Debug)]
struct Entry {
    seq: u64,
    text: String,
}

#[derive(Debug, Default)]
struct Inner {
    /// Last issued sequence number; only ever grows.
    last_seq: u64,
    entries: HashMap<String, Entry>,
}

/// Called with the new message count after every create or delete.
pub type LenObserver = Arc<dyn Fn(usize) + Send + Sync>;

/// Process-local message store.
///
/// The map and the id counter live behind one lock, so concurrent creates
/// never mint the same id. Nothing is persisted.
#[derive(Clone, Default)]
pub struct InMemoryMessageStore {
    inner: Arc<RwLock<Inner>>,
    on_len_change: Option<LenObserver>,
}

impl InMemoryMessageStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Store that reports its length to `observer`. The observer runs while
    /// the write guard is held, so reported lengths arrive in mutation order.
    pub fn with_len_observer(observer: LenObserver) -> Arc<Self> {
        Arc::new(Self { inner: Arc::default(), on_len_change: Some(observer) })
    }

    fn notify_len(&self, inner: &Inner) {
        if let Some(observer) = &self.on_len_change {
            observer(inner.entries.len());
        }
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn create(&self, input: NewMessage) -> Result<Message, ServiceError> {
        input.validate()?;
        let mut inner = self.inner.write().await;
        inner.last_seq += 1;
        let seq = inner.last_seq;
        let id = seq.to_string();
        inner.entries.insert(id.clone(), Entry { seq, text: input.text.clone() });
        self.notify_len(&inner);
        drop(inner);
        info!(%id, "message created");
        Ok(Message { id, text: input.text })
    }

    async fn get(&self, id: &str) -> Result<Message, ServiceError> {
        let inner = self.inner.read().await;
        match inner.entries.get(id) {
            Some(entry) => Ok(Message { id: id.to_string(), text: entry.text.clone() }),
            None => {
                debug!(%id, "message lookup missed");
                Err(ServiceError::not_found("message"))
            }
        }
    }

    async fn delete(&self, id: &str) -> Result<Deleted, ServiceError> {
        let mut inner = self.inner.write().await;
        if inner.entries.remove(id).is_none() {
            debug!(%id, "delete of unknown message");
            return Err(ServiceError::not_found("message"));
        }
        self.notify_len(&inner);
        drop(inner);
        info!(%id, "message deleted");
        Ok(Deleted { id: id.to_string() })
    }

    async fn list(&self) -> Vec<Message> {
        let inner = self.inner.read().await;
        let mut items: Vec<(u64, Message)> = inner
            .entries
            .iter()
            .map(|(id, e)| (e.seq, Message { id: id.clone(), text: e.text.clone() }))
            .collect();
        items.sort_unstable_by_key(|(seq, _)| *seq);
        items.into_iter().map(|(_, m)| m).collect()
    }

    async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[Message]) -> Vec<&str> {
        list.iter().map(|m| m.id.as_str()).collect()
    }

    #[tokio::test]
    async fn create_get_delete_roundtrip() -> Result<(), anyhow::Error> {
        let store = InMemoryMessageStore::new();
        assert!(store.is_empty().await);

        let created = store.create(NewMessage::new("Hello, World!")).await?;
        assert_eq!(created.id, "1");
        assert_eq!(created.text, "Hello, World!");

        let found = store.get("1").await?;
        assert_eq!(found, created);

        let deleted = store.delete("1").await?;
        assert_eq!(deleted.to_string(), "Message 1 deleted successfully");
        assert_eq!(store.get("1").await, Err(ServiceError::not_found("message")));
        assert_eq!(store.len().await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let store = InMemoryMessageStore::new();
        assert!(matches!(store.get("999").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(store.delete("999").await, Err(ServiceError::NotFound(_))));
        // ids are opaque: "01" is not "1"
        let _ = store.create(NewMessage::new("a")).await;
        assert!(matches!(store.get("01").await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn ids_are_never_reused_after_delete() -> Result<(), anyhow::Error> {
        let store = InMemoryMessageStore::new();
        store.create(NewMessage::new("one")).await?;
        store.create(NewMessage::new("two")).await?;
        store.delete("2").await?;
        let third = store.create(NewMessage::new("three")).await?;
        assert_eq!(third.id, "3");
        store.delete("1").await?;
        let fourth = store.create(NewMessage::new("four")).await?;
        assert_eq!(fourth.id, "4");
        assert_eq!(ids(&store.list().await), vec!["3", "4"]);
        Ok(())
    }

    #[tokio::test]
    async fn list_keeps_insertion_order_past_nine() -> Result<(), anyhow::Error> {
        let store = InMemoryMessageStore::new();
        for i in 1..=12 {
            store.create(NewMessage::new(format!("m{i}"))).await?;
        }
        let list = store.list().await;
        let expected: Vec<String> = (1..=12).map(|i| i.to_string()).collect();
        assert_eq!(ids(&list), expected.iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(list[9].text, "m10");
        Ok(())
    }

    #[tokio::test]
    async fn empty_text_never_stored() {
        let store = InMemoryMessageStore::new();
        assert!(matches!(store.create(NewMessage::new("")).await, Err(ServiceError::Validation(_))));
        assert!(store.is_empty().await);
        // a rejected create does not burn an id
        let m = store.create(NewMessage::new("x")).await.expect("create");
        assert_eq!(m.id, "1");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_get_distinct_ids() -> Result<(), anyhow::Error> {
        let store = InMemoryMessageStore::new();
        let mut handles = Vec::new();
        for i in 0..64 {
            let s = Arc::clone(&store);
            handles.push(tokio::spawn(async move { s.create(NewMessage::new(format!("c{i}"))).await }));
        }
        let mut seen = std::collections::HashSet::new();
        for h in handles {
            let m = h.await??;
            assert!(seen.insert(m.id));
        }
        assert_eq!(seen.len(), 64);
        assert_eq!(store.len().await, 64);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn observer_sees_lengths_in_mutation_order() -> Result<(), anyhow::Error> {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let store = InMemoryMessageStore::with_len_observer(Arc::new(move |n: usize| {
            if let Ok(mut v) = sink.lock() {
                v.push(n);
            }
        }));

        let mut handles = Vec::new();
        for i in 0..32 {
            let s = Arc::clone(&store);
            handles.push(tokio::spawn(async move { s.create(NewMessage::new(format!("o{i}"))).await }));
        }
        for h in handles {
            h.await??;
        }
        store.delete("5").await?;
        // misses and rejected creates do not report
        let _ = store.delete("5").await;
        let _ = store.create(NewMessage::new("")).await;

        let seen = seen.lock().map(|v| v.clone()).unwrap_or_default();
        let mut expected: Vec<usize> = (1..=32).collect();
        expected.push(31);
        assert_eq!(seen, expected);
        assert_eq!(seen.last().copied(), Some(store.len().await));
        Ok(())
    }
}
