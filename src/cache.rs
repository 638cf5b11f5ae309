use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;

/// Tag-based output cache for listing responses. Entries live until their
/// tag is evicted by a mutation or the TTL runs out.
#[derive(Clone)]
pub struct ResponseCache {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    ttl_seconds: i64,
}

#[derive(Clone)]
struct Entry {
    body: serde_json::Value,
    total: Option<u64>,
    tag: &'static str,
    cached_at: i64,
}

impl ResponseCache {
    pub fn new(ttl_seconds: i64) -> Self {
        Self { entries: Arc::new(RwLock::new(HashMap::new())), ttl_seconds }
    }

    pub async fn get(&self, key: &str) -> Option<(serde_json::Value, Option<u64>)> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| self.is_fresh(entry.cached_at))
            .map(|entry| (entry.body.clone(), entry.total))
    }

    pub async fn put(
        &self,
        key: String,
        tag: &'static str,
        body: serde_json::Value,
        total: Option<u64>,
    ) {
        let entry = Entry { body, total, tag, cached_at: now_sec() };
        self.entries.write().await.insert(key, entry);
    }

    pub async fn evict_tag(&self, tag: &str) {
        self.entries.write().await.retain(|_, entry| entry.tag != tag);
    }

    fn is_fresh(&self, cached_at: i64) -> bool {
        now_sec().saturating_sub(cached_at) <= self.ttl_seconds
    }
}

fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn eviction_is_per_tag() {
        let cache = ResponseCache::new(60);
        cache.put("/genres".to_string(), "genres-get", json!([1]), None).await;
        cache.put("/actors?page=1".to_string(), "actors-get", json!([2]), Some(1)).await;

        cache.evict_tag("genres-get").await;

        assert!(cache.get("/genres").await.is_none());
        let (body, total) = cache.get("/actors?page=1").await.unwrap();
        assert_eq!(body, json!([2]));
        assert_eq!(total, Some(1));
    }

    #[tokio::test]
    async fn stale_entries_are_not_served() {
        let cache = ResponseCache::new(-1);
        cache.put("/genres".to_string(), "genres-get", json!([]), None).await;
        assert!(cache.get("/genres").await.is_none());
    }
}
