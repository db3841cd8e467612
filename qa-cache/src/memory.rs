//! Process-local cache store.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::{CacheFuture, NewQaEntry, QaCache, QaCacheEntry};

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: HashMap<String, QaCacheEntry>,
}

/// Cache kept in a mutex-guarded map; contents are lost on drop.
#[derive(Default)]
pub struct InMemoryQaCache {
    inner: Mutex<Inner>,
}

impl InMemoryQaCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl QaCache for InMemoryQaCache {
    fn find_and_increment<'a>(&'a self, question: &'a str) -> CacheFuture<'a, Option<QaCacheEntry>> {
        Box::pin(async move {
            let mut inner = self.inner.lock().await;
            Ok(inner.rows.get_mut(question).map(|e| {
                e.ask_count += 1;
                e.clone()
            }))
        })
    }

    fn insert_or_increment<'a>(&'a self, entry: NewQaEntry<'a>) -> CacheFuture<'a, QaCacheEntry> {
        Box::pin(async move {
            let mut inner = self.inner.lock().await;
            if let Some(existing) = inner.rows.get_mut(entry.question) {
                existing.ask_count += 1;
                return Ok(existing.clone());
            }
            inner.next_id += 1;
            let stored = QaCacheEntry {
                id: inner.next_id,
                question: entry.question.to_owned(),
                answer: entry.answer.to_owned(),
                context: entry.context.to_owned(),
                ask_count: 1,
                created_at: Utc::now(),
            };
            inner.rows.insert(stored.question.clone(), stored.clone());
            Ok(stored)
        })
    }

    fn get<'a>(&'a self, question: &'a str) -> CacheFuture<'a, Option<QaCacheEntry>> {
        Box::pin(async move { Ok(self.inner.lock().await.rows.get(question).cloned()) })
    }
}
