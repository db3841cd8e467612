//! Question/answer cache keyed by exact question text.
//!
//! A row is created the first time a (normalized) question is answered and is
//! never deleted here. Every repeat lookup increments `ask_count` atomically in
//! the store, so concurrent identical questions never lose an update.
//!
//! Two stores implement [`QaCache`]: [`SqliteQaCache`] for the service and
//! [`InMemoryQaCache`] for tests and throwaway runs.

mod errors;
mod memory;
mod sqlite;

use std::{future::Future, pin::Pin};

use chrono::{DateTime, Utc};

pub use errors::QaCacheError;
pub use memory::InMemoryQaCache;
pub use sqlite::SqliteQaCache;

/// One cached answer.
#[derive(Clone, Debug, PartialEq)]
pub struct QaCacheEntry {
    /// Store-assigned identifier, stable for the lifetime of the row.
    pub id: i64,
    pub question: String,
    pub answer: String,
    /// The packed context that was sent with the question.
    pub context: String,
    /// How many times this exact question was asked (1 on creation).
    pub ask_count: u64,
    pub created_at: DateTime<Utc>,
}

/// Data for a new cache row.
#[derive(Clone, Copy, Debug)]
pub struct NewQaEntry<'a> {
    pub question: &'a str,
    pub answer: &'a str,
    pub context: &'a str,
}

pub type CacheFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, QaCacheError>> + Send + 'a>>;

/// Exact-match cache contract used by the ask pipeline.
pub trait QaCache: Send + Sync {
    /// On a hit, increments `ask_count` and returns the updated row.
    fn find_and_increment<'a>(&'a self, question: &'a str) -> CacheFuture<'a, Option<QaCacheEntry>>;

    /// Inserts a row with `ask_count = 1`.
    ///
    /// If the question was inserted concurrently in the meantime, the existing
    /// row is incremented and returned instead; its answer is kept.
    fn insert_or_increment<'a>(&'a self, entry: NewQaEntry<'a>) -> CacheFuture<'a, QaCacheEntry>;

    /// Reads a row without touching its counter.
    fn get<'a>(&'a self, question: &'a str) -> CacheFuture<'a, Option<QaCacheEntry>>;
}
