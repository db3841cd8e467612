//! Page records and the page table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::PageStoreError;

/// One page of the indexed book.
///
/// Field names match the CSV columns (`title`, `content`, `tokens`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Unique page identifier, e.g. `"Page 12"`.
    pub title: String,
    /// Page text.
    pub content: String,
    /// Token length of `content`.
    pub tokens: usize,
}

impl PageRecord {
    pub fn new(title: impl Into<String>, content: impl Into<String>, tokens: usize) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tokens,
        }
    }
}

/// Immutable set of pages with lookup by identifier.
///
/// Iteration follows insertion (file row) order.
#[derive(Clone, Debug, Default)]
pub struct PageTable {
    pages: Vec<PageRecord>,
    index: HashMap<String, usize>,
}

impl PageTable {
    /// Builds a table, rejecting duplicate identifiers.
    ///
    /// # Errors
    /// Returns [`PageStoreError::DuplicateTitle`] on the first repeated title.
    pub fn new(pages: Vec<PageRecord>) -> Result<Self, PageStoreError> {
        let mut index = HashMap::with_capacity(pages.len());
        for (i, p) in pages.iter().enumerate() {
            if index.insert(p.title.clone(), i).is_some() {
                return Err(PageStoreError::DuplicateTitle(p.title.clone()));
            }
        }
        Ok(Self { pages, index })
    }

    pub fn get(&self, title: &str) -> Option<&PageRecord> {
        self.index.get(title).map(|&i| &self.pages[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageRecord> {
        self.pages.iter()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Sum of `tokens` over all pages.
    pub fn total_tokens(&self) -> usize {
        self.pages.iter().map(|p| p.tokens).sum()
    }
}
