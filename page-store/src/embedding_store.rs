//! In-memory mapping from page identifier to embedding vector.

use std::collections::HashMap;

use crate::{errors::PageStoreError, record::PageTable};

/// Page embeddings of a single document.
///
/// All vectors share one dimension. Iteration order is insertion order, which
/// for CSV-loaded stores is the row order of the file.
#[derive(Clone, Debug, Default)]
pub struct EmbeddingStore {
    dim: usize,
    titles: Vec<String>,
    vectors: Vec<Vec<f32>>,
    index: HashMap<String, usize>,
}

impl EmbeddingStore {
    /// Empty store with a fixed dimension.
    pub fn with_dimension(dim: usize) -> Self {
        Self {
            dim,
            ..Self::default()
        }
    }

    /// Builds a store from `(title, vector)` pairs.
    ///
    /// The dimension is taken from the first vector.
    ///
    /// # Errors
    /// - [`PageStoreError::VectorSizeMismatch`] if vectors differ in length
    /// - [`PageStoreError::DuplicateTitle`] if a title repeats
    pub fn from_entries<I, S>(entries: I) -> Result<Self, PageStoreError>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let mut store = Self::default();
        for (title, vector) in entries {
            store.insert(title, vector)?;
        }
        Ok(store)
    }

    /// Appends one embedding.
    ///
    /// An empty store without a fixed dimension adopts the first vector's length.
    ///
    /// # Errors
    /// - [`PageStoreError::VectorSizeMismatch`] if `vector` has the wrong length
    /// - [`PageStoreError::DuplicateTitle`] if `title` is already present
    pub fn insert(&mut self, title: impl Into<String>, vector: Vec<f32>) -> Result<(), PageStoreError> {
        let title = title.into();
        if self.titles.is_empty() && self.dim == 0 {
            self.dim = vector.len();
        }
        if vector.len() != self.dim {
            return Err(PageStoreError::VectorSizeMismatch {
                got: vector.len(),
                want: self.dim,
            });
        }
        if self.index.contains_key(&title) {
            return Err(PageStoreError::DuplicateTitle(title));
        }
        self.index.insert(title.clone(), self.titles.len());
        self.titles.push(title);
        self.vectors.push(vector);
        Ok(())
    }

    pub fn dimension(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn get(&self, title: &str) -> Option<&[f32]> {
        self.index.get(title).map(|&i| self.vectors[i].as_slice())
    }

    /// `(title, vector)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.titles
            .iter()
            .map(String::as_str)
            .zip(self.vectors.iter().map(Vec::as_slice))
    }

    /// Checks that every page in `pages` has an embedding.
    ///
    /// Embeddings without a page are allowed; the packer skips them.
    ///
    /// # Errors
    /// Returns [`PageStoreError::MissingEmbedding`] for the first page without one.
    pub fn validate_against(&self, pages: &PageTable) -> Result<(), PageStoreError> {
        match pages.iter().find(|p| !self.index.contains_key(&p.title)) {
            Some(p) => Err(PageStoreError::MissingEmbedding(p.title.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PageRecord;

    #[test]
    fn keeps_insertion_order_and_dimension() {
        let store = EmbeddingStore::from_entries([
            ("Page 2", vec![0.0, 1.0]),
            ("Page 1", vec![1.0, 0.0]),
        ])
        .unwrap();

        assert_eq!(store.dimension(), 2);
        let titles: Vec<_> = store.iter().map(|(t, _)| t).collect();
        assert_eq!(titles, ["Page 2", "Page 1"]);
        assert_eq!(store.get("Page 1"), Some(&[1.0, 0.0][..]));
    }

    #[test]
    fn rejects_mixed_dimensions_and_duplicates() {
        let err = EmbeddingStore::from_entries([("a", vec![1.0, 0.0]), ("b", vec![1.0])])
            .unwrap_err();
        assert!(matches!(err, PageStoreError::VectorSizeMismatch { got: 1, want: 2 }));

        let err = EmbeddingStore::from_entries([("a", vec![1.0]), ("a", vec![2.0])]).unwrap_err();
        assert!(matches!(err, PageStoreError::DuplicateTitle(t) if t == "a"));
    }

    #[test]
    fn fixed_dimension_is_enforced_on_first_insert() {
        let mut store = EmbeddingStore::with_dimension(3);
        assert!(store.is_empty());
        assert!(store.insert("a", vec![1.0]).is_err());
        assert!(store.insert("a", vec![1.0, 2.0, 3.0]).is_ok());
    }

    #[test]
    fn every_page_needs_an_embedding() {
        let store = EmbeddingStore::from_entries([
            ("Page 1", vec![1.0]),
            ("Page 5", vec![0.5]),
        ])
        .unwrap();

        // extra embedding for a page that is not in the table is fine
        let pages = PageTable::new(vec![PageRecord::new("Page 1", "x", 1)]).unwrap();
        assert!(store.validate_against(&pages).is_ok());

        let pages = PageTable::new(vec![
            PageRecord::new("Page 1", "x", 1),
            PageRecord::new("Page 2", "y", 1),
        ])
        .unwrap();
        assert!(matches!(
            store.validate_against(&pages),
            Err(PageStoreError::MissingEmbedding(t)) if t == "Page 2"
        ));
    }
}
