//! Dot-product ranking of pages against a query vector.

use page_store::EmbeddingStore;

use crate::error::ContextorError;

/// One page with its similarity to the query.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedResult {
    pub similarity: f32,
    pub identifier: String,
}

/// Dot product of two equal-length vectors.
///
/// Vectors are expected to be normalized upstream; nothing is re-normalized
/// here, so this is cosine similarity only for unit vectors.
pub fn similarity(a: &[f32], b: &[f32]) -> Result<f32, ContextorError> {
    if a.len() != b.len() {
        return Err(ContextorError::DimensionMismatch {
            query: a.len(),
            page: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// Orders every page in `embeddings` by descending similarity to `query`.
///
/// The sort is stable, so equal scores keep store order. NaN scores are
/// ordered by [`f32::total_cmp`].
pub fn rank(query: &[f32], embeddings: &EmbeddingStore) -> Result<Vec<RankedResult>, ContextorError> {
    let mut ranked = embeddings
        .iter()
        .map(|(title, vector)| {
            Ok(RankedResult {
                similarity: similarity(query, vector)?,
                identifier: title.to_owned(),
            })
        })
        .collect::<Result<Vec<_>, ContextorError>>()?;

    ranked.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn similarity_is_a_commutative_dot_product() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, -5.0, 0.5];
        assert_eq!(similarity(&a, &b).unwrap(), 4.0 - 10.0 + 1.5);
        assert_eq!(similarity(&a, &b).unwrap(), similarity(&b, &a).unwrap());
    }

    #[test]
    fn unnormalized_vectors_are_not_rescaled() {
        assert_eq!(similarity(&[2.0, 0.0], &[3.0, 0.0]).unwrap(), 6.0);
    }

    #[test]
    fn length_mismatch_is_an_error() {
        assert!(matches!(
            similarity(&[1.0], &[1.0, 0.0]),
            Err(ContextorError::DimensionMismatch { query: 1, page: 2 })
        ));
    }

    #[test]
    fn orders_two_pages() {
        let store = EmbeddingStore::from_entries([
            ("Page 1", vec![1.0, 0.0]),
            ("Page 2", vec![0.0, 1.0]),
        ])
        .unwrap();

        let ranked = rank(&[1.0, 0.0], &store).unwrap();
        let ids: Vec<_> = ranked.iter().map(|r| r.identifier.as_str()).collect();
        let sims: Vec<_> = ranked.iter().map(|r| r.similarity).collect();
        assert_eq!(ids, ["Page 1", "Page 2"]);
        assert_eq!(sims, [1.0, 0.0]);
    }

    #[test]
    fn result_is_a_sorted_permutation_with_stable_ties() {
        let store = EmbeddingStore::from_entries([
            ("a", vec![0.1, 0.0]),
            ("b", vec![0.5, 0.5]),
            ("c", vec![0.1, 0.0]),
            ("d", vec![-1.0, 0.0]),
            ("e", vec![0.9, 0.0]),
        ])
        .unwrap();

        let ranked = rank(&[1.0, 0.0], &store).unwrap();
        assert_eq!(ranked.len(), 5);
        assert!(ranked.windows(2).all(|w| w[0].similarity >= w[1].similarity));

        let ids: Vec<_> = ranked.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(ids, ["e", "b", "a", "c", "d"]);
    }

    #[test]
    fn empty_store_ranks_nothing() {
        let ranked = rank(&[1.0, 0.0, 0.0], &EmbeddingStore::default()).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn mismatched_store_fails() {
        let store = EmbeddingStore::from_entries([("Page 1", vec![1.0, 0.0, 0.0])]).unwrap();
        assert!(matches!(
            rank(&[1.0, 0.0], &store),
            Err(ContextorError::DimensionMismatch { query: 2, page: 3 })
        ));
    }
}
