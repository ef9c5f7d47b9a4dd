//! Tunable constants for scoring and search.
//!
//! Nothing here is read from the environment; callers thread these values
//! through the `Tokenizer`/`IndexStore`/`Scorer` constructors explicitly.

/// BM25 term-frequency saturation parameter.
pub const BM25_K1: f64 = 1.5;

/// BM25 document-length normalization parameter.
pub const BM25_B: f64 = 0.75;

/// Default number of results returned by ranked and boolean search.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// BM25 `k1`/`b` pair carried by a [`crate::score::Scorer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    pub k1: f64,
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self { k1: BM25_K1, b: BM25_B }
    }
}
