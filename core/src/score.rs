//! TF-IDF and BM25 scoring over a built or loaded index.

use crate::config::Bm25Params;
use crate::error::{EngineError, Result};
use crate::index::{DocId, InvertedIndex};
use crate::tokenizer::Tokenizer;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Read-only scoring view over an index.
///
/// Term arguments are passed through the same tokenizer used at build time,
/// so `"Hackers"` and `"hacker"` resolve to the same index key. Every
/// single-term operation requires the argument to normalize to exactly one
/// token and fails with [`EngineError::InvalidTerm`] otherwise, including
/// for inputs that normalize to nothing (pure punctuation or stopwords).
pub struct Scorer<'a> {
    index: &'a InvertedIndex,
    tokenizer: &'a Tokenizer,
    params: Bm25Params,
}

impl<'a> Scorer<'a> {
    pub fn new(index: &'a InvertedIndex, tokenizer: &'a Tokenizer, params: Bm25Params) -> Self {
        Self { index, tokenizer, params }
    }

    /// Raw occurrence count of `term` in one document. Unknown documents
    /// and unknown terms both count zero.
    pub fn get_tf(&self, doc_id: DocId, term: &str) -> Result<u32> {
        let token = self.single_token(term)?;
        Ok(self.raw_tf(doc_id, &token))
    }

    /// Smoothed inverse document frequency: `ln((N + 1) / (df + 1))`.
    pub fn get_idf(&self, term: &str) -> Result<f64> {
        let token = self.single_token(term)?;
        let n = self.index.doc_count() as f64;
        let df = self.index.get_documents(&token).len() as f64;
        Ok(((n + 1.0) / (df + 1.0)).ln())
    }

    /// Classic TF-IDF: raw term frequency times smoothed IDF.
    pub fn tf_idf(&self, doc_id: DocId, term: &str) -> Result<f64> {
        Ok(f64::from(self.get_tf(doc_id, term)?) * self.get_idf(term)?)
    }

    /// BM25 inverse document frequency: `ln((N - df + 0.5) / (df + 0.5) + 1)`.
    ///
    /// With df <= N the log argument is always greater than 1. If the
    /// tables are ever inconsistent enough to break that, the NaN from a
    /// non-positive argument propagates to the caller; it is not clamped.
    pub fn get_bm25_idf(&self, term: &str) -> Result<f64> {
        let token = self.single_token(term)?;
        let n = self.index.doc_count() as f64;
        let df = self.index.get_documents(&token).len() as f64;
        Ok(((n - df + 0.5) / (df + 0.5) + 1.0).ln())
    }

    /// BM25 saturating term-frequency component with document-length
    /// normalization. An empty index has average length zero and scores
    /// 0.0 outright rather than dividing by it.
    pub fn get_bm25_tf(&self, doc_id: DocId, term: &str, params: Bm25Params) -> Result<f64> {
        let token = self.single_token(term)?;
        Ok(self.bm25_tf_component(doc_id, &token, params))
    }

    /// Full BM25 score for one term in one document, using the scorer's
    /// configured `k1`/`b`.
    pub fn bm25(&self, doc_id: DocId, term: &str) -> Result<f64> {
        let token = self.single_token(term)?;
        Ok(self.bm25_term(doc_id, &token))
    }

    /// Ranked search: tokenize the query, sum each document's BM25
    /// contribution across every query token it matches, and return up to
    /// `limit` results sorted by descending score. Ties break on ascending
    /// doc id so ranking is deterministic.
    pub fn bm25_search(&self, query: &str, limit: usize) -> Vec<(DocId, f64)> {
        let tokens = self.tokenizer.normalize(query);
        let mut totals: HashMap<DocId, f64> = HashMap::new();
        for token in &tokens {
            for &doc_id in self.index.get_documents(token) {
                *totals.entry(doc_id).or_insert(0.0) += self.bm25_term(doc_id, token);
            }
        }

        let mut ranked: Vec<(DocId, f64)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        ranked.truncate(limit);
        ranked
    }

    fn single_token(&self, term: &str) -> Result<String> {
        let mut tokens = self.tokenizer.normalize(term);
        if tokens.len() == 1 {
            Ok(tokens.remove(0))
        } else {
            Err(EngineError::InvalidTerm(term.to_string()))
        }
    }

    fn raw_tf(&self, doc_id: DocId, token: &str) -> u32 {
        self.index
            .term_frequencies
            .get(&doc_id)
            .and_then(|counts| counts.get(token))
            .copied()
            .unwrap_or(0)
    }

    // `token` is already normalized here; the public wrappers validate.
    fn bm25_tf_component(&self, doc_id: DocId, token: &str, params: Bm25Params) -> f64 {
        let avg_len = self.index.average_doc_length();
        if avg_len == 0.0 {
            return 0.0;
        }
        let tf = f64::from(self.raw_tf(doc_id, token));
        let doc_len = f64::from(self.index.doc_lengths.get(&doc_id).copied().unwrap_or(0));
        let Bm25Params { k1, b } = params;
        tf * (k1 + 1.0) / (tf + k1 * (1.0 - b + b * doc_len / avg_len))
    }

    fn bm25_term(&self, doc_id: DocId, token: &str) -> f64 {
        let n = self.index.doc_count() as f64;
        let df = self.index.get_documents(token).len() as f64;
        let idf = ((n - df + 0.5) / (df + 0.5) + 1.0).ln();
        self.bm25_tf_component(doc_id, token, self.params) * idf
    }
}
