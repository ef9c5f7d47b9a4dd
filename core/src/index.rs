use crate::tokenizer::Tokenizer;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub type DocId = u32;

/// A corpus record. `id` is externally assigned and unique; any fields
/// beyond title/description are carried opaquely through the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub description: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Inverted index over a document corpus.
///
/// Four tables, built in one pass and persisted as one logical unit:
/// postings (term -> ascending doc ids), per-document term counts,
/// per-document token counts, and the document lookup table.
///
/// Posting lists are kept sorted at insertion time, so query-side code
/// never re-sorts them.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InvertedIndex {
    pub postings: BTreeMap<String, Vec<DocId>>,
    pub term_frequencies: HashMap<DocId, HashMap<String, u32>>,
    pub doc_lengths: HashMap<DocId, u32>,
    pub docmap: BTreeMap<DocId, Document>,
}

impl InvertedIndex {
    /// Creates an empty index. Every read operation is total on it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index from a corpus in a single pass.
    ///
    /// Duplicate ids are last-write-wins: the earlier document is evicted
    /// from all four tables before the later one is added. Callers are
    /// expected to guarantee id uniqueness upstream.
    pub fn build(corpus: impl IntoIterator<Item = Document>, tokenizer: &Tokenizer) -> Self {
        let mut index = Self::new();
        for doc in corpus {
            index.add_document(doc, tokenizer);
        }
        tracing::info!(
            num_docs = index.docmap.len(),
            num_terms = index.postings.len(),
            "built inverted index"
        );
        index
    }

    pub fn doc_count(&self) -> usize {
        self.docmap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docmap.is_empty()
    }

    /// Mean of all recorded document lengths, 0.0 for an empty index.
    pub fn average_doc_length(&self) -> f64 {
        if self.doc_lengths.is_empty() {
            return 0.0;
        }
        let total: u64 = self.doc_lengths.values().map(|&len| u64::from(len)).sum();
        total as f64 / self.doc_lengths.len() as f64
    }

    /// Posting list for a term, ascending by doc id. Empty when absent.
    pub fn get_documents(&self, term: &str) -> &[DocId] {
        self.postings
            .get(&term.to_lowercase())
            .map_or(&[], Vec::as_slice)
    }

    /// Non-ranked boolean scan: walk `tokens` in the order given, each
    /// posting list in ascending id order, and stop as soon as
    /// `max_results` records have been collected, even mid-token.
    ///
    /// Results are deliberately not deduplicated or relevance-ranked; that
    /// is `Scorer::bm25_search`'s contract, not this one's.
    pub fn search(&self, tokens: &[String], max_results: usize) -> Vec<Document> {
        let mut matches = Vec::new();
        for token in tokens {
            for doc_id in self.get_documents(token) {
                if matches.len() == max_results {
                    return matches;
                }
                if let Some(doc) = self.docmap.get(doc_id) {
                    matches.push(doc.clone());
                }
            }
        }
        matches
    }

    fn add_document(&mut self, doc: Document, tokenizer: &Tokenizer) {
        if self.docmap.contains_key(&doc.id) {
            self.evict(doc.id);
        }

        let text = format!("{} {}", doc.title, doc.description);
        let tokens = tokenizer.normalize(&text);

        let mut counts: HashMap<String, u32> = HashMap::new();
        for token in &tokens {
            *counts.entry(token.clone()).or_insert(0) += 1;
        }
        for term in counts.keys() {
            let list = self.postings.entry(term.clone()).or_default();
            if let Err(pos) = list.binary_search(&doc.id) {
                list.insert(pos, doc.id);
            }
        }

        self.doc_lengths.insert(doc.id, tokens.len() as u32);
        self.term_frequencies.insert(doc.id, counts);
        self.docmap.insert(doc.id, doc);
    }

    /// Strips one document from all four tables. Only reachable through a
    /// duplicate-id overwrite during build; the public surface has no
    /// update or delete operation.
    fn evict(&mut self, doc_id: DocId) {
        if let Some(counts) = self.term_frequencies.remove(&doc_id) {
            for term in counts.keys() {
                if let Some(list) = self.postings.get_mut(term) {
                    list.retain(|&id| id != doc_id);
                    if list.is_empty() {
                        self.postings.remove(term);
                    }
                }
            }
        }
        self.doc_lengths.remove(&doc_id);
        self.docmap.remove(&doc_id);
    }
}
