use cinesearch_core::{Bm25Params, DocId, Document, EngineError, InvertedIndex, Scorer, Tokenizer};
use std::collections::HashSet;

fn tokenizer() -> Tokenizer {
    let stopwords: HashSet<String> = ["a", "an", "and", "is", "the"]
        .iter()
        .map(|w| w.to_string())
        .collect();
    Tokenizer::new(stopwords)
}

fn doc(id: DocId, title: &str, description: &str) -> Document {
    Document {
        id,
        title: title.into(),
        description: description.into(),
        extra: serde_json::Map::new(),
    }
}

fn movie_index(tk: &Tokenizer) -> InvertedIndex {
    InvertedIndex::build(
        vec![
            doc(1, "The Matrix", "A hacker discovers reality is simulated"),
            doc(2, "The Notebook", "A love story"),
        ],
        tk,
    )
}

#[test]
fn tf_counts_normalized_occurrences() {
    let tk = tokenizer();
    let index = movie_index(&tk);
    let scorer = Scorer::new(&index, &tk, Bm25Params::default());

    assert_eq!(scorer.get_tf(1, "hacker").unwrap(), 1);
    // Term form differs from the indexed surface form but stems the same.
    assert_eq!(scorer.get_tf(1, "Hackers").unwrap(), 1);
    assert_eq!(scorer.get_tf(2, "hacker").unwrap(), 0);
    // Unknown doc ids behave like documents with empty counts.
    assert_eq!(scorer.get_tf(99, "hacker").unwrap(), 0);
}

#[test]
fn idf_matches_smoothed_formula() {
    let tk = tokenizer();
    let index = movie_index(&tk);
    let scorer = Scorer::new(&index, &tk, Bm25Params::default());

    // N = 2, df("matrix") = 1: ln(3/2)
    let idf = scorer.get_idf("matrix").unwrap();
    assert!((idf - 1.5f64.ln()).abs() < 1e-9);
}

#[test]
fn stopword_term_is_rejected() {
    let tk = tokenizer();
    let index = movie_index(&tk);
    let scorer = Scorer::new(&index, &tk, Bm25Params::default());

    // "the" normalizes to nothing, not to an empty-string key.
    assert!(matches!(scorer.get_idf("the"), Err(EngineError::InvalidTerm(_))));
    assert!(matches!(scorer.get_tf(1, "..."), Err(EngineError::InvalidTerm(_))));
}

#[test]
fn multi_word_term_is_rejected() {
    let tk = tokenizer();
    let index = movie_index(&tk);
    let scorer = Scorer::new(&index, &tk, Bm25Params::default());

    assert!(matches!(
        scorer.get_idf("love story"),
        Err(EngineError::InvalidTerm(_))
    ));
    assert!(matches!(
        scorer.get_bm25_tf(1, "love story", Bm25Params::default()),
        Err(EngineError::InvalidTerm(_))
    ));
}

#[test]
fn idf_is_non_increasing_in_document_frequency() {
    let tk = tokenizer();
    let index = InvertedIndex::build(
        vec![
            doc(1, "Heat", "heist crew chase"),
            doc(2, "Ronin", "heist crew"),
            doc(3, "Rififi", "heist"),
        ],
        &tk,
    );
    let scorer = Scorer::new(&index, &tk, Bm25Params::default());

    let rare = scorer.get_idf("chase").unwrap(); // df = 1
    let mid = scorer.get_idf("crew").unwrap(); // df = 2
    let common = scorer.get_idf("heist").unwrap(); // df = 3
    assert!(rare > mid && mid > common);

    let rare_bm25 = scorer.get_bm25_idf("chase").unwrap();
    let common_bm25 = scorer.get_bm25_idf("heist").unwrap();
    assert!(rare_bm25 > common_bm25);
}

#[test]
fn bm25_search_ranks_two_term_match_first() {
    let tk = tokenizer();
    let index = movie_index(&tk);
    let scorer = Scorer::new(&index, &tk, Bm25Params::default());

    let results = scorer.bm25_search("love story", 5);
    assert!(!results.is_empty());
    assert_eq!(results[0].0, 2);
    assert!(results[0].1 > 0.0);
}

#[test]
fn bm25_search_scores_are_summed_contributions() {
    let tk = tokenizer();
    let index = movie_index(&tk);
    let scorer = Scorer::new(&index, &tk, Bm25Params::default());

    let results = scorer.bm25_search("matrix love story", 5);
    for &(doc_id, score) in &results {
        let expected: f64 = ["matrix", "love", "story"]
            .iter()
            .map(|term| scorer.bm25(doc_id, term).unwrap())
            .sum();
        assert!((score - expected).abs() < 1e-9);
    }
}

#[test]
fn bm25_search_truncates_and_breaks_ties_by_doc_id() {
    let tk = tokenizer();
    let index = InvertedIndex::build(
        vec![
            doc(4, "Heist", "heist"),
            doc(2, "Heist", "heist"),
            doc(9, "Heist", "heist"),
        ],
        &tk,
    );
    let scorer = Scorer::new(&index, &tk, Bm25Params::default());

    let all = scorer.bm25_search("heist", 10);
    // Equal scores order by ascending doc id.
    let ids: Vec<DocId> = all.iter().map(|&(id, _)| id).collect();
    assert_eq!(ids, vec![2, 4, 9]);

    let limited = scorer.bm25_search("heist", 2);
    assert_eq!(limited.len(), 2);
    assert_eq!(limited, all[..2]);
}

#[test]
fn empty_index_degenerates_to_zero_scores() {
    let tk = tokenizer();
    let index = InvertedIndex::new();
    let scorer = Scorer::new(&index, &tk, Bm25Params::default());

    assert!(scorer.bm25_search("anything", 5).is_empty());
    assert_eq!(
        scorer.get_bm25_tf(1, "anything", Bm25Params::default()).unwrap(),
        0.0
    );
    assert_eq!(scorer.bm25(1, "anything").unwrap(), 0.0);
    // N = 0, df = 0: ln((N + 1) / (df + 1)) = 0.
    assert_eq!(scorer.get_idf("anything").unwrap(), 0.0);
}

#[test]
fn bm25_tf_saturates_with_k1() {
    let tk = tokenizer();
    let index = InvertedIndex::build(
        vec![doc(1, "Run", "run run run run run run"), doc(2, "Walk", "walk walk run")],
        &tk,
    );
    let scorer = Scorer::new(&index, &tk, Bm25Params::default());

    let params = Bm25Params::default();
    let heavy = scorer.get_bm25_tf(1, "run", params).unwrap();
    let light = scorer.get_bm25_tf(2, "run", params).unwrap();
    assert!(heavy > light);
    // The component is bounded by k1 + 1 regardless of raw frequency.
    assert!(heavy < params.k1 + 1.0);
}
