use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A ranked hit from the embedding-based collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticHit {
    pub title: String,
    pub description: String,
    pub score: f64,
}

/// Contract for the embedding-based semantic search collaborator.
///
/// The keyword engine does not depend on an implementation; this trait
/// exists so the layer above can expose either engine behind the same
/// query surface.
pub trait SemanticSearch {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<SemanticHit>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned(Vec<SemanticHit>);

    impl SemanticSearch for Canned {
        fn search(&self, _query: &str, limit: usize) -> Result<Vec<SemanticHit>> {
            Ok(self.0.iter().take(limit).cloned().collect())
        }
    }

    #[test]
    fn collaborator_respects_limit() {
        let hits = vec![
            SemanticHit { title: "A".into(), description: "a".into(), score: 0.9 },
            SemanticHit { title: "B".into(), description: "b".into(), score: 0.5 },
        ];
        let engine = Canned(hits);
        assert_eq!(engine.search("anything", 1).unwrap().len(), 1);
    }
}
