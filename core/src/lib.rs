pub mod config;
pub mod error;
pub mod index;
pub mod persist;
pub mod score;
pub mod semantic;
pub mod tokenizer;

pub use config::{Bm25Params, BM25_B, BM25_K1, DEFAULT_SEARCH_LIMIT};
pub use error::{EngineError, Result};
pub use index::{DocId, Document, InvertedIndex};
pub use persist::{IndexStore, FORMAT_VERSION};
pub use score::Scorer;
pub use semantic::{SemanticHit, SemanticSearch};
pub use tokenizer::Tokenizer;
