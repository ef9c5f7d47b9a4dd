use anyhow::{Context, Result};
use cinesearch_core::{
    Bm25Params, DocId, Document, IndexStore, InvertedIndex, Scorer, Tokenizer,
    DEFAULT_SEARCH_LIMIT,
};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Deserialize)]
struct MovieFile {
    movies: Vec<Document>,
}

#[derive(Parser)]
#[command(name = "cinesearch")]
#[command(about = "Keyword search over a movie corpus", long_about = None)]
struct Cli {
    /// Corpus JSON file of shape {"movies": [...]}
    #[arg(long, default_value = "data/movies.json")]
    movies: PathBuf,

    /// Newline-delimited stopword file
    #[arg(long, default_value = "data/stopwords.txt")]
    stopwords: PathBuf,

    /// Directory holding the persisted index artifacts
    #[arg(long, default_value = ".cache/index")]
    index_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the inverted index from the corpus and save it to disk
    Build,
    /// Search the saved index with the non-ranked boolean scan
    Search {
        query: String,
    },
    /// Simple title-contains-word scan over the raw corpus
    SearchKeyword {
        query: String,
    },
    /// Term frequency of a term in one document
    Tf {
        doc_id: DocId,
        term: String,
    },
    /// Inverse document frequency of a term
    Idf {
        term: String,
    },
    /// TF-IDF score of a term in one document
    Tfidf {
        doc_id: DocId,
        term: String,
    },
    /// BM25 term-frequency component, with optional k1/b overrides
    Bm25Tf {
        doc_id: DocId,
        term: String,
        k1: Option<f64>,
        b: Option<f64>,
    },
    /// BM25 inverse document frequency of a term
    Bm25Idf {
        term: String,
    },
    /// Ranked BM25 search over the saved index
    Bm25Search {
        query: String,
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let tokenizer = Tokenizer::new(load_stopwords(&cli.stopwords)?);
    let store = IndexStore::new(&cli.index_dir);

    match cli.command {
        Commands::Build => {
            let movies = load_movies(&cli.movies)?;
            println!("Building indexes...");
            let index = InvertedIndex::build(movies, &tokenizer);
            println!("Saving to disk...");
            store.save(&index).context("failed to save index")?;
        }

        Commands::Search { query } => {
            let index = load_index(&store)?;
            let tokens = tokenizer.normalize(&query);
            let matches = index.search(&tokens, DEFAULT_SEARCH_LIMIT);
            println!("Searching for: {query}");
            if matches.is_empty() {
                println!("No results found for: {query}");
            } else {
                for (n, doc) in matches.iter().enumerate() {
                    println!("{}. {} {}", n + 1, doc.id, doc.title);
                }
            }
        }

        Commands::SearchKeyword { query } => {
            let movies = load_movies(&cli.movies)?;
            println!("Searching for: {query}");
            let results = search_title(&movies, &query, &tokenizer);
            for (n, doc) in results.iter().take(DEFAULT_SEARCH_LIMIT).enumerate() {
                println!("{}. {}", n + 1, doc.title);
            }
        }

        Commands::Tf { doc_id, term } => {
            let index = load_index(&store)?;
            let scorer = Scorer::new(&index, &tokenizer, Bm25Params::default());
            let tf = scorer.get_tf(doc_id, &term)?;
            println!("Term frequency for term {term} in document {doc_id}: {tf}");
        }

        Commands::Idf { term } => {
            let index = load_index(&store)?;
            let scorer = Scorer::new(&index, &tokenizer, Bm25Params::default());
            let idf = scorer.get_idf(&term)?;
            println!("Inverse document frequency of {term}: {idf:.2}");
        }

        Commands::Tfidf { doc_id, term } => {
            let index = load_index(&store)?;
            let scorer = Scorer::new(&index, &tokenizer, Bm25Params::default());
            let tf_idf = scorer.tf_idf(doc_id, &term)?;
            println!("TF-IDF score of {term} in document {doc_id}: {tf_idf:.2}");
        }

        Commands::Bm25Tf { doc_id, term, k1, b } => {
            let index = load_index(&store)?;
            let defaults = Bm25Params::default();
            let params = Bm25Params {
                k1: k1.unwrap_or(defaults.k1),
                b: b.unwrap_or(defaults.b),
            };
            let scorer = Scorer::new(&index, &tokenizer, params);
            let bm25_tf = scorer.get_bm25_tf(doc_id, &term, params)?;
            println!("BM25 TF score of {term} in document {doc_id}: {bm25_tf:.2}");
        }

        Commands::Bm25Idf { term } => {
            let index = load_index(&store)?;
            let scorer = Scorer::new(&index, &tokenizer, Bm25Params::default());
            let bm25_idf = scorer.get_bm25_idf(&term)?;
            println!("BM25 IDF score of {term}: {bm25_idf:.2}");
        }

        Commands::Bm25Search { query, limit } => {
            let index = load_index(&store)?;
            let scorer = Scorer::new(&index, &tokenizer, Bm25Params::default());
            for (n, (doc_id, score)) in scorer.bm25_search(&query, limit).into_iter().enumerate() {
                let title = index
                    .docmap
                    .get(&doc_id)
                    .map_or("<unknown>", |doc| doc.title.as_str());
                println!("{}. ({doc_id}) {title} - Score: {score:.2}", n + 1);
            }
        }
    }

    Ok(())
}

fn load_index(store: &IndexStore) -> Result<InvertedIndex> {
    store
        .load()
        .context("failed to load index (run `cinesearch build` first)")
}

fn load_stopwords(path: &Path) -> Result<HashSet<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read stopword file {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.to_lowercase())
        .collect())
}

fn load_movies(path: &Path) -> Result<Vec<Document>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open corpus file {}", path.display()))?;
    let parsed: MovieFile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse corpus file {}", path.display()))?;
    tracing::info!(num_docs = parsed.movies.len(), "loaded corpus");
    Ok(parsed.movies)
}

/// The trivial substring-style search: a movie matches when any query token
/// appears among its normalized title tokens. Results sort by id.
fn search_title<'a>(
    movies: &'a [Document],
    query: &str,
    tokenizer: &Tokenizer,
) -> Vec<&'a Document> {
    let query_tokens = tokenizer.normalize(query);
    let mut results: Vec<&Document> = movies
        .iter()
        .filter(|movie| {
            let title_tokens = tokenizer.normalize(&movie.title);
            query_tokens.iter().any(|q| title_tokens.contains(q))
        })
        .collect();
    results.sort_by_key(|movie| movie.id);
    results
}
