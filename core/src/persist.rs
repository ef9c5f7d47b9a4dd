//! Index persistence.
//!
//! The four tables are written as four named artifacts under one root
//! directory and loaded back as one unit: `postings.bin`,
//! `term_frequencies.bin`, and `doc_lengths.bin` are bincode, while
//! `docmap.json` is JSON because documents carry flattened opaque fields.
//! Every artifact is wrapped in a versioned envelope.

use crate::error::{EngineError, Result};
use crate::index::InvertedIndex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Bumped whenever the artifact layout changes incompatibly.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct ArtifactRef<'a, T> {
    version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct Artifact<T> {
    version: u32,
    data: T,
}

/// Durable storage for an index under a configured root directory.
pub struct IndexStore {
    root: PathBuf,
}

impl IndexStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    fn postings_path(&self) -> PathBuf {
        self.root.join("postings.bin")
    }

    fn term_frequencies_path(&self) -> PathBuf {
        self.root.join("term_frequencies.bin")
    }

    fn doc_lengths_path(&self) -> PathBuf {
        self.root.join("doc_lengths.bin")
    }

    fn docmap_path(&self) -> PathBuf {
        self.root.join("docmap.json")
    }

    /// Writes all four artifacts, creating the root directory if absent.
    pub fn save(&self, index: &InvertedIndex) -> Result<()> {
        create_dir_all(&self.root)?;
        self.write_bin(&self.postings_path(), &index.postings)?;
        self.write_bin(&self.term_frequencies_path(), &index.term_frequencies)?;
        self.write_bin(&self.doc_lengths_path(), &index.doc_lengths)?;
        self.write_json(&self.docmap_path(), &index.docmap)?;
        tracing::info!(
            root = %self.root.display(),
            num_docs = index.doc_count(),
            "saved index"
        );
        Ok(())
    }

    /// Reads all four artifacts back into a fresh index.
    ///
    /// Existence of every artifact is checked before any is read, so a
    /// missing file fails with [`EngineError::MissingArtifact`] naming it
    /// and nothing is partially loaded. The caller's own index is never
    /// touched; on success a new value is returned wholesale.
    pub fn load(&self) -> Result<InvertedIndex> {
        for path in [
            self.postings_path(),
            self.term_frequencies_path(),
            self.doc_lengths_path(),
            self.docmap_path(),
        ] {
            if !path.exists() {
                return Err(EngineError::MissingArtifact(path));
            }
        }

        let index = InvertedIndex {
            postings: self.read_bin(&self.postings_path())?,
            term_frequencies: self.read_bin(&self.term_frequencies_path())?,
            doc_lengths: self.read_bin(&self.doc_lengths_path())?,
            docmap: self.read_json(&self.docmap_path())?,
        };
        tracing::info!(
            root = %self.root.display(),
            num_docs = index.doc_count(),
            "loaded index"
        );
        Ok(index)
    }

    fn write_bin<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let bytes = bincode::serialize(&ArtifactRef { version: FORMAT_VERSION, data })?;
        let mut file = File::create(path)?;
        file.write_all(&bytes)?;
        Ok(())
    }

    fn read_bin<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let mut buf = Vec::new();
        File::open(path)?.read_to_end(&mut buf)?;
        let artifact: Artifact<T> = bincode::deserialize(&buf)?;
        self.check_version(path, artifact.version)?;
        Ok(artifact.data)
    }

    fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(&ArtifactRef { version: FORMAT_VERSION, data })?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let mut buf = String::new();
        File::open(path)?.read_to_string(&mut buf)?;
        let artifact: Artifact<T> = serde_json::from_str(&buf)?;
        self.check_version(path, artifact.version)?;
        Ok(artifact.data)
    }

    fn check_version(&self, path: &Path, found: u32) -> Result<()> {
        if found != FORMAT_VERSION {
            return Err(EngineError::VersionMismatch {
                path: path.to_path_buf(),
                found,
                expected: FORMAT_VERSION,
            });
        }
        Ok(())
    }
}
