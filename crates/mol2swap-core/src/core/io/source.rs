use crate::core::io::mol2::{Mol2Document, Mol2Error};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Ligand '{id}' not found (searched: {searched:?})")]
    NotFound { id: String, searched: Vec<PathBuf> },
    #[error("Failed to read ligand '{id}': {source}")]
    Io {
        id: String,
        #[source]
        source: io::Error,
    },
    #[error("Ligand '{id}' is not a valid MOL2 file: {source}")]
    Parse {
        id: String,
        #[source]
        source: Mol2Error,
    },
}

/// Supplies raw MOL2 text for a chemical component identifier.
///
/// Retrying transient failures is the implementor's concern.
pub trait LigandSource {
    fn fetch(&self, ligand_id: &str) -> Result<String, SourceError>;

    /// Fetches and parses a ligand.
    fn fetch_document(&self, ligand_id: &str) -> Result<Mol2Document, SourceError> {
        let text = self.fetch(ligand_id)?;
        text.parse().map_err(|source| SourceError::Parse {
            id: ligand_id.to_string(),
            source,
        })
    }
}

/// A ligand source backed by a local directory of downloaded MOL2 files.
///
/// For an id `ATP` the files `ATP_ideal.mol2` and `ATP.mol2` are tried in
/// that order.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn candidates(&self, ligand_id: &str) -> [PathBuf; 2] {
        [
            self.root.join(format!("{}_ideal.mol2", ligand_id)),
            self.root.join(format!("{}.mol2", ligand_id)),
        ]
    }

    /// The first existing candidate file for `ligand_id`, if any.
    pub fn locate(&self, ligand_id: &str) -> Option<PathBuf> {
        self.candidates(ligand_id)
            .into_iter()
            .find(|path| path.is_file())
    }
}

impl LigandSource for DirectorySource {
    fn fetch(&self, ligand_id: &str) -> Result<String, SourceError> {
        let path = self
            .locate(ligand_id)
            .ok_or_else(|| SourceError::NotFound {
                id: ligand_id.to_string(),
                searched: self.candidates(ligand_id).to_vec(),
            })?;
        fs::read_to_string(&path).map_err(|source| SourceError::Io {
            id: ligand_id.to_string(),
            source,
        })
    }
}
