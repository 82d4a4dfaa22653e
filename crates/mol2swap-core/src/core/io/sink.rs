use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to write structure {index} to '{path}': {source}", path = path.display())]
    Io {
        index: usize,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Receives each generated structure as serialized MOL2 text.
///
/// `index` is the sequential position of the structure in the generated
/// sequence, starting at zero.
pub trait StructureConsumer {
    fn consume(&mut self, index: usize, mol2: &str) -> Result<(), SinkError>;
}

impl<C: StructureConsumer + ?Sized> StructureConsumer for &mut C {
    fn consume(&mut self, index: usize, mol2: &str) -> Result<(), SinkError> {
        (**self).consume(index, mol2)
    }
}

impl StructureConsumer for Vec<(usize, String)> {
    fn consume(&mut self, index: usize, mol2: &str) -> Result<(), SinkError> {
        self.push((index, mol2.to_string()));
        Ok(())
    }
}

/// Writes every structure to `<dir>/<stem>_<index>.mol2`.
///
/// The directory is created on the first write.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    stem: String,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            stem: stem.into(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}_{}.mol2", self.stem, index))
    }

    /// Paths written so far, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl StructureConsumer for DirectorySink {
    fn consume(&mut self, index: usize, mol2: &str) -> Result<(), SinkError> {
        let path = self.path_for(index);
        let io_error = |source| SinkError::Io {
            index,
            path: path.clone(),
            source,
        };

        if self.written.is_empty() {
            fs::create_dir_all(&self.dir).map_err(io_error)?;
        }
        fs::write(&path, mol2).map_err(io_error)?;
        self.written.push(path);
        Ok(())
    }
}
