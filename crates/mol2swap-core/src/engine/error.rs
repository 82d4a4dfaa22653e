use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::mol2::Mol2Error;
use crate::core::io::sink::SinkError;
use crate::core::io::source::SourceError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("MOL2 document error: {0}")]
    Document(#[from] Mol2Error),

    #[error("Ligand source error: {0}")]
    Source(#[from] SourceError),

    #[error("Structure consumer error: {0}")]
    Sink(#[from] SinkError),
}
