//! Provides input/output functionality for the Tripos MOL2 format.
//!
//! The [`mol2`] module parses and writes MOL2 documents through the
//! [`traits::MolecularFile`] interface. The [`source`] and [`sink`] modules
//! define the seams through which ligands enter and generated structures
//! leave a workflow, together with directory-backed implementations.

pub mod mol2;
pub mod sink;
pub mod source;
pub mod traits;
