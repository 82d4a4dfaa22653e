//! # Core Module
//!
//! The stateless foundation of mol2swap: the atom models and the MOL2 file I/O.
//!
//! - **Molecular Representation** ([`models`]) - Atoms, atom names, and the atom table
//!   with its substitution algorithm
//! - **File I/O** ([`io`]) - MOL2 document parsing and serialization, plus the
//!   ligand source and structure consumer seams used by the workflows
//!
//! Nothing in this module logs. Every failure is returned as a typed error.

pub mod io;
pub mod models;
