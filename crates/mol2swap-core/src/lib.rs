//! # mol2swap Core Library
//!
//! Reads and writes the ATOM section of Tripos MOL2 files and generates variant
//! molecules by swapping one chemical type for another across every subset of
//! matching atoms.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** The [`core::models::atom::Atom`] record, the
//!   id-ordered [`core::models::table::AtomTable`] with its type-local renumbering
//!   substitution, and MOL2 document I/O.
//!
//! - **[`engine`]: The Enumeration.** The lazy [`engine::variants::VariantGenerator`],
//!   run configuration, progress reporting and the aggregate error type.
//!
//! - **[`workflows`]: The Public API.** End-to-end runs that turn a document into a
//!   stream of serialized variants for a consumer.
//!
//! ```ignore
//! use mol2swap::core::io::{mol2::Mol2File, sink::DirectorySink, traits::MolecularFile};
//! use mol2swap::engine::{config::SubstitutionConfigBuilder, progress::ProgressReporter};
//! use mol2swap::workflows;
//!
//! let document = Mol2File::read_from_path("ligand.mol2")?;
//! let config = SubstitutionConfigBuilder::new().from_type("H").to_type("F").build()?;
//! let mut sink = DirectorySink::new("out", "ligand");
//! workflows::substitute::run(&document, &config, &mut sink, &ProgressReporter::new())?;
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
