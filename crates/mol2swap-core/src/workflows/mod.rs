//! # Workflows Module
//!
//! High-level entry points that tie the [`crate::core`] document model and the
//! [`crate::engine`] variant enumeration into complete runs.
//!
//! - **Substitution Workflow** ([`substitute`]) - Generates every requested
//!   substitution variant of a MOL2 document and hands each serialized result to
//!   a [`crate::core::io::sink::StructureConsumer`], reporting progress as it goes.

pub mod substitute;
