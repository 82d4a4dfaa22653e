//! # Core Models Module
//!
//! Data structures for the ATOM section of a Tripos MOL2 file.
//!
//! - [`atom`] - A single ATOM record and the [`atom::AtomName`] decomposition of its
//!   `string_id` column into a chemical type and a type-local index
//! - [`table`] - The id-ordered [`table::AtomTable`] and the atom-type substitution
//!   that keeps type-local numbering gap-free
//!
//! ```ignore
//! use mol2swap::core::models::table::AtomTable;
//!
//! let mut table = AtomTable::from_section_lines(&lines)?;
//! table.substitute(3, "F")?;
//! assert!(table.check_local_indices().is_ok());
//! ```

pub mod atom;
pub mod table;
