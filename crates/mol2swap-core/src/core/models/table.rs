use super::atom::{Atom, AtomParseError};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use thiserror::Error;

/// The marker line that opens the ATOM section of a MOL2 file.
pub const ATOM_SECTION_MARKER: &str = "@<TRIPOS>ATOM";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Malformed ATOM record on section line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: AtomParseError,
    },
    #[error("Duplicate atom id: {0}")]
    DuplicateId(usize),
    #[error("Unknown atom id: {0}")]
    UnknownAtomId(usize),
    #[error(
        "Inconsistent local index for atom {atom_id} of type '{chemical_type}': expected {expected}, found {found}"
    )]
    InconsistentLocalIndex {
        atom_id: usize,
        chemical_type: String,
        expected: usize,
        found: usize,
    },
}

/// The atoms of one MOL2 document, ordered by ascending id.
///
/// Within a consistent table every chemical type `T` numbers its atoms
/// `T1..Tn` in id order. [`AtomTable::substitute`] keeps that numbering
/// intact for both the replaced and the inserted type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomTable {
    atoms: BTreeMap<usize, Atom>,
}

impl AtomTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from the raw lines of an ATOM section.
    ///
    /// The first line is the section marker and is skipped. Blank lines are
    /// ignored. Line numbers in errors are 1-based positions within `lines`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Record`] for a malformed record and
    /// [`TableError::DuplicateId`] if two records share an id. No partial
    /// table is returned.
    pub fn from_section_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, TableError> {
        let mut table = Self::new();
        for (offset, raw) in lines.iter().enumerate().skip(1) {
            let raw = raw.as_ref();
            if raw.trim().is_empty() {
                continue;
            }
            let atom = Atom::from_record(raw).map_err(|source| TableError::Record {
                line: offset + 1,
                source,
            })?;
            table.insert(atom)?;
        }
        Ok(table)
    }

    /// Adds an atom, rejecting ids that are already present.
    pub fn insert(&mut self, atom: Atom) -> Result<(), TableError> {
        match self.atoms.entry(atom.id) {
            Entry::Occupied(_) => Err(TableError::DuplicateId(atom.id)),
            Entry::Vacant(slot) => {
                slot.insert(atom);
                Ok(())
            }
        }
    }

    pub fn get(&self, id: usize) -> Option<&Atom> {
        self.atoms.get(&id)
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Iterates atoms in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.values()
    }

    /// Ids of all atoms of `chemical_type`, ascending.
    pub fn ids_of_type(&self, chemical_type: &str) -> Vec<usize> {
        self.atoms
            .values()
            .filter(|atom| atom.chemical_type() == chemical_type)
            .map(|atom| atom.id)
            .collect()
    }

    pub fn type_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for atom in self.atoms.values() {
            *counts.entry(atom.chemical_type().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Verifies that every chemical type is numbered `1..=count` in id order.
    ///
    /// # Errors
    ///
    /// Returns the first [`TableError::InconsistentLocalIndex`] encountered.
    pub fn check_local_indices(&self) -> Result<(), TableError> {
        let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
        for atom in self.atoms.values() {
            let expected = seen.entry(atom.chemical_type()).or_insert(0);
            *expected += 1;
            if atom.type_local_index() != *expected {
                return Err(TableError::InconsistentLocalIndex {
                    atom_id: atom.id,
                    chemical_type: atom.chemical_type().to_string(),
                    expected: *expected,
                    found: atom.type_local_index(),
                });
            }
        }
        Ok(())
    }

    /// Changes the chemical type of one atom and renumbers its neighbours.
    ///
    /// The atom takes the local index its id occupies among atoms already of
    /// `new_type`. Later atoms of the old type shift down by one and later
    /// atoms of the new type shift up by one. Both the `string_id` and the
    /// atom type columns report `new_type` afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownAtomId`] without touching the table if
    /// `atom_id` is absent.
    pub fn substitute(&mut self, atom_id: usize, new_type: &str) -> Result<(), TableError> {
        let old_type = self
            .atoms
            .get(&atom_id)
            .map(|atom| atom.chemical_type().to_string())
            .ok_or(TableError::UnknownAtomId(atom_id))?;
        self.retype(atom_id, &old_type, new_type);
        Ok(())
    }

    /// Single ordered pass behind [`substitute`](Self::substitute).
    ///
    /// `old_type` must be the current type of `atom_id`. An absent id leaves
    /// the table unchanged.
    pub(crate) fn retype(&mut self, atom_id: usize, old_type: &str, new_type: &str) {
        // Same-type retyping would decrement and increment the same atoms.
        let shifts = old_type != new_type;
        let mut new_local_index = 1;

        for (&id, atom) in self.atoms.iter_mut() {
            match id.cmp(&atom_id) {
                Ordering::Less => {
                    if atom.chemical_type() == new_type {
                        new_local_index += 1;
                    }
                }
                Ordering::Equal => {
                    atom.name.chemical_type = new_type.to_string();
                    atom.name.type_local_index = new_local_index;
                    atom.atom_type = new_type.to_string();
                }
                Ordering::Greater if shifts => {
                    if atom.chemical_type() == old_type {
                        atom.name.type_local_index = atom.type_local_index().saturating_sub(1);
                    } else if atom.chemical_type() == new_type {
                        atom.name.type_local_index += 1;
                    }
                }
                Ordering::Greater => {}
            }
        }
    }
}

impl fmt::Display for AtomTable {
    /// Writes the marker line followed by one record per atom, each ending in
    /// a newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", ATOM_SECTION_MARKER)?;
        for atom in self.atoms.values() {
            writeln!(f, "{}", atom)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a AtomTable {
    type Item = &'a Atom;
    type IntoIter = std::collections::btree_map::Values<'a, usize, Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.values()
    }
}
