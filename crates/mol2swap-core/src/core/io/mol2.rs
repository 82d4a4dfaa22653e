use crate::core::io::traits::MolecularFile;
use crate::core::models::table::{AtomTable, TableError};
use phf::{Map, phf_map};
use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

const TRIPOS_MARKER_PREFIX: &str = "@<TRIPOS>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Molecule,
    Atom,
    Bond,
    Unsupported,
}

static SECTION_MARKERS: Map<&'static str, Section> = phf_map! {
    "@<TRIPOS>MOLECULE" => Section::Molecule,
    "@<TRIPOS>ATOM" => Section::Atom,
    "@<TRIPOS>BOND" => Section::Bond,
};

fn section_of(line: &str) -> Option<Section> {
    if !line.starts_with(TRIPOS_MARKER_PREFIX) {
        return None;
    }
    let marker = line.split_whitespace().next().unwrap_or_default();
    Some(
        SECTION_MARKERS
            .get(marker)
            .copied()
            .unwrap_or(Section::Unsupported),
    )
}

#[derive(Debug, Error)]
pub enum Mol2Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid ATOM section: {0}")]
    Table(#[from] TableError),
}

/// A MOL2 file reduced to the three sections this crate understands.
///
/// The MOLECULE and BOND sections are carried as opaque text, marker line
/// and line endings included. Bond records still name atoms by id and are
/// never rewritten, even after substitutions change atom names. Any other
/// `@<TRIPOS>` section is dropped on read and therefore absent on write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mol2Document {
    pub header: String,
    pub atoms: AtomTable,
    pub bonds: String,
}

impl Mol2Document {
    /// Returns a copy of this document with its atom section replaced.
    pub fn with_atoms(&self, atoms: AtomTable) -> Self {
        Self {
            header: self.header.clone(),
            atoms,
            bonds: self.bonds.clone(),
        }
    }

    pub fn to_mol2_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Mol2Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header)?;
        write!(f, "{}", self.atoms)?;
        f.write_str(&self.bonds)
    }
}

impl FromStr for Mol2Document {
    type Err = Mol2Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mol2File::read_from(&mut s.as_bytes())
    }
}

pub struct Mol2File;

impl MolecularFile for Mol2File {
    type Document = Mol2Document;
    type Error = Mol2Error;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Document, Self::Error> {
        let mut current: Option<Section> = None;
        let mut header = String::new();
        let mut atom_lines: Vec<String> = Vec::new();
        let mut bonds = String::new();

        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            if let Some(section) = section_of(&line) {
                current = Some(section);
            }

            match current {
                Some(Section::Molecule) => header.push_str(&line),
                Some(Section::Atom) => {
                    atom_lines.push(line.trim_end_matches(['\r', '\n']).to_string())
                }
                Some(Section::Bond) => bonds.push_str(&line),
                Some(Section::Unsupported) | None => {}
            }
        }

        let atoms = AtomTable::from_section_lines(&atom_lines)?;
        Ok(Mol2Document {
            header,
            atoms,
            bonds,
        })
    }

    fn write_to(document: &Self::Document, writer: &mut impl Write) -> Result<(), Self::Error> {
        write!(writer, "{}", document)?;
        Ok(())
    }
}
