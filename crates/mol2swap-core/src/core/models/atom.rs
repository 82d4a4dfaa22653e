use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Minimum number of whitespace-separated columns in a Tripos ATOM record.
pub const MIN_ATOM_FIELDS: usize = 9;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AtomParseError {
    #[error("ATOM record has {found} fields, at least {} are required", MIN_ATOM_FIELDS)]
    TooFewFields { found: usize },
    #[error("Invalid atom id '{0}'")]
    InvalidId(String),
    #[error("Malformed atom identifier '{0}' (expected a type prefix and a numeric suffix)")]
    MalformedName(String),
}

/// The structured form of the `string_id` column of an ATOM record.
///
/// A name such as `C12` splits into the chemical type `C` and the 1-based rank
/// `12` of the atom among all atoms of that type. The type is made of ASCII
/// letters and dots and starts with a letter, so dotted types such as `N.ar`
/// are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AtomName {
    /// Element or type label (e.g. "C", "Cl", "N.ar").
    pub chemical_type: String,
    /// 1-based rank among atoms sharing `chemical_type`, ordered by atom id.
    pub type_local_index: usize,
}

impl AtomName {
    pub fn new(chemical_type: impl Into<String>, type_local_index: usize) -> Self {
        Self {
            chemical_type: chemical_type.into(),
            type_local_index,
        }
    }

    /// Whether `chemical_type` composes into a name that parses back to itself.
    pub fn is_valid_type(chemical_type: &str) -> bool {
        chemical_type.starts_with(|c: char| c.is_ascii_alphabetic())
            && chemical_type
                .chars()
                .all(|c| c.is_ascii_alphabetic() || c == '.')
    }
}

impl FromStr for AtomName {
    type Err = AtomParseError;

    /// Splits an identifier into its type prefix and trailing numeric suffix.
    ///
    /// # Errors
    ///
    /// Returns [`AtomParseError::MalformedName`] if the suffix is missing or
    /// unparsable, or if the prefix is not a valid chemical type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || AtomParseError::MalformedName(s.to_string());

        let prefix = s.trim_end_matches(|c: char| c.is_ascii_digit());
        let suffix = &s[prefix.len()..];

        if suffix.is_empty() || !Self::is_valid_type(prefix) {
            return Err(malformed());
        }
        let type_local_index = suffix.parse::<usize>().map_err(|_| malformed())?;

        Ok(Self::new(prefix, type_local_index))
    }
}

impl fmt::Display for AtomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.chemical_type, self.type_local_index)
    }
}

/// A single record of the `@<TRIPOS>ATOM` section.
///
/// Coordinates and the trailing columns are carried as the original text so
/// that writing a record back never introduces float formatting drift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    /// The atom id, unique within a document and never renumbered.
    pub id: usize,
    /// The structured `string_id` column.
    pub name: AtomName,
    pub x: String,
    pub y: String,
    pub z: String,
    /// The Tripos atom type column.
    pub atom_type: String,
    /// The substructure id column.
    pub subst_id: String,
    /// The substructure (molecule) name column.
    pub subst_name: String,
    /// The partial charge column.
    pub charge: String,
}

impl Atom {
    /// Parses one whitespace-delimited ATOM record.
    ///
    /// Columns past the ninth are ignored.
    pub fn from_record(line: &str) -> Result<Self, AtomParseError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < MIN_ATOM_FIELDS {
            return Err(AtomParseError::TooFewFields {
                found: fields.len(),
            });
        }

        let id = fields[0]
            .parse::<usize>()
            .map_err(|_| AtomParseError::InvalidId(fields[0].to_string()))?;
        let name = fields[1].parse::<AtomName>()?;

        Ok(Self {
            id,
            name,
            x: fields[2].to_string(),
            y: fields[3].to_string(),
            z: fields[4].to_string(),
            atom_type: fields[5].to_string(),
            subst_id: fields[6].to_string(),
            subst_name: fields[7].to_string(),
            charge: fields[8].to_string(),
        })
    }

    pub fn chemical_type(&self) -> &str {
        &self.name.chemical_type
    }

    pub fn type_local_index(&self) -> usize {
        self.name.type_local_index
    }

    /// The `string_id` column as written to disk (e.g. "C12").
    pub fn string_id(&self) -> String {
        self.name.to_string()
    }
}

impl fmt::Display for Atom {
    /// Writes the record in fixed-width, right-justified columns without a
    /// trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>8} {:>6} {:>12} {:>12} {:>12} {:>8} {:>3} {:>16} {:>10}",
            self.id,
            self.string_id(),
            self.x,
            self.y,
            self.z,
            self.atom_type,
            self.subst_id,
            self.subst_name,
            self.charge
        )
    }
}
