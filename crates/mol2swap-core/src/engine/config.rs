use crate::core::models::atom::AtomName;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid atom type for '{parameter}': '{value}'")]
    InvalidAtomType {
        parameter: &'static str,
        value: String,
    },
    #[error("max_variants must be at least 1")]
    ZeroVariantLimit,
}

/// Parameters of one substitution run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionConfig {
    /// Chemical type of the atoms to replace.
    pub from_type: String,
    /// Chemical type written in their place.
    pub to_type: String,
    /// Subset sizes to enumerate; `None` means every size from 1 to n.
    pub combination_sizes: Option<Vec<usize>>,
    /// Stop after this many variants.
    pub max_variants: Option<usize>,
    /// Build variants on the rayon pool instead of one at a time.
    pub parallel: bool,
}

#[derive(Default)]
pub struct SubstitutionConfigBuilder {
    from_type: Option<String>,
    to_type: Option<String>,
    combination_sizes: Option<Vec<usize>>,
    max_variants: Option<usize>,
    parallel: bool,
}

impl SubstitutionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_type(mut self, chemical_type: impl Into<String>) -> Self {
        self.from_type = Some(chemical_type.into());
        self
    }
    pub fn to_type(mut self, chemical_type: impl Into<String>) -> Self {
        self.to_type = Some(chemical_type.into());
        self
    }
    pub fn combination_sizes(mut self, sizes: Option<Vec<usize>>) -> Self {
        self.combination_sizes = sizes;
        self
    }
    pub fn max_variants(mut self, limit: Option<usize>) -> Self {
        self.max_variants = limit;
        self
    }
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates and assembles the configuration.
    ///
    /// Both types must compose into names that parse back unchanged, so that
    /// every generated document stays readable.
    pub fn build(self) -> Result<SubstitutionConfig, ConfigError> {
        let from_type = self
            .from_type
            .ok_or(ConfigError::MissingParameter("from_type"))?;
        let to_type = self
            .to_type
            .ok_or(ConfigError::MissingParameter("to_type"))?;

        for (parameter, value) in [("from_type", &from_type), ("to_type", &to_type)] {
            if !AtomName::is_valid_type(value) {
                return Err(ConfigError::InvalidAtomType {
                    parameter,
                    value: value.clone(),
                });
            }
        }
        if self.max_variants == Some(0) {
            return Err(ConfigError::ZeroVariantLimit);
        }

        Ok(SubstitutionConfig {
            from_type,
            to_type,
            combination_sizes: self.combination_sizes,
            max_variants: self.max_variants,
            parallel: self.parallel,
        })
    }
}
