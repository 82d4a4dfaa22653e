use crate::cli::SubstituteArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use mol2swap::engine::config as core_config;
use mol2swap::engine::error::EngineError;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialSubstitutionSection {
    from: Option<String>,
    to: Option<String>,
    combination_sizes: Option<Vec<usize>>,
    max_variants: Option<usize>,
    parallel: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialOutputSection {
    stem: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialSubstitutionConfig {
    substitution: Option<PartialSubstitutionSection>,
    output: Option<PartialOutputSection>,
}

/// Fully merged settings for one `substitute` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub core_config: core_config::SubstitutionConfig,
    pub output_stem: Option<String>,
}

impl PartialSubstitutionConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Merges the file settings with the command line. Flags win over `--set`
    /// values, which win over the file.
    pub fn merge_with_cli(mut self, args: &SubstituteArgs) -> Result<AppConfig> {
        self.apply_set_values(&args.set_values)?;

        let substitution = self.substitution.take().unwrap_or_default();
        let output = self.output.take().unwrap_or_default();

        let cli_sizes = if args.sizes.is_empty() {
            None
        } else {
            Some(
                parser::parse_size_specs(&args.sizes)
                    .map_err(|e| CliError::Argument(e.to_string()))?,
            )
        };

        let mut builder = core_config::SubstitutionConfigBuilder::new()
            .combination_sizes(cli_sizes.or(substitution.combination_sizes))
            .max_variants(args.max_variants.or(substitution.max_variants))
            .parallel(args.parallel || substitution.parallel.unwrap_or(false));

        if let Some(from) = args.from_type.clone().or(substitution.from) {
            builder = builder.from_type(from);
        }
        if let Some(to) = args.to_type.clone().or(substitution.to) {
            builder = builder.to_type(to);
        }

        let core_config = builder.build().map_err(EngineError::from)?;

        Ok(AppConfig {
            core_config,
            output_stem: args.stem.clone().or(output.stem),
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "substitution.from" => {
                    self.substitution_mut().from = Some(value_str.to_string());
                }
                "substitution.to" => {
                    self.substitution_mut().to = Some(value_str.to_string());
                }
                "substitution.combination-sizes" => {
                    self.substitution_mut().combination_sizes = Some(
                        parser::parse_size_spec(value_str).map_err(|e| {
                            CliError::Config(format!("Invalid value for {}: {}", key, e))
                        })?,
                    );
                }
                "substitution.max-variants" => {
                    self.substitution_mut().max_variants =
                        Some(value_str.parse().map_err(|_| {
                            CliError::Config(format!(
                                "Invalid integer value for {}: {}",
                                key, value_str
                            ))
                        })?);
                }
                "substitution.parallel" => {
                    self.substitution_mut().parallel = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid boolean value for {}: {}",
                            key, value_str
                        ))
                    })?);
                }
                "output.stem" => {
                    self.output.get_or_insert_with(Default::default).stem =
                        Some(value_str.to_string());
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }

    fn substitution_mut(&mut self) -> &mut PartialSubstitutionSection {
        self.substitution.get_or_insert_with(Default::default)
    }
}
