use crate::cli::SubstituteArgs;
use crate::config::PartialSubstitutionConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use mol2swap::{
    core::io::{
        mol2::{Mol2Document, Mol2File},
        sink::DirectorySink,
        source::{DirectorySource, LigandSource},
        traits::MolecularFile,
    },
    engine::{error::EngineError, progress::ProgressReporter},
    workflows,
};
use tracing::{info, warn};

pub fn run(args: SubstituteArgs) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialSubstitutionConfig::from_file(path)?,
        None => PartialSubstitutionConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let final_config = partial_config.merge_with_cli(&args)?;

    let (document, default_stem) = load_input(&args)?;
    let stem = final_config.output_stem.unwrap_or(default_stem);

    let mut sink = DirectorySink::new(&args.output, stem);
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Substituting '{}' with '{}'...",
        final_config.core_config.from_type, final_config.core_config.to_type
    );
    info!("Invoking the core substitution workflow...");

    let summary =
        workflows::substitute::run(&document, &final_config.core_config, &mut sink, &reporter)?;

    if summary.matching_atoms == 0 {
        warn!(
            "No atoms of type '{}' found in the input.",
            final_config.core_config.from_type
        );
        println!(
            "Warning: the input has no atoms of type '{}'. Nothing was written.",
            final_config.core_config.from_type
        );
    } else {
        println!(
            "✓ {} of {} variant(s) written to: {}",
            summary.written,
            summary.expected_variants,
            sink.dir().display()
        );
    }

    Ok(())
}

/// Loads the input document and the stem its variants are named after.
fn load_input(args: &SubstituteArgs) -> Result<(Mol2Document, String)> {
    if let Some(path) = &args.input {
        info!("Loading input structure from {:?}", path);
        let document = Mol2File::read_from_path(path).map_err(EngineError::from)?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "variant".to_string());
        return Ok((document, stem));
    }

    match (&args.ligand, &args.ligand_dir) {
        (Some(ligand_id), Some(dir)) => {
            info!("Loading ligand '{}' from {:?}", ligand_id, dir);
            let source = DirectorySource::new(dir);
            let document = source
                .fetch_document(ligand_id)
                .map_err(EngineError::from)?;
            Ok((document, ligand_id.clone()))
        }
        _ => Err(CliError::Argument(
            "Either --input or --ligand with --ligand-dir is required.".to_string(),
        )),
    }
}
