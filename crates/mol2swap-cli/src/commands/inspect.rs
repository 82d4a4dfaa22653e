use crate::cli::InspectArgs;
use crate::error::Result;
use mol2swap::core::io::{
    mol2::{Mol2Document, Mol2File},
    traits::MolecularFile,
};
use mol2swap::engine::error::EngineError;
use mol2swap::engine::variants::VariantGenerator;
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    info!("Loading input structure from {:?}", &args.input);
    let document = Mol2File::read_from_path(&args.input).map_err(EngineError::from)?;

    print!("{}", render_report(&document, args.from_type.as_deref()));
    Ok(())
}

fn render_report(document: &Mol2Document, from_type: Option<&str>) -> String {
    let atoms = &document.atoms;
    let mut report = format!("Atoms: {}\n", atoms.len());

    for (chemical_type, count) in atoms.type_counts() {
        report.push_str(&format!("  {:<8} {:>6}\n", chemical_type, count));
    }

    match atoms.check_local_indices() {
        Ok(()) => report.push_str("Numbering: consistent\n"),
        Err(e) => report.push_str(&format!("Numbering: inconsistent ({})\n", e)),
    }

    if let Some(from_type) = from_type {
        let generator = VariantGenerator::new(atoms, from_type, from_type);
        report.push_str(&format!(
            "Substituting '{}': {} atom(s), {} variant(s)\n",
            from_type,
            generator.matching_ids().len(),
            generator.expected_count()
        ));
    }

    report
}
