use crate::core::io::mol2::Mol2Document;
use crate::core::io::sink::StructureConsumer;
use crate::engine::config::SubstitutionConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::variants::{Variant, VariantGenerator};
use tracing::{debug, info, instrument, warn};

/// Outcome of one substitution run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubstitutionSummary {
    /// Atoms of the source type found in the document.
    pub matching_atoms: usize,
    /// Variants the requested sizes amount to, before any limit.
    pub expected_variants: u64,
    /// Variants handed to the consumer.
    pub written: usize,
}

/// Generates every requested variant of `document` and hands each one,
/// serialized, to `consumer` with its sequential index.
///
/// Header and bond text of the input are carried unchanged into every
/// variant. A document without atoms of the source type produces no
/// variants and is not an error.
#[instrument(skip_all, name = "substitution_workflow", fields(from = %config.from_type, to = %config.to_type))]
pub fn run(
    document: &Mol2Document,
    config: &SubstitutionConfig,
    consumer: &mut impl StructureConsumer,
    reporter: &ProgressReporter,
) -> Result<SubstitutionSummary, EngineError> {
    if let Err(e) = document.atoms.check_local_indices() {
        warn!("Input atom names are not numbered consecutively per type: {}", e);
        reporter.report(Progress::Message(format!(
            "Input numbering is inconsistent: {}",
            e
        )));
    }

    let mut generator = VariantGenerator::new(&document.atoms, &config.from_type, &config.to_type);
    if let Some(sizes) = &config.combination_sizes {
        generator = generator.with_combination_sizes(sizes.iter().copied());
    }

    let matching_atoms = generator.matching_ids().len();
    let expected_variants = generator.expected_count();
    let planned = match config.max_variants {
        Some(limit) => expected_variants.min(limit as u64),
        None => expected_variants,
    };
    info!(
        "Found {} atom(s) of type '{}'; {} variant(s) requested, {} planned.",
        matching_atoms, config.from_type, expected_variants, planned
    );

    if matching_atoms == 0 {
        info!("Nothing to substitute.");
        return Ok(SubstitutionSummary {
            matching_atoms,
            expected_variants,
            written: 0,
        });
    }

    reporter.report(Progress::GenerationStart {
        total_variants: planned,
    });

    let mut written = 0;
    let mut emit = |variant: Variant| -> Result<(), EngineError> {
        debug!("Emitting variant {} (atoms {:?}).", written, variant.combination);
        let text = document.with_atoms(variant.atoms).to_mol2_string();
        consumer.consume(written, &text)?;
        reporter.report(Progress::VariantEmitted { index: written });
        written += 1;
        Ok(())
    };

    if config.parallel {
        debug!("Building variants on the rayon pool.");
        for variant in generator.generate_parallel(config.max_variants) {
            emit(variant)?;
        }
    } else {
        let limit = config.max_variants.unwrap_or(usize::MAX);
        for variant in generator.iter().take(limit) {
            emit(variant)?;
        }
    }

    reporter.report(Progress::GenerationFinish { emitted: written });
    info!("Substitution complete: {} variant(s) written.", written);

    Ok(SubstitutionSummary {
        matching_atoms,
        expected_variants,
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::sink::{DirectorySink, SinkError};
    use crate::core::models::table::tests::record;
    use crate::engine::config::SubstitutionConfigBuilder;
    use std::io;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::tempdir;

    const HEADER: &str = "@<TRIPOS>MOLECULE\nLIG\n    4     3\nSMALL\nNO_CHARGES\n\n";
    const BONDS: &str = "@<TRIPOS>BOND\n     1     1     2    1\n     2     2     3    1\n     3     3     4    1\n";

    fn document() -> Mol2Document {
        let mut text = String::from(HEADER);
        text.push_str("@<TRIPOS>ATOM\n");
        for (id, name) in [(1, "C1"), (2, "N1"), (3, "C2"), (4, "C3")] {
            text.push_str(&record(id, name));
            text.push('\n');
        }
        text.push_str(BONDS);
        text.parse().unwrap()
    }

    fn config(sizes: Option<Vec<usize>>) -> SubstitutionConfig {
        SubstitutionConfigBuilder::new()
            .from_type("C")
            .to_type("F")
            .combination_sizes(sizes)
            .build()
            .unwrap()
    }

    struct FailingConsumer;

    impl StructureConsumer for FailingConsumer {
        fn consume(&mut self, index: usize, _mol2: &str) -> Result<(), SinkError> {
            Err(SinkError::Io {
                index,
                path: PathBuf::from("full.mol2"),
                source: io::Error::other("disk full"),
            })
        }
    }

    #[test]
    fn single_substitutions_are_emitted_in_order_with_sequential_indices() {
        let doc = document();
        let mut collected: Vec<(usize, String)> = Vec::new();

        let summary = run(&doc, &config(Some(vec![1])), &mut collected, &ProgressReporter::new()).unwrap();

        assert_eq!(summary.matching_atoms, 3);
        assert_eq!(summary.expected_variants, 3);
        assert_eq!(summary.written, 3);
        assert_eq!(collected.iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![0, 1, 2]);

        let second: Mol2Document = collected[1].1.parse().unwrap();
        assert_eq!(second.header, HEADER);
        assert_eq!(second.bonds, BONDS);
        assert_eq!(second.atoms.get(3).unwrap().string_id(), "F1");
        assert_eq!(second.atoms.get(4).unwrap().string_id(), "C2");
    }

    #[test]
    fn all_sizes_produce_two_to_the_n_minus_one_documents() {
        let doc = document();
        let mut collected: Vec<(usize, String)> = Vec::new();

        let summary = run(&doc, &config(None), &mut collected, &ProgressReporter::new()).unwrap();
        assert_eq!(summary.written, 7);
        assert_eq!(collected.len(), 7);
    }

    #[test]
    fn no_matching_atoms_writes_nothing() {
        let doc = document();
        let config = SubstitutionConfigBuilder::new()
            .from_type("Br")
            .to_type("F")
            .build()
            .unwrap();
        let mut collected: Vec<(usize, String)> = Vec::new();

        let summary = run(&doc, &config, &mut collected, &ProgressReporter::new()).unwrap();
        assert_eq!(summary.matching_atoms, 0);
        assert_eq!(summary.written, 0);
        assert!(collected.is_empty());
    }

    #[test]
    fn max_variants_stops_early_in_both_modes() {
        let doc = document();
        for parallel in [false, true] {
            let config = SubstitutionConfigBuilder::new()
                .from_type("C")
                .to_type("F")
                .max_variants(Some(4))
                .parallel(parallel)
                .build()
                .unwrap();
            let mut collected: Vec<(usize, String)> = Vec::new();

            let summary = run(&doc, &config, &mut collected, &ProgressReporter::new()).unwrap();
            assert_eq!(summary.expected_variants, 7);
            assert_eq!(summary.written, 4);
        }
    }

    #[test]
    fn parallel_and_sequential_outputs_are_identical() {
        let doc = document();
        let mut sequential: Vec<(usize, String)> = Vec::new();
        let mut parallel: Vec<(usize, String)> = Vec::new();

        run(&doc, &config(None), &mut sequential, &ProgressReporter::new()).unwrap();
        let mut parallel_config = config(None);
        parallel_config.parallel = true;
        run(&doc, &parallel_config, &mut parallel, &ProgressReporter::new()).unwrap();

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn progress_events_bracket_the_emitted_variants() {
        let doc = document();
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));
        let mut collected: Vec<(usize, String)> = Vec::new();

        run(&doc, &config(Some(vec![3])), &mut collected, &reporter).unwrap();
        drop(reporter);

        assert_eq!(
            events.into_inner().unwrap(),
            vec![
                Progress::GenerationStart { total_variants: 1 },
                Progress::VariantEmitted { index: 0 },
                Progress::GenerationFinish { emitted: 1 },
            ]
        );
    }

    #[test]
    fn inconsistent_numbering_is_reported_before_generation() {
        let mut text = String::from("@<TRIPOS>ATOM\n");
        for (id, name) in [(1, "C1"), (2, "C3")] {
            text.push_str(&record(id, name));
            text.push('\n');
        }
        let doc: Mol2Document = text.parse().unwrap();
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));
        let mut collected: Vec<(usize, String)> = Vec::new();

        let summary = run(&doc, &config(Some(vec![1])), &mut collected, &reporter).unwrap();
        drop(reporter);

        assert_eq!(summary.written, 2);
        let events = events.into_inner().unwrap();
        assert!(matches!(&events[0], Progress::Message(msg) if msg.contains("inconsistent")));
        assert_eq!(events[1], Progress::GenerationStart { total_variants: 2 });
    }

    #[test]
    fn consistent_numbering_emits_no_message() {
        let doc = document();
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));
        let mut collected: Vec<(usize, String)> = Vec::new();

        run(&doc, &config(Some(vec![1])), &mut collected, &reporter).unwrap();
        drop(reporter);

        assert!(
            !events
                .into_inner()
                .unwrap()
                .iter()
                .any(|e| matches!(e, Progress::Message(_)))
        );
    }

    #[test]
    fn consumer_failure_is_propagated() {
        let doc = document();
        let result = run(&doc, &config(None), &mut FailingConsumer, &ProgressReporter::new());
        assert!(matches!(
            result,
            Err(EngineError::Sink(SinkError::Io { index: 0, .. }))
        ));
    }

    #[test]
    fn directory_sink_receives_named_files() {
        let dir = tempdir().unwrap();
        let doc = document();
        let mut sink = DirectorySink::new(dir.path(), "LIG");

        run(&doc, &config(Some(vec![1])), &mut sink, &ProgressReporter::new()).unwrap();

        let written: Vec<String> = sink
            .written()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(written, vec!["LIG_0.mol2", "LIG_1.mol2", "LIG_2.mol2"]);
    }
}
