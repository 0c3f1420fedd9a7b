use super::load_input;
use crate::cli::DesignArgs;
use crate::design::{design_from_sequence, DesignError, DesignReport};
use crate::oracle::Primer3Cli;
use crate::utils::{open_output_writer, Result};
use crate::writers::TsvWriter;
use rayon::{
    iter::{IntoParallelRefIterator, ParallelIterator},
    ThreadPoolBuilder,
};

type RecordOutcome = (String, std::result::Result<DesignReport, DesignError>);

pub fn design(args: DesignArgs) -> Result<()> {
    let config = args.design_config();
    let records = load_input(&args.input)?;
    let oracle = Primer3Cli::new(args.primer3.clone());
    log::debug!("Using primer3 executable: {}", oracle.executable());

    let pool = initialize_thread_pool(args.num_threads)?;
    let outcomes: Vec<RecordOutcome> = pool.install(|| {
        records
            .par_iter()
            .map(|record| {
                log::debug!("{}: designing on {} bp", record.id, record.sequence.len());
                let outcome = design_from_sequence(&oracle, &record.sequence, &config);
                (record.id.clone(), outcome)
            })
            .collect()
    });

    let output = open_output_writer(args.output.as_deref())?;
    let mut writer = TsvWriter::new(output, args.markup)?;
    let mut last_error = None;
    let mut num_failed = 0;
    for (id, outcome) in &outcomes {
        match outcome {
            Ok(report) => {
                log::info!(
                    "{}: {} primer sets ({} search)",
                    id,
                    report.pairs.len(),
                    report.mode
                );
                writer.write_report(id, report)?;
            }
            Err(err) => {
                log::error!("{}: {}", id, err);
                num_failed += 1;
                last_error = Some(err.to_string());
            }
        }
    }
    writer.flush()?;
    writer.into_inner().finish()?;

    if num_failed == outcomes.len() {
        return Err(match (outcomes.len(), last_error) {
            (1, Some(err)) => err,
            (n, _) => format!("Design failed for all {} input sequences", n),
        });
    }
    if num_failed > 0 {
        log::warn!("Skipped {} of {} input sequences", num_failed, outcomes.len());
    }
    Ok(())
}

fn initialize_thread_pool(num_threads: usize) -> Result<rayon::ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("bisprobe-{}", i))
        .build()
        .map_err(|e| format!("Failed to initialize thread pool: {}", e))
}
