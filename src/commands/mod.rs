pub mod convert;
pub mod design;

use crate::cli::InputArgs;
use crate::utils::{
    fetch_region_sequence, open_genome_reader, open_input_reader, read_fasta_records, Result,
    SequenceRecord,
};

const INLINE_SEQUENCE_ID: &str = "input";

/// Collects the input sequences named on the command line, in input order.
pub fn load_input(input: &InputArgs) -> Result<Vec<SequenceRecord>> {
    if let Some(sequence) = &input.sequence {
        return Ok(vec![SequenceRecord {
            id: INLINE_SEQUENCE_ID.to_string(),
            sequence: sequence.clone(),
        }]);
    }
    if let Some(fasta_path) = &input.fasta_path {
        let reader = open_input_reader(fasta_path)?;
        let records = read_fasta_records(reader)?;
        log::debug!(
            "Loaded {} sequences from {}",
            records.len(),
            fasta_path.display()
        );
        return Ok(records);
    }
    match (&input.genome_path, &input.region) {
        (Some(genome_path), Some(region)) => {
            let genome = open_genome_reader(genome_path)?;
            Ok(vec![fetch_region_sequence(&genome, region)?])
        }
        _ => Err(
            "No input sequence given (use --sequence, --fasta or --genome with --region)".into(),
        ),
    }
}
