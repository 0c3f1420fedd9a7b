use super::load_input;
use crate::bisulfite::ConvertedSequences;
use crate::cli::ConvertArgs;
use crate::design::normalize_sequence;
use crate::utils::{open_output_writer, Result};
use crate::writers::ConvertedFastaWriter;

pub fn convert(args: ConvertArgs) -> Result<()> {
    let records = load_input(&args.input)?;
    let mut output = open_output_writer(args.output.as_deref())?;
    let mut writer = ConvertedFastaWriter::new(&mut output);
    for record in &records {
        let sequence =
            normalize_sequence(&record.sequence).map_err(|e| format!("{}: {}", record.id, e))?;
        let converted = ConvertedSequences::new(&sequence).map_err(|e| e.to_string())?;
        writer.write(&record.id, &converted)?;
    }
    writer.flush()?;
    drop(writer);
    output.finish()?;
    log::info!("Converted {} sequences", records.len());
    Ok(())
}
