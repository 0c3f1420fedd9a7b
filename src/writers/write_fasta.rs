use crate::bisulfite::ConvertedSequences;
use crate::utils::Result;
use bio::io::fasta;
use std::io::Write;

/// Writes both bisulfite-converted variants of each input as FASTA records.
pub struct ConvertedFastaWriter<W: Write> {
    writer: fasta::Writer<W>,
}

impl<W: Write> ConvertedFastaWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: fasta::Writer::new(writer),
        }
    }

    pub fn write(&mut self, id: &str, sequences: &ConvertedSequences) -> Result<()> {
        for (suffix, seq) in [
            ("methylated", &sequences.methylated),
            ("unmethylated", &sequences.unmethylated),
        ] {
            self.writer
                .write(&format!("{}_{}", id, suffix), None, seq.as_bytes())
                .map_err(|e| format!("Error writing FASTA record {}: {}", id, e))?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_both_variants() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("converted.fa");
        {
            let file = std::fs::File::create(&path).unwrap();
            let mut writer = ConvertedFastaWriter::new(file);
            writer
                .write("seq1", &ConvertedSequences::new("ACGTCA").unwrap())
                .unwrap();
            writer.flush().unwrap();
        }
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, ">seq1_methylated\nACGTTA\n>seq1_unmethylated\nATGTTA\n");
    }
}
