use super::{GenomicRegion, Result};
use bio::io::fasta;
use flate2::read::MultiGzDecoder;
use rust_htslib::faidx;
use std::fs::File;
use std::io::{BufReader, Read as ioRead};
use std::path::Path;

/// One named input sequence, not yet normalised.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceRecord {
    pub id: String,
    pub sequence: String,
}

fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".gzip")
}

/// Opens a plain or gzip-compressed text file.
pub fn open_input_reader(path: &Path) -> Result<BufReader<Box<dyn ioRead>>> {
    let file = File::open(path).map_err(|e| format!("File {}: {}", path.display(), e))?;
    if is_gzipped(path) {
        let gz_decoder = MultiGzDecoder::new(file);
        if gz_decoder.header().is_some() {
            Ok(BufReader::new(Box::new(gz_decoder)))
        } else {
            Err(format!("Invalid gzip header: {}", path.to_string_lossy()))
        }
    } else {
        Ok(BufReader::new(Box::new(file)))
    }
}

pub fn read_fasta_records<R: ioRead>(reader: R) -> Result<Vec<SequenceRecord>> {
    let mut records = Vec::new();
    for (index, result) in fasta::Reader::new(reader).records().enumerate() {
        let record = result.map_err(|e| format!("Error at FASTA record {}: {}", index + 1, e))?;
        let sequence = String::from_utf8(record.seq().to_vec())
            .map_err(|_| format!("FASTA record {} is not valid UTF-8", record.id()))?;
        records.push(SequenceRecord {
            id: record.id().to_string(),
            sequence,
        });
    }
    if records.is_empty() {
        return Err("FASTA input contains no records".to_string());
    }
    Ok(records)
}

pub fn open_genome_reader(path: &Path) -> Result<faidx::Reader> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| format!("Reference path has no extension: {}", path.display()))?;
    let fai_path = path.with_extension(extension.to_owned() + ".fai");
    if !fai_path.exists() {
        return Err(format!(
            "Reference index file not found: {}. Create it using 'samtools faidx {}'",
            fai_path.display(),
            path.display()
        ));
    }
    faidx::Reader::from_path(path).map_err(|e| e.to_string())
}

/// Fetches `region` from an indexed reference, upper-cased.
pub fn fetch_region_sequence(
    genome: &faidx::Reader,
    region: &GenomicRegion,
) -> Result<SequenceRecord> {
    let contig_len = u64::try_from(genome.fetch_seq_len(&region.contig)).unwrap_or(0);
    if contig_len == 0 {
        return Err(format!(
            "FASTA reference does not contain contig '{}'",
            region.contig
        ));
    }
    if region.end as u64 > contig_len {
        return Err(format!(
            "Region {} exceeds contig '{}' bounds (0..{})",
            region, region.contig, contig_len
        ));
    }
    let sequence = genome
        .fetch_seq_string(&region.contig, region.start, region.end - 1)
        .map_err(|e| format!("Error fetching sequence for region {}: {}", region, e))?;
    Ok(SequenceRecord {
        id: region.to_string(),
        sequence: sequence.to_uppercase(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{write::GzEncoder, Compression};
    use std::io::Write;

    #[test]
    fn read_multi_record_fasta() {
        let text = ">first desc\nACGT\nTTCG\n>second\nacgtn\n";
        let records = read_fasta_records(text.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "first");
        assert_eq!(records[0].sequence, "ACGTTTCG");
        assert_eq!(records[1].sequence, "acgtn");
    }

    #[test]
    fn empty_fasta_is_error() {
        assert!(read_fasta_records("".as_bytes()).is_err());
    }

    #[test]
    fn open_gzipped_fasta() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.fa.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b">seq1\nATCGATCG\n").unwrap();
        encoder.finish().unwrap();

        let records = read_fasta_records(open_input_reader(&path).unwrap()).unwrap();
        assert_eq!(records[0].sequence, "ATCGATCG");
    }

    #[test]
    fn missing_input_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(open_input_reader(&dir.path().join("missing.fa")).is_err());
    }

    #[test]
    fn genome_without_index_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ref.fa");
        std::fs::write(&path, ">chr1\nACGT\n").unwrap();
        let err = open_genome_reader(&path).err().unwrap();
        assert!(err.starts_with("Reference index file not found"));
    }
}
