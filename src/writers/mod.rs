mod write_fasta;
mod write_tsv;

pub use write_fasta::ConvertedFastaWriter;
pub use write_tsv::TsvWriter;
