mod io_utils;
mod readers;
mod region;
mod util;

pub use io_utils::{open_output_writer, OutputWriter};
pub use readers::{
    fetch_region_sequence, open_genome_reader, open_input_reader, read_fasta_records,
    SequenceRecord,
};
pub use region::GenomicRegion;
pub use util::{handle_error_and_exit, Result};
