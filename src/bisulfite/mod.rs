mod convert;
mod cpg;
mod mapper;

pub use convert::{bisulfite_convert, ConvertedSequences};
pub use cpg::{count_cpgs, find_excluded_regions, has_cpg, CpgInterval};
pub use mapper::{map_primer_pair, reverse_complement, MappedPrimers};
