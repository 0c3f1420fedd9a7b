use crate::utils::Result;
use std::fmt;

/// A 0-based, half-open interval on a reference contig.
#[derive(Debug, Clone, PartialEq)]
pub struct GenomicRegion {
    pub contig: String,
    pub start: usize,
    pub end: usize,
}

impl GenomicRegion {
    pub fn new(contig: impl Into<String>, start: usize, end: usize) -> Result<Self> {
        if start >= end {
            return Err(format!("Invalid region: start {} >= end {}", start, end));
        }
        Ok(Self {
            contig: contig.into(),
            start,
            end,
        })
    }

    /// Parses `CONTIG:START-END`. Thousands separators in coordinates are
    /// accepted and the contig name may itself contain ':'.
    pub fn from_string(encoding: &str) -> Result<Self> {
        let error_msg = || format!("Invalid region encoding: {}", encoding);
        let (contig, interval) = encoding.rsplit_once(':').ok_or_else(error_msg)?;
        let (start, end) = interval.split_once('-').ok_or_else(error_msg)?;
        if contig.is_empty() {
            return Err(error_msg());
        }
        let parse = |s: &str| s.replace(',', "").parse::<usize>().map_err(|_| error_msg());
        Self::new(contig, parse(start)?, parse(end)?)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for GenomicRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.contig, self.start, self.end)
    }
}
