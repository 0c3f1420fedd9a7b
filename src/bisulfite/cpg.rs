//! CpG dinucleotide scanning and exclusion-zone construction.

use itertools::Itertools;
use std::fmt;

/// A half-open `[start, start + length)` span covering one or more merged
/// CpG dinucleotides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpgInterval {
    pub start: usize,
    pub length: usize,
}

impl CpgInterval {
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

impl fmt::Display for CpgInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.start, self.length)
    }
}

/// Number of "CG" occurrences, counted with a one-base sliding window.
pub fn count_cpgs(seq: &str) -> usize {
    seq.as_bytes().windows(2).filter(|w| *w == b"CG").count()
}

pub fn has_cpg(seq: &str) -> bool {
    seq.contains("CG")
}

/// Returns the sorted, non-overlapping CpG spans of `seq`.
///
/// Raw dinucleotides `(i, i + 1)` are merged whenever the next one starts no
/// more than one base after the current merged end.
pub fn find_excluded_regions(seq: &str) -> Vec<CpgInterval> {
    let raw = seq
        .as_bytes()
        .windows(2)
        .enumerate()
        .filter(|(_, w)| *w == b"CG")
        .map(|(i, _)| (i, i + 1))
        .sorted();

    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (start, end) in raw {
        match merged.last_mut() {
            Some((_, last_end)) if start <= *last_end + 1 => {
                *last_end = (*last_end).max(end);
            }
            _ => merged.push((start, end)),
        }
    }

    merged
        .into_iter()
        .map(|(start, end)| CpgInterval {
            start,
            length: end - start + 1,
        })
        .filter(|interval| interval.end() <= seq.len())
        .collect()
}
