//! Translates primer coordinates found on the methylated sequence into the
//! unmethylated coordinate space.

/// Reverse complement over the A/C/G/T alphabet. Other symbols are kept.
pub fn reverse_complement(seq: &str) -> String {
    seq.chars()
        .rev()
        .map(|base| match base {
            'A' => 'T',
            'T' => 'A',
            'C' => 'G',
            'G' => 'C',
            other => other,
        })
        .collect()
}

/// Fixed primer queries for the unmethylated template.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedPrimers {
    pub left: String,
    /// Reverse complement of the right primer's binding site.
    pub right_revcomp: String,
}

/// Extracts the same-coordinate binding sites from `unmethylated`.
///
/// Coordinates are the leftmost template position and length of each binding
/// site. Returns `None` if either site does not fit inside `unmethylated`.
pub fn map_primer_pair(
    unmethylated: &str,
    left: (usize, usize),
    right: (usize, usize),
) -> Option<MappedPrimers> {
    let slice = |(start, length): (usize, usize)| {
        let end = start.checked_add(length)?;
        unmethylated.get(start..end)
    };
    let left = slice(left)?.to_string();
    let right_revcomp = reverse_complement(slice(right)?);
    Some(MappedPrimers {
        left,
        right_revcomp,
    })
}
