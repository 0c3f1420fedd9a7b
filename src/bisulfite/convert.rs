//! In-silico bisulfite conversion under the fully methylated and fully
//! unmethylated hypotheses.

use crate::design::DesignError;

/// Converts `sequence` under both methylation hypotheses.
///
/// The methylated variant keeps every C that is directly followed by a G and
/// turns every other C into T. The unmethylated variant turns every C into T.
/// Both outputs have the length of the input.
pub fn bisulfite_convert(sequence: &str) -> (String, String) {
    let bases = sequence.as_bytes();
    let methylated: String = bases
        .iter()
        .enumerate()
        .map(|(index, &base)| match base {
            b'C' if bases.get(index + 1) == Some(&b'G') => 'C',
            b'C' => 'T',
            other => other as char,
        })
        .collect();
    let unmethylated = sequence.replace('C', "T");
    (methylated, unmethylated)
}

/// The three coordinate-aligned variants used by one design run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedSequences {
    pub original: String,
    pub methylated: String,
    pub unmethylated: String,
}

impl ConvertedSequences {
    /// Converts `original` and checks that position `i` in every variant
    /// refers to the same genomic base.
    pub fn new(original: &str) -> Result<Self, DesignError> {
        let (methylated, unmethylated) = bisulfite_convert(original);
        let converted = Self {
            original: original.to_string(),
            methylated,
            unmethylated,
        };
        converted.check_alignment()?;
        Ok(converted)
    }

    pub fn len(&self) -> usize {
        self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    fn check_alignment(&self) -> Result<(), DesignError> {
        let expected = self.original.len();
        for (variant, len) in [
            ("methylated", self.methylated.len()),
            ("unmethylated", self.unmethylated.len()),
        ] {
            if len != expected {
                return Err(DesignError::MisalignedSequences {
                    variant,
                    expected,
                    found: len,
                });
            }
        }
        Ok(())
    }
}
