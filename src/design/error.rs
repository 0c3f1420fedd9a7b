use crate::oracle::OracleError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DesignError {
    #[error("Invalid product size range '{0}'. Expected two integers separated by a hyphen, e.g. '70-150'")]
    MalformedProductSizeRange(String),

    #[error("Sequence is too short: {length} bp (minimum required: {min_size} bp)")]
    SequenceTooShort { length: usize, min_size: usize },

    #[error("Sequence is empty")]
    EmptySequence,

    #[error("Invalid base '{base}' at position {position}. Only A, C, G and T are allowed")]
    InvalidBase { base: char, position: usize },

    #[error("The {variant} sequence has length {found}, expected {expected}")]
    MisalignedSequences {
        variant: &'static str,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}
