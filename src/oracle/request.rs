use crate::bisulfite::CpgInterval;
use crate::design::ProductSizeRange;

/// Minimum, optimum and maximum of one oligo property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span<T> {
    pub min: T,
    pub opt: T,
    pub max: T,
}

impl<T> Span<T> {
    pub const fn new(min: T, opt: T, max: T) -> Self {
        Self { min, opt, max }
    }
}

/// Constraints for picking the primer pair itself.
#[derive(Debug, Clone, PartialEq)]
pub struct PairSettings {
    pub size: Span<usize>,
    pub tm: Span<f64>,
    pub max_diff_tm: f64,
    pub gc: Span<f64>,
    pub product_size_ranges: Vec<ProductSizeRange>,
    pub dna_conc: f64,
    pub salt_monovalent: f64,
    pub salt_divalent: f64,
    pub dntp_conc: f64,
    pub num_return: usize,
    pub min_three_prime_distance: usize,
}

/// Constraints for the internal oligo (probe).
#[derive(Debug, Clone, PartialEq)]
pub struct OligoSettings {
    pub size: Span<usize>,
    pub tm: Span<f64>,
    pub gc: Span<f64>,
    pub max_self_end: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OracleRequest {
    pub sequence_id: String,
    pub template: String,
    pub excluded_regions: Vec<CpgInterval>,
    pub fixed_left: Option<String>,
    pub fixed_right_revcomp: Option<String>,
    /// `None` asks the oracle not to pick primers, only the internal oligo.
    pub pair: Option<PairSettings>,
    pub probe: OligoSettings,
}

impl OracleRequest {
    pub fn picks_primers(&self) -> bool {
        self.pair.is_some()
    }
}
