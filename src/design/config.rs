use super::DesignError;
use std::{fmt, str::FromStr};

/// Accepted amplicon length interval, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductSizeRange {
    pub min: usize,
    pub max: usize,
}

impl ProductSizeRange {
    pub fn new(min: usize, max: usize) -> Result<Self, DesignError> {
        if min > max {
            return Err(DesignError::MalformedProductSizeRange(format!(
                "{}-{}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// Parses `MIN-MAX`.
    pub fn from_string(encoding: &str) -> Result<Self, DesignError> {
        let error = || DesignError::MalformedProductSizeRange(encoding.to_string());
        let elements: Vec<&str> = encoding.trim().split('-').collect();
        if elements.len() != 2 {
            return Err(error());
        }
        let min: usize = elements[0].trim().parse().map_err(|_| error())?;
        let max: usize = elements[1].trim().parse().map_err(|_| error())?;
        Self::new(min, max).map_err(|_| error())
    }
}

impl FromStr for ProductSizeRange {
    type Err = DesignError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl fmt::Display for ProductSizeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Whether the relaxed fallback search re-derives unmethylated probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackContext {
    #[default]
    Omit,
    Keep,
}

impl FromStr for FallbackContext {
    type Err = &'static str;
    fn from_str(context: &str) -> Result<Self, Self::Err> {
        match context {
            "omit" => Ok(FallbackContext::Omit),
            "keep" => Ok(FallbackContext::Keep),
            _ => Err("Invalid fallback context. Options are: omit, keep"),
        }
    }
}

/// Parameters of one design run.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignConfig {
    pub primer_min_tm: f64,
    pub primer_opt_tm: f64,
    pub primer_max_tm: f64,
    pub probe_min_tm: f64,
    pub probe_opt_tm: f64,
    pub probe_max_tm: f64,
    pub salt_mono: f64,
    pub salt_div: f64,
    pub dntp_conc: f64,
    pub product_size_range: Vec<ProductSizeRange>,
    pub fallback_context: FallbackContext,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            primer_min_tm: 52.0,
            primer_opt_tm: 55.0,
            primer_max_tm: 58.0,
            probe_min_tm: 57.0,
            probe_opt_tm: 60.0,
            probe_max_tm: 63.0,
            salt_mono: 50.0,
            salt_div: 3.0,
            dntp_conc: 0.8,
            product_size_range: vec![ProductSizeRange { min: 70, max: 150 }],
            fallback_context: FallbackContext::Omit,
        }
    }
}

impl DesignConfig {
    /// Smallest product the oracle may return, or 0 with no ranges.
    pub fn min_product_size(&self) -> usize {
        self.product_size_range
            .iter()
            .map(|range| range.min)
            .min()
            .unwrap_or(0)
    }

    pub fn check_sequence_len(&self, length: usize) -> Result<(), DesignError> {
        let min_size = self.min_product_size();
        if length < min_size {
            return Err(DesignError::SequenceTooShort { length, min_size });
        }
        Ok(())
    }
}
