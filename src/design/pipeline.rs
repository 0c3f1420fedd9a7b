//! The design run: convert, constrained search, relaxed fallback, probe
//! cross-referencing, validation, annotation and ranking.

use super::{
    highlight_original_cpgs, is_probe_valid, normalize_sequence, rank_candidates, search_pairs,
    search_probe_for_fixed_primers, AnnotatedPrimerPair, DesignConfig, DesignError,
    FallbackContext, Markup,
};
use crate::bisulfite::{find_excluded_regions, map_primer_pair, ConvertedSequences};
use crate::oracle::{OracleError, PrimerCandidate, PrimerOracle};
use std::fmt;

/// Which free search produced the candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// CpG sites excluded from primer binding sites.
    Constrained,
    /// No exclusions.
    Relaxed,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Constrained => write!(f, "constrained"),
            SearchMode::Relaxed => write!(f, "relaxed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesignReport {
    pub mode: SearchMode,
    pub pairs: Vec<AnnotatedPrimerPair>,
}

/// Context the unmethylated probe re-derivation needs.
#[derive(Clone, Copy)]
struct CrossReference<'a> {
    unmethylated: Option<&'a str>,
    original: Option<&'a str>,
}

/// Designs ranked primer/probe sets on the methylated `sequence`.
///
/// With `unmethylated`, a probe is re-derived between the same primer sites
/// on the unmethylated sequence; with `original` as well, that probe has its
/// former CpG positions marked. Oracle failures propagate unchanged.
pub fn design_primers<O: PrimerOracle + ?Sized>(
    oracle: &O,
    sequence: &str,
    unmethylated: Option<&str>,
    original: Option<&str>,
    config: Option<&DesignConfig>,
) -> Result<Vec<AnnotatedPrimerPair>, DesignError> {
    let default_config = DesignConfig::default();
    let config = config.unwrap_or(&default_config);
    let (_, pairs) = run_design(oracle, sequence, unmethylated, original, config)?;
    Ok(pairs)
}

/// Validates and converts `raw`, then designs on its methylated variant.
///
/// Validation failures are returned before the oracle is called.
pub fn design_from_sequence<O: PrimerOracle + ?Sized>(
    oracle: &O,
    raw: &str,
    config: &DesignConfig,
) -> Result<DesignReport, DesignError> {
    let sequence = normalize_sequence(raw)?;
    config.check_sequence_len(sequence.len())?;
    let sequences = ConvertedSequences::new(&sequence)?;
    let (mode, pairs) = run_design(
        oracle,
        &sequences.methylated,
        Some(sequences.unmethylated.as_str()),
        Some(sequences.original.as_str()),
        config,
    )?;
    Ok(DesignReport { mode, pairs })
}

fn check_aligned(
    variant: &'static str,
    expected: usize,
    seq: Option<&str>,
) -> Result<(), DesignError> {
    match seq {
        Some(seq) if seq.len() != expected => Err(DesignError::MisalignedSequences {
            variant,
            expected,
            found: seq.len(),
        }),
        _ => Ok(()),
    }
}

fn run_design<O: PrimerOracle + ?Sized>(
    oracle: &O,
    sequence: &str,
    unmethylated: Option<&str>,
    original: Option<&str>,
    config: &DesignConfig,
) -> Result<(SearchMode, Vec<AnnotatedPrimerPair>), DesignError> {
    check_aligned("unmethylated", sequence.len(), unmethylated)?;
    check_aligned("original", sequence.len(), original)?;

    let excluded = find_excluded_regions(sequence);
    log::debug!("Found {} CpG exclusion regions", excluded.len());

    let full_context = CrossReference {
        unmethylated,
        original,
    };
    let constrained = search_pairs(oracle, sequence, &excluded, config)?;
    let (mode, candidates, context) = if !constrained.is_empty() {
        log::info!("Using CpG-excluded primers.");
        (SearchMode::Constrained, constrained, full_context)
    } else {
        log::info!("No CpG-free primers found. Using relaxed fallback.");
        let relaxed = search_pairs(oracle, sequence, &[], config)?;
        let context = match config.fallback_context {
            FallbackContext::Keep => full_context,
            FallbackContext::Omit => {
                if unmethylated.is_some() && !relaxed.is_empty() {
                    log::warn!("Relaxed fallback pairs are reported without unmethylated probes");
                }
                CrossReference {
                    unmethylated: None,
                    original: None,
                }
            }
        };
        (SearchMode::Relaxed, relaxed, context)
    };

    let mut pairs = Vec::with_capacity(candidates.len());
    for candidate in &candidates {
        if let Some(pair) = accept_candidate(oracle, candidate, context, config)? {
            pairs.push(pair);
        }
    }
    log::debug!(
        "Kept {} of {} {} candidates",
        pairs.len(),
        candidates.len(),
        mode
    );

    rank_candidates(&mut pairs);
    Ok((mode, pairs))
}

fn accept_candidate<O: PrimerOracle + ?Sized>(
    oracle: &O,
    candidate: &PrimerCandidate,
    context: CrossReference,
    config: &DesignConfig,
) -> Result<Option<AnnotatedPrimerPair>, DesignError> {
    let mut probe_u = None;
    if let Some(unmethylated) = context.unmethylated {
        let left = (candidate.left.start, candidate.left.length);
        let right = (candidate.right.start, candidate.right.length);
        let mapped = map_primer_pair(unmethylated, left, right).ok_or_else(|| {
            OracleError::InvalidField {
                key: "PRIMER_PAIR".to_string(),
                value: format!("{},{} {},{}", left.0, left.1, right.0, right.1),
            }
        })?;
        probe_u = search_probe_for_fixed_primers(
            oracle,
            unmethylated,
            &mapped.left,
            &mapped.right_revcomp,
            config,
        )?;
    }

    let highlighted_u = match (&probe_u, context.original) {
        (Some(probe), Some(original)) => {
            highlight_original_cpgs(original, &probe.sequence, probe.start)
        }
        _ => Markup::new(),
    };

    if let Some(probe_m) = &candidate.probe {
        if !is_probe_valid(&probe_m.sequence) {
            log::debug!("Discarding pair with invalid probe {}", probe_m.sequence);
            return Ok(None);
        }
    }
    if let Some(probe) = &probe_u {
        if !is_probe_valid(&probe.sequence) {
            log::debug!("Dropping invalid unmethylated probe {}", probe.sequence);
            probe_u = None;
        }
    }

    Ok(Some(AnnotatedPrimerPair::new(candidate, probe_u, highlighted_u)))
}
