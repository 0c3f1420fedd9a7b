use super::AnnotatedPrimerPair;
use std::cmp::Reverse;

/// Fewer CpGs in the primers first; among ties, more CpGs in the methylated
/// probe first. The sort is stable.
pub fn rank_candidates(candidates: &mut [AnnotatedPrimerPair]) {
    candidates.sort_by_key(|pair| (pair.cpg_count, Reverse(pair.probe_m_cpgs())));
}
