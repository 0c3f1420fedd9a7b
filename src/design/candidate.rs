use super::{degenerate_primer, highlight_cpg, Markup, PrimerStrand};
use crate::bisulfite::{count_cpgs, has_cpg};
use crate::oracle::{OligoHit, PrimerCandidate};

/// A probe located by the oracle, in its own template's coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeInfo {
    pub sequence: String,
    pub start: usize,
    pub tm: Option<f64>,
    pub gc: Option<f64>,
    pub self_end: Option<f64>,
    pub hairpin: Option<f64>,
    pub cpg_count: usize,
}

/// One primer of an accepted pair, with its display annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimerInfo {
    pub sequence: String,
    pub start: usize,
    pub length: usize,
    pub tm: Option<f64>,
    pub gc: Option<f64>,
    pub self_end: Option<f64>,
    pub hairpin: Option<f64>,
    pub cpg_count: usize,
    pub has_cpg: bool,
    pub degenerate: Markup,
}

impl PrimerInfo {
    fn new(hit: &OligoHit, strand: PrimerStrand) -> Self {
        Self {
            sequence: hit.sequence.clone(),
            start: hit.start,
            length: hit.length,
            tm: hit.tm,
            gc: hit.gc,
            self_end: hit.self_end,
            hairpin: hit.hairpin,
            cpg_count: count_cpgs(&hit.sequence),
            has_cpg: has_cpg(&hit.sequence),
            degenerate: degenerate_primer(&hit.sequence, strand),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedPrimerPair {
    pub left: PrimerInfo,
    pub right: PrimerInfo,
    pub product_size: Option<usize>,
    pub pair_compl_end: Option<f64>,
    /// CpGs in both primers.
    pub cpg_count: usize,
    pub probe_m: Option<ProbeInfo>,
    pub highlighted_probe_m: Markup,
    pub probe_u: Option<ProbeInfo>,
    pub highlighted_probe_u: Markup,
}

impl AnnotatedPrimerPair {
    /// Annotates an accepted candidate. `highlighted_probe_u` is empty when the
    /// unmethylated probe is absent or no original sequence was available.
    pub fn new(
        candidate: &PrimerCandidate,
        probe_u: Option<ProbeInfo>,
        highlighted_probe_u: Markup,
    ) -> Self {
        let left = PrimerInfo::new(&candidate.left, PrimerStrand::Forward);
        let right = PrimerInfo::new(&candidate.right, PrimerStrand::Reverse);
        let probe_m = candidate.probe.as_ref().map(OligoHit::to_probe_info);
        let highlighted_probe_m = probe_m
            .as_ref()
            .map(|probe| highlight_cpg(&probe.sequence))
            .unwrap_or_default();
        let highlighted_probe_u = if probe_u.is_some() {
            highlighted_probe_u
        } else {
            Markup::new()
        };
        Self {
            cpg_count: left.cpg_count + right.cpg_count,
            left,
            right,
            product_size: candidate.product_size,
            pair_compl_end: candidate.pair_compl_end,
            probe_m,
            highlighted_probe_m,
            probe_u,
            highlighted_probe_u,
        }
    }

    pub fn probe_m_cpgs(&self) -> usize {
        self.probe_m.as_ref().map_or(0, |p| p.cpg_count)
    }
}
