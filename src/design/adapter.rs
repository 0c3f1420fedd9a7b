//! Builds the two kinds of oracle query and interprets their answers.

use super::{DesignConfig, ProbeInfo};
use crate::bisulfite::CpgInterval;
use crate::oracle::{
    OligoSettings, OracleError, OracleRequest, PairSettings, PrimerCandidate, PrimerOracle, Span,
};

const NUM_RETURN: usize = 10;
const PRIMER_SIZE: Span<usize> = Span::new(18, 20, 30);
const PRIMER_GC: Span<f64> = Span::new(20.0, 50.0, 80.0);
const PRIMER_MAX_DIFF_TM: f64 = 2.0;
const PRIMER_DNA_CONC: f64 = 50.0;
const MIN_THREE_PRIME_DISTANCE: usize = 3;
const PROBE_SIZE: Span<usize> = Span::new(18, 25, 30);
const PROBE_GC: Span<f64> = Span::new(20.0, 50.0, 80.0);
const PROBE_MAX_SELF_END: f64 = 8.0;

fn probe_settings(config: &DesignConfig, max_self_end: Option<f64>) -> OligoSettings {
    OligoSettings {
        size: PROBE_SIZE,
        tm: Span::new(config.probe_min_tm, config.probe_opt_tm, config.probe_max_tm),
        gc: PROBE_GC,
        max_self_end,
    }
}

/// Pair search on `template` with a jointly picked probe per pair.
pub fn free_search_request(
    template: &str,
    excluded: &[CpgInterval],
    config: &DesignConfig,
) -> OracleRequest {
    OracleRequest {
        sequence_id: "free_search".to_string(),
        template: template.to_string(),
        excluded_regions: excluded.to_vec(),
        fixed_left: None,
        fixed_right_revcomp: None,
        pair: Some(PairSettings {
            size: PRIMER_SIZE,
            tm: Span::new(config.primer_min_tm, config.primer_opt_tm, config.primer_max_tm),
            max_diff_tm: PRIMER_MAX_DIFF_TM,
            gc: PRIMER_GC,
            product_size_ranges: config.product_size_range.clone(),
            dna_conc: PRIMER_DNA_CONC,
            salt_monovalent: config.salt_mono,
            salt_divalent: config.salt_div,
            dntp_conc: config.dntp_conc,
            num_return: NUM_RETURN,
            min_three_prime_distance: MIN_THREE_PRIME_DISTANCE,
        }),
        probe: probe_settings(config, Some(PROBE_MAX_SELF_END)),
    }
}

/// Probe-only search between pinned primers.
pub fn fixed_primer_request(
    template: &str,
    left: &str,
    right_revcomp: &str,
    config: &DesignConfig,
) -> OracleRequest {
    OracleRequest {
        sequence_id: "probe_check".to_string(),
        template: template.to_string(),
        excluded_regions: Vec::new(),
        fixed_left: Some(left.to_string()),
        fixed_right_revcomp: Some(right_revcomp.to_string()),
        pair: None,
        probe: probe_settings(config, None),
    }
}

pub fn search_pairs<O: PrimerOracle + ?Sized>(
    oracle: &O,
    template: &str,
    excluded: &[CpgInterval],
    config: &DesignConfig,
) -> Result<Vec<PrimerCandidate>, OracleError> {
    let request = free_search_request(template, excluded, config);
    let response = oracle.design(&request)?;
    response.check_within(template.len())?;
    log::debug!(
        "Free search with {} excluded regions returned {} pairs",
        excluded.len(),
        response.pairs.len()
    );
    Ok(response.pairs)
}

/// Returns the first internal oligo found between the pinned primers.
pub fn search_probe_for_fixed_primers<O: PrimerOracle + ?Sized>(
    oracle: &O,
    template: &str,
    left: &str,
    right_revcomp: &str,
    config: &DesignConfig,
) -> Result<Option<ProbeInfo>, OracleError> {
    let request = fixed_primer_request(template, left, right_revcomp, config);
    let response = oracle.design(&request)?;
    response.check_within(template.len())?;
    Ok(response.probes.first().map(|probe| probe.to_probe_info()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::ProductSizeRange;
    use crate::oracle::{OligoHit, OracleResponse, ScriptedOracle};

    fn config() -> DesignConfig {
        DesignConfig::default()
    }

    fn hit(sequence: &str, start: usize) -> OligoHit {
        OligoHit {
            sequence: sequence.to_string(),
            start,
            length: sequence.len(),
            tm: Some(60.0),
            gc: None,
            self_end: None,
            hairpin: Some(1.25),
        }
    }

    #[test]
    fn free_request_carries_config() {
        let config = DesignConfig {
            primer_min_tm: 50.0,
            probe_max_tm: 65.0,
            salt_div: 1.5,
            product_size_range: vec![ProductSizeRange { min: 80, max: 120 }],
            ..Default::default()
        };
        let request = free_search_request("ACGT", &[CpgInterval { start: 1, length: 2 }], &config);
        let pair = request.pair.as_ref().unwrap();
        assert_eq!(pair.tm, Span::new(50.0, 55.0, 58.0));
        assert_eq!(pair.salt_divalent, 1.5);
        assert_eq!(pair.product_size_ranges, config.product_size_range);
        assert_eq!(pair.num_return, 10);
        assert_eq!(pair.size, Span::new(18, 20, 30));
        assert_eq!(request.probe.tm, Span::new(57.0, 60.0, 65.0));
        assert_eq!(request.probe.size, Span::new(18, 25, 30));
        assert_eq!(request.probe.max_self_end, Some(8.0));
        assert_eq!(request.excluded_regions.len(), 1);
    }

    #[test]
    fn fixed_request_pins_primers() {
        let request = fixed_primer_request("AATTGG", "AAT", "CCA", &DesignConfig::default());
        assert!(!request.picks_primers());
        assert_eq!(request.fixed_left.as_deref(), Some("AAT"));
        assert_eq!(request.fixed_right_revcomp.as_deref(), Some("CCA"));
        assert!(request.excluded_regions.is_empty());
    }

    #[test]
    fn probe_search_takes_first_probe() {
        let oracle = ScriptedOracle::new(|_| {
            Ok(OracleResponse {
                pairs: Vec::new(),
                probes: vec![hit("TTTGTTTAGTTTTG", 12), hit("AAAA", 0)],
            })
        });
        let template = "T".repeat(40);
        let probe = search_probe_for_fixed_primers(&oracle, &template, "A", "A", &config())
            .unwrap()
            .unwrap();
        assert_eq!(probe.start, 12);
        assert_eq!(probe.cpg_count, 0);
        assert_eq!(probe.hairpin, Some(1.25));
        assert_eq!(oracle.requests().len(), 1);
    }

    #[test]
    fn probe_search_none() {
        let oracle = ScriptedOracle::new(|_| Ok(OracleResponse::default()));
        assert_eq!(
            search_probe_for_fixed_primers(&oracle, "T", "A", "A", &config()),
            Ok(None)
        );
    }

    #[test]
    fn probe_past_template_end_is_error() {
        let oracle = ScriptedOracle::new(|_| {
            Ok(OracleResponse {
                pairs: Vec::new(),
                probes: vec![hit("TTTGTTTAGTTTTG", 30)],
            })
        });
        let template = "T".repeat(40);
        assert_eq!(
            search_probe_for_fixed_primers(&oracle, &template, "A", "A", &config()),
            Err(OracleError::InvalidField {
                key: "PRIMER_INTERNAL_0".to_string(),
                value: "30,14".to_string(),
            })
        );
    }
}
