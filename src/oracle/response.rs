use super::{BoulderRecord, OracleError};
use crate::bisulfite::count_cpgs;
use crate::design::ProbeInfo;

/// One oligo reported by the oracle.
///
/// `start` is always the leftmost template coordinate of the binding site,
/// whatever the strand of the oligo.
#[derive(Debug, Clone, PartialEq)]
pub struct OligoHit {
    pub sequence: String,
    pub start: usize,
    pub length: usize,
    pub tm: Option<f64>,
    pub gc: Option<f64>,
    pub self_end: Option<f64>,
    pub hairpin: Option<f64>,
}

impl OligoHit {
    /// Exclusive end of the binding site, `None` on overflow.
    pub fn end(&self) -> Option<usize> {
        self.start.checked_add(self.length)
    }

    pub fn to_probe_info(&self) -> ProbeInfo {
        ProbeInfo {
            sequence: self.sequence.clone(),
            start: self.start,
            tm: self.tm,
            gc: self.gc,
            self_end: self.self_end,
            hairpin: self.hairpin,
            cpg_count: count_cpgs(&self.sequence),
        }
    }
}

/// One indexed primer pair with its co-located internal oligo, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimerCandidate {
    pub left: OligoHit,
    pub right: OligoHit,
    pub product_size: Option<usize>,
    pub pair_compl_end: Option<f64>,
    pub probe: Option<OligoHit>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OracleResponse {
    pub pairs: Vec<PrimerCandidate>,
    /// Internal oligos reported on their own, as in a probe-only search.
    pub probes: Vec<OligoHit>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Strand {
    Forward,
    Reverse,
}

impl OracleResponse {
    /// Decodes a primer3 output record.
    pub fn from_record(record: &BoulderRecord) -> Result<Self, OracleError> {
        if let Some(message) = record.get("PRIMER_ERROR") {
            return Err(OracleError::Reported {
                message: message.to_string(),
            });
        }
        if let Some(warning) = record.get("PRIMER_WARNING") {
            log::warn!("primer3: {}", warning);
        }

        let num_pairs = record.parse_or("PRIMER_PAIR_NUM_RETURNED", 0usize)?;
        let mut pairs = Vec::with_capacity(num_pairs);
        for i in 0..num_pairs {
            let left = decode_oligo(record, &format!("PRIMER_LEFT_{i}"), Strand::Forward)?;
            let right = decode_oligo(record, &format!("PRIMER_RIGHT_{i}"), Strand::Reverse)?;
            let internal = format!("PRIMER_INTERNAL_{i}");
            let probe = if record.contains(&format!("{internal}_SEQUENCE")) {
                Some(decode_oligo(record, &internal, Strand::Forward)?)
            } else {
                None
            };
            let pair = format!("PRIMER_PAIR_{i}");
            let pair_compl_end = match record.parse_opt(&format!("{pair}_COMPL_END_TH"))? {
                Some(value) => Some(value),
                None => record.parse_opt(&format!("{pair}_COMPL_END"))?,
            };
            pairs.push(PrimerCandidate {
                left,
                right,
                product_size: record.parse_opt(&format!("{pair}_PRODUCT_SIZE"))?,
                pair_compl_end,
                probe,
            });
        }

        let mut probes = Vec::new();
        if record.parse_or("PRIMER_INTERNAL_NUM_RETURNED", 0usize)? > 0 {
            probes.push(decode_oligo(record, "PRIMER_INTERNAL_0", Strand::Forward)?);
        }

        Ok(Self { pairs, probes })
    }

    /// Fails if any reported binding site does not lie inside a template of
    /// `template_len` bases.
    pub fn check_within(&self, template_len: usize) -> Result<(), OracleError> {
        for (i, pair) in self.pairs.iter().enumerate() {
            check_site(&pair.left, &format!("PRIMER_LEFT_{i}"), template_len)?;
            check_site(&pair.right, &format!("PRIMER_RIGHT_{i}"), template_len)?;
            if let Some(probe) = &pair.probe {
                check_site(probe, &format!("PRIMER_INTERNAL_{i}"), template_len)?;
            }
        }
        for probe in &self.probes {
            check_site(probe, "PRIMER_INTERNAL_0", template_len)?;
        }
        Ok(())
    }
}

fn check_site(hit: &OligoHit, key: &str, template_len: usize) -> Result<(), OracleError> {
    match hit.end() {
        Some(end) if end <= template_len => Ok(()),
        _ => Err(OracleError::InvalidField {
            key: key.to_string(),
            value: format!("{},{}", hit.start, hit.length),
        }),
    }
}

fn decode_oligo(
    record: &BoulderRecord,
    prefix: &str,
    strand: Strand,
) -> Result<OligoHit, OracleError> {
    let sequence = record.require(&format!("{prefix}_SEQUENCE"))?.to_string();
    let (pos, length) = record.parse_pos_len(prefix)?;
    let invalid = || OracleError::InvalidField {
        key: prefix.to_string(),
        value: format!("{pos},{length}"),
    };
    let start = match strand {
        Strand::Forward => pos,
        // primer3 anchors right primers at their 3' end
        Strand::Reverse => pos
            .checked_add(1)
            .and_then(|end| end.checked_sub(length))
            .ok_or_else(invalid)?,
    };
    start.checked_add(length).ok_or_else(invalid)?;
    Ok(OligoHit {
        sequence,
        start,
        length,
        tm: record.parse_opt(&format!("{prefix}_TM"))?,
        gc: record.parse_opt(&format!("{prefix}_GC_PERCENT"))?,
        self_end: record.parse_opt(&format!("{prefix}_SELF_END_TH"))?,
        hairpin: record.parse_opt(&format!("{prefix}_HAIRPIN_TH"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str) -> BoulderRecord {
        BoulderRecord::parse(text).unwrap().remove(0)
    }

    #[test]
    fn decode_pairs_with_probe() {
        let rec = record(
            "PRIMER_PAIR_NUM_RETURNED=1\n\
             PRIMER_LEFT_0_SEQUENCE=ATTTAGGTTTAGGTTAGGTA\n\
             PRIMER_LEFT_0=3,20\n\
             PRIMER_LEFT_0_TM=55.1\n\
             PRIMER_LEFT_0_GC_PERCENT=35.0\n\
             PRIMER_RIGHT_0_SEQUENCE=AACCTAAACCTAAACTAACC\n\
             PRIMER_RIGHT_0=102,20\n\
             PRIMER_RIGHT_0_TM=54.7\n\
             PRIMER_RIGHT_0_HAIRPIN_TH=0.0\n\
             PRIMER_INTERNAL_0_SEQUENCE=TTCGTTTAGTTTCGTTATTTAGTTA\n\
             PRIMER_INTERNAL_0=40,25\n\
             PRIMER_INTERNAL_0_TM=60.2\n\
             PRIMER_PAIR_0_PRODUCT_SIZE=100\n\
             PRIMER_PAIR_0_COMPL_END_TH=2.5\n\
             =\n",
        );
        let response = OracleResponse::from_record(&rec).unwrap();
        assert_eq!(response.pairs.len(), 1);
        let pair = &response.pairs[0];
        assert_eq!(pair.left.start, 3);
        assert_eq!(pair.left.tm, Some(55.1));
        assert_eq!(pair.left.self_end, None);
        assert_eq!(pair.right.start, 83);
        assert_eq!(pair.right.length, 20);
        assert_eq!(pair.right.hairpin, Some(0.0));
        assert_eq!(pair.product_size, Some(100));
        assert_eq!(pair.pair_compl_end, Some(2.5));
        let probe = pair.probe.as_ref().unwrap();
        assert_eq!(probe.start, 40);
        assert_eq!(probe.gc, None);
        assert!(response.probes.is_empty());
    }

    #[test]
    fn decode_pair_without_probe() {
        let rec = record(
            "PRIMER_PAIR_NUM_RETURNED=1\n\
             PRIMER_LEFT_0_SEQUENCE=AAAA\nPRIMER_LEFT_0=0,4\n\
             PRIMER_RIGHT_0_SEQUENCE=TTTT\nPRIMER_RIGHT_0=9,4\n\
             PRIMER_PAIR_0_COMPL_END=1.0\n=\n",
        );
        let response = OracleResponse::from_record(&rec).unwrap();
        assert_eq!(response.pairs[0].probe, None);
        assert_eq!(response.pairs[0].pair_compl_end, Some(1.0));
        assert_eq!(response.pairs[0].product_size, None);
    }

    #[test]
    fn decode_probe_only() {
        let rec = record(
            "PRIMER_INTERNAL_NUM_RETURNED=1\n\
             PRIMER_INTERNAL_0_SEQUENCE=TTTGTTTAGTTTTGTTATTTAGTTA\n\
             PRIMER_INTERNAL_0=40,25\n\
             PRIMER_INTERNAL_0_SELF_END_TH=3.1\n=\n",
        );
        let response = OracleResponse::from_record(&rec).unwrap();
        assert!(response.pairs.is_empty());
        assert_eq!(response.probes.len(), 1);
        assert_eq!(response.probes[0].self_end, Some(3.1));
    }

    #[test]
    fn zero_results_is_empty_not_error() {
        let rec = record("PRIMER_PAIR_NUM_RETURNED=0\nPRIMER_LEFT_EXPLAIN=considered 10\n=\n");
        assert_eq!(OracleResponse::from_record(&rec).unwrap(), OracleResponse::default());
    }

    #[test]
    fn claimed_index_without_fields_is_error() {
        let rec = record("PRIMER_PAIR_NUM_RETURNED=2\nPRIMER_LEFT_0_SEQUENCE=AAAA\n=\n");
        assert_eq!(
            OracleResponse::from_record(&rec),
            Err(OracleError::MissingField {
                key: "PRIMER_LEFT_0".to_string()
            })
        );
    }

    #[test]
    fn overflowing_position_is_invalid() {
        let rec = record(&format!(
            "PRIMER_PAIR_NUM_RETURNED=1\n\
             PRIMER_LEFT_0_SEQUENCE=AAAA\nPRIMER_LEFT_0={},4\n\
             PRIMER_RIGHT_0_SEQUENCE=TTTT\nPRIMER_RIGHT_0=9,4\n=\n",
            usize::MAX - 1
        ));
        assert_eq!(
            OracleResponse::from_record(&rec),
            Err(OracleError::InvalidField {
                key: "PRIMER_LEFT_0".to_string(),
                value: format!("{},4", usize::MAX - 1),
            })
        );
    }

    #[test]
    fn right_primer_longer_than_its_end_is_invalid() {
        let rec = record(
            "PRIMER_PAIR_NUM_RETURNED=1\n\
             PRIMER_LEFT_0_SEQUENCE=AAAA\nPRIMER_LEFT_0=0,4\n\
             PRIMER_RIGHT_0_SEQUENCE=TTTT\nPRIMER_RIGHT_0=2,4\n=\n",
        );
        assert!(matches!(
            OracleResponse::from_record(&rec),
            Err(OracleError::InvalidField { key, .. }) if key == "PRIMER_RIGHT_0"
        ));
    }

    #[test]
    fn sites_outside_template_rejected() {
        let oligo = |start: usize, length: usize| OligoHit {
            sequence: "A".repeat(length),
            start,
            length,
            tm: None,
            gc: None,
            self_end: None,
            hairpin: None,
        };
        let response = OracleResponse {
            pairs: vec![PrimerCandidate {
                left: oligo(0, 20),
                right: oligo(64, 20),
                product_size: Some(84),
                pair_compl_end: None,
                probe: None,
            }],
            probes: Vec::new(),
        };
        assert_eq!(response.check_within(84), Ok(()));
        assert_eq!(
            response.check_within(83),
            Err(OracleError::InvalidField {
                key: "PRIMER_RIGHT_0".to_string(),
                value: "64,20".to_string(),
            })
        );

        let probe_only = OracleResponse {
            pairs: Vec::new(),
            probes: vec![oligo(usize::MAX, 25)],
        };
        assert!(probe_only.check_within(84).is_err());
    }

    #[test]
    fn reported_error_is_surfaced() {
        let rec = record("PRIMER_ERROR=SEQUENCE_TEMPLATE is empty\n=\n");
        assert!(matches!(
            OracleResponse::from_record(&rec),
            Err(OracleError::Reported { .. })
        ));
    }

    #[test]
    fn unparsable_metric_is_error() {
        let rec = record(
            "PRIMER_PAIR_NUM_RETURNED=1\n\
             PRIMER_LEFT_0_SEQUENCE=AAAA\nPRIMER_LEFT_0=0,4\nPRIMER_LEFT_0_TM=hot\n\
             PRIMER_RIGHT_0_SEQUENCE=TTTT\nPRIMER_RIGHT_0=9,4\n=\n",
        );
        assert!(matches!(
            OracleResponse::from_record(&rec),
            Err(OracleError::InvalidField { .. })
        ));
    }
}
