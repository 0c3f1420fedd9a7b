use super::{BoulderRecord, OracleError, OracleRequest, OracleResponse, PrimerOracle};
use itertools::Itertools;
use std::{
    io::{ErrorKind, Write},
    process::{Command, Stdio},
};

const DEFAULT_PRIMER3_BIN: &str = "primer3_core";
const PRIMER3_ENV_BIN: &str = "BISPROBE_PRIMER3_BIN";

/// Runs `primer3_core` once per request, speaking Boulder-IO over stdin and
/// stdout.
#[derive(Debug, Clone)]
pub struct Primer3Cli {
    executable: String,
}

impl Primer3Cli {
    /// Uses `executable` if given, else `$BISPROBE_PRIMER3_BIN`, else
    /// `primer3_core` from `PATH`.
    pub fn new(executable: Option<String>) -> Self {
        let executable = executable
            .or_else(|| std::env::var(PRIMER3_ENV_BIN).ok())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_PRIMER3_BIN.to_string());
        Self { executable }
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    fn run(&self, input: &str) -> Result<String, OracleError> {
        let mut child = Command::new(&self.executable)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    OracleError::ToolNotFound {
                        executable: self.executable.clone(),
                    }
                } else {
                    OracleError::Io {
                        message: format!(
                            "Could not run primer3 executable '{}': {}",
                            self.executable, e
                        ),
                    }
                }
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input.as_bytes()).map_err(|e| OracleError::Io {
                message: format!("Could not write request to primer3: {}", e),
            })?;
        }

        let output = child.wait_with_output().map_err(|e| OracleError::Io {
            message: format!("Could not read primer3 output: {}", e),
        })?;
        if !output.status.success() {
            return Err(OracleError::ToolFailed {
                executable: self.executable.clone(),
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl PrimerOracle for Primer3Cli {
    fn design(&self, request: &OracleRequest) -> Result<OracleResponse, OracleError> {
        let input = encode_request(request).to_string();
        log::trace!("primer3 request:\n{}", input);
        let stdout = self.run(&input)?;
        let records = BoulderRecord::parse(&stdout)?;
        let record = records.into_iter().next().ok_or_else(|| OracleError::Io {
            message: "primer3 returned no output record".to_string(),
        })?;
        OracleResponse::from_record(&record)
    }
}

pub(super) fn encode_request(request: &OracleRequest) -> BoulderRecord {
    let mut record = BoulderRecord::new();
    record.push("SEQUENCE_ID", &request.sequence_id);
    record.push("SEQUENCE_TEMPLATE", &request.template);
    if !request.excluded_regions.is_empty() {
        record.push(
            "SEQUENCE_EXCLUDED_REGION",
            request.excluded_regions.iter().join(" "),
        );
    }
    if let Some(left) = &request.fixed_left {
        record.push("SEQUENCE_PRIMER", left);
    }
    if let Some(right) = &request.fixed_right_revcomp {
        record.push("SEQUENCE_PRIMER_REVCOMP", right);
    }

    let pick = u8::from(request.picks_primers());
    record.push("PRIMER_PICK_LEFT_PRIMER", pick);
    record.push("PRIMER_PICK_RIGHT_PRIMER", pick);
    record.push("PRIMER_PICK_INTERNAL_OLIGO", 1);

    if let Some(pair) = &request.pair {
        record.push("PRIMER_OPT_SIZE", pair.size.opt);
        record.push("PRIMER_MIN_SIZE", pair.size.min);
        record.push("PRIMER_MAX_SIZE", pair.size.max);
        record.push("PRIMER_OPT_TM", pair.tm.opt);
        record.push("PRIMER_MIN_TM", pair.tm.min);
        record.push("PRIMER_MAX_TM", pair.tm.max);
        record.push("PRIMER_MAX_DIFF_TM", pair.max_diff_tm);
        record.push("PRIMER_OPT_GC_PERCENT", pair.gc.opt);
        record.push("PRIMER_MIN_GC", pair.gc.min);
        record.push("PRIMER_MAX_GC", pair.gc.max);
        record.push(
            "PRIMER_PRODUCT_SIZE_RANGE",
            pair.product_size_ranges.iter().join(" "),
        );
        record.push("PRIMER_DNA_CONC", pair.dna_conc);
        record.push("PRIMER_SALT_MONOVALENT", pair.salt_monovalent);
        record.push("PRIMER_SALT_DIVALENT", pair.salt_divalent);
        record.push("PRIMER_DNTP_CONC", pair.dntp_conc);
        record.push("PRIMER_NUM_RETURN", pair.num_return);
        record.push("PRIMER_MIN_THREE_PRIME_DISTANCE", pair.min_three_prime_distance);
    }

    let probe = &request.probe;
    if let Some(max_self_end) = probe.max_self_end {
        record.push("PRIMER_INTERNAL_MAX_SELF_END", max_self_end);
    }
    record.push("PRIMER_INTERNAL_OPT_SIZE", probe.size.opt);
    record.push("PRIMER_INTERNAL_MIN_SIZE", probe.size.min);
    record.push("PRIMER_INTERNAL_MAX_SIZE", probe.size.max);
    record.push("PRIMER_INTERNAL_OPT_TM", probe.tm.opt);
    record.push("PRIMER_INTERNAL_MIN_TM", probe.tm.min);
    record.push("PRIMER_INTERNAL_MAX_TM", probe.tm.max);
    record.push("PRIMER_INTERNAL_OPT_GC_PERCENT", probe.gc.opt);
    record.push("PRIMER_INTERNAL_MIN_GC", probe.gc.min);
    record.push("PRIMER_INTERNAL_MAX_GC", probe.gc.max);
    record
}
