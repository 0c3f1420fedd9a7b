//! Tab-separated report of ranked primer/probe sets.

use crate::design::{AnnotatedPrimerPair, DesignReport, Markup, MarkupStyle, PrimerInfo, ProbeInfo};
use crate::utils::Result;
use itertools::Itertools;
use std::io::Write;

const MISSING: &str = ".";

const PRIMER_COLUMNS: [&str; 10] = [
    "seq", "start", "len", "tm", "gc", "self_end", "hairpin", "cpgs", "has_cpg", "degenerate",
];
const PROBE_COLUMNS: [&str; 8] = [
    "seq", "start", "tm", "gc", "self_end", "hairpin", "cpgs", "highlighted",
];

fn header() -> String {
    let mut columns = vec![
        "id".to_string(),
        "rank".to_string(),
        "search".to_string(),
    ];
    for prefix in ["left", "right"] {
        columns.extend(PRIMER_COLUMNS.iter().map(|c| format!("{}_{}", prefix, c)));
    }
    columns.extend(["product_size", "pair_compl_end", "primer_cpgs"].map(String::from));
    for prefix in ["probe_m", "probe_u"] {
        columns.extend(PROBE_COLUMNS.iter().map(|c| format!("{}_{}", prefix, c)));
    }
    columns.join("\t")
}

fn float(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{:.2}", v))
}

fn markup(value: &Markup, style: MarkupStyle) -> String {
    if value.is_empty() {
        MISSING.to_string()
    } else {
        value.render(style)
    }
}

fn primer_fields(primer: &PrimerInfo, style: MarkupStyle) -> Vec<String> {
    vec![
        primer.sequence.clone(),
        primer.start.to_string(),
        primer.length.to_string(),
        float(primer.tm),
        float(primer.gc),
        float(primer.self_end),
        float(primer.hairpin),
        primer.cpg_count.to_string(),
        primer.has_cpg.to_string(),
        markup(&primer.degenerate, style),
    ]
}

fn probe_fields(
    probe: Option<&ProbeInfo>,
    highlighted: &Markup,
    style: MarkupStyle,
) -> Vec<String> {
    match probe {
        Some(probe) => vec![
            probe.sequence.clone(),
            probe.start.to_string(),
            float(probe.tm),
            float(probe.gc),
            float(probe.self_end),
            float(probe.hairpin),
            probe.cpg_count.to_string(),
            markup(highlighted, style),
        ],
        None => vec![MISSING.to_string(); PROBE_COLUMNS.len()],
    }
}

pub struct TsvWriter<W: Write> {
    writer: W,
    style: MarkupStyle,
}

impl<W: Write> TsvWriter<W> {
    /// Creates the writer and emits the header line.
    pub fn new(mut writer: W, style: MarkupStyle) -> Result<Self> {
        writeln!(writer, "{}", header()).map_err(|e| e.to_string())?;
        Ok(Self { writer, style })
    }

    pub fn write_pair(
        &mut self,
        id: &str,
        rank: usize,
        report: &DesignReport,
        pair: &AnnotatedPrimerPair,
    ) -> Result<()> {
        let mut fields = vec![id.to_string(), rank.to_string(), report.mode.to_string()];
        fields.extend(primer_fields(&pair.left, self.style));
        fields.extend(primer_fields(&pair.right, self.style));
        fields.push(pair.product_size.map_or_else(|| MISSING.to_string(), |s| s.to_string()));
        fields.push(float(pair.pair_compl_end));
        fields.push(pair.cpg_count.to_string());
        fields.extend(probe_fields(pair.probe_m.as_ref(), &pair.highlighted_probe_m, self.style));
        fields.extend(probe_fields(pair.probe_u.as_ref(), &pair.highlighted_probe_u, self.style));
        writeln!(self.writer, "{}", fields.iter().join("\t")).map_err(|e| e.to_string())
    }

    /// Writes every pair of `report` in rank order, starting at rank 1.
    pub fn write_report(&mut self, id: &str, report: &DesignReport) -> Result<()> {
        for (index, pair) in report.pairs.iter().enumerate() {
            self.write_pair(id, index + 1, report, pair)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| e.to_string())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
