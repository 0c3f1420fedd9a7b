//! Display annotations: CpG highlighting and degenerate primer encoding.

use super::{Emphasis, Markup};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimerStrand {
    Forward,
    Reverse,
}

fn is_cpg_at(bytes: &[u8], i: usize) -> bool {
    bytes.get(i..).is_some_and(|rest| rest.starts_with(b"CG"))
}

/// Marks every "CG" in `seq`.
pub fn highlight_cpg(seq: &str) -> Markup {
    let bytes = seq.as_bytes();
    let mut markup = Markup::new();
    let mut plain_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if is_cpg_at(bytes, i) {
            markup.push_plain(&seq[plain_start..i]);
            markup.push_marked("CG", Emphasis::CpgSite);
            i += 2;
            plain_start = i;
        } else {
            i += 1;
        }
    }
    markup.push_plain(&seq[plain_start..]);
    markup
}

/// Marks the dinucleotides of a converted probe that were CpG sites in
/// `original`. The probe starts at `probe_start` in original coordinates.
pub fn highlight_original_cpgs(original: &str, probe: &str, probe_start: usize) -> Markup {
    let original = original.as_bytes();
    let mut markup = Markup::new();
    let mut plain_start = 0;
    let mut i = 0;
    while i < probe.len() {
        let was_cpg = probe_start
            .checked_add(i)
            .is_some_and(|offset| is_cpg_at(original, offset));
        match probe.get(i..i + 2) {
            Some(site) if was_cpg => {
                markup.push_plain(&probe[plain_start..i]);
                markup.push_marked(site, Emphasis::CpgSite);
                i += 2;
                plain_start = i;
            }
            _ => i += 1,
        }
    }
    markup.push_plain(&probe[plain_start..]);
    markup
}

/// Bisulfite-agnostic primer notation.
///
/// On the forward strand a "CG" emits Y (C or T) and the scan resumes at the
/// G. On the reverse strand a "CG" emits C followed by R (A or G) and both
/// bases are consumed.
pub fn degenerate_primer(seq: &str, strand: PrimerStrand) -> Markup {
    let bytes = seq.as_bytes();
    let mut markup = Markup::new();
    let mut plain_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if !is_cpg_at(bytes, i) {
            i += 1;
            continue;
        }
        markup.push_plain(&seq[plain_start..i]);
        match strand {
            PrimerStrand::Forward => {
                markup.push_marked("Y", Emphasis::Degenerate);
                i += 1;
            }
            PrimerStrand::Reverse => {
                markup.push_plain("C");
                markup.push_marked("R", Emphasis::Degenerate);
                i += 2;
            }
        }
        plain_start = i;
    }
    markup.push_plain(&seq[plain_start..]);
    markup
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_cpg_marks_dinucleotides() {
        assert_eq!(highlight_cpg("ATCGAT").to_brackets(), "AT[CG]AT");
        assert_eq!(highlight_cpg("CGCG").to_brackets(), "[CG][CG]");
        assert_eq!(highlight_cpg("ACGTA").plain(), "ACGTA");
    }

    #[test]
    fn highlight_cpg_trailing_base() {
        assert_eq!(highlight_cpg("CGA").to_brackets(), "[CG]A");
        assert_eq!(highlight_cpg("C").to_brackets(), "C");
        assert!(highlight_cpg("").is_empty());
    }

    #[test]
    fn highlight_cpg_html_matches_display_markup() {
        assert_eq!(
            highlight_cpg("ACG").to_html(),
            "A<span style=\"color:red;\"><strong>CG</strong></span>"
        );
    }

    #[test]
    fn original_cpgs_marked_on_converted_probe() {
        let original = "GGATCGTTCGAA";
        let probe = "ATTGTTTGA";
        // probe starts at original position 2: ATCGTTCGA
        assert_eq!(
            highlight_original_cpgs(original, probe, 2).to_brackets(),
            "AT[TG]TT[TG]A"
        );
    }

    #[test]
    fn original_cpgs_past_original_end() {
        assert_eq!(highlight_original_cpgs("AAC", "ATT", 1).to_brackets(), "ATT");
        assert!(highlight_original_cpgs("AAC", "", 0).is_empty());
    }

    #[test]
    fn degenerate_forward() {
        assert_eq!(degenerate_primer("ACGT", PrimerStrand::Forward).to_brackets(), "A[Y]GT");
        assert_eq!(degenerate_primer("CGCG", PrimerStrand::Forward).to_brackets(), "[Y]G[Y]G");
        assert_eq!(degenerate_primer("ATTA", PrimerStrand::Forward).to_brackets(), "ATTA");
    }

    #[test]
    fn degenerate_reverse() {
        assert_eq!(degenerate_primer("ACGT", PrimerStrand::Reverse).to_brackets(), "AC[R]T");
        // scan consumes the trailing CG and stops
        assert_eq!(degenerate_primer("ACG", PrimerStrand::Reverse).to_brackets(), "AC[R]");
    }

    #[test]
    fn non_ascii_input_does_not_split_characters() {
        assert_eq!(highlight_cpg("AéCG").to_brackets(), "Aé[CG]");
        assert_eq!(
            degenerate_primer("éCGé", PrimerStrand::Forward).to_brackets(),
            "é[Y]Gé"
        );
        assert_eq!(
            degenerate_primer("CGé", PrimerStrand::Reverse).to_brackets(),
            "C[R]é"
        );
        assert_eq!(highlight_original_cpgs("ACG", "Aé", 1).to_brackets(), "Aé");
    }

    #[test]
    fn original_cpgs_with_huge_offset_stay_plain() {
        assert_eq!(
            highlight_original_cpgs("ACGT", "ATGT", usize::MAX).to_brackets(),
            "ATGT"
        );
    }

    #[test]
    fn degenerate_html_uses_blue() {
        assert_eq!(
            degenerate_primer("CGA", PrimerStrand::Reverse).to_html(),
            "C<span style=\"color:blue;\"><strong>R</strong></span>A"
        );
    }
}
