/// Probe acceptability: no leading G and no run of five or more Gs.
pub fn is_probe_valid(seq: &str) -> bool {
    !seq.starts_with('G') && !seq.contains("GGGGG")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_g_rejected() {
        assert!(!is_probe_valid("GATTACATTTAGGTTAGTTATTTAG"));
    }

    #[test]
    fn g_run_rejected() {
        assert!(!is_probe_valid("ATTTGGGGGTTAG"));
        assert!(is_probe_valid("ATTTGGGGTTAG"));
    }

    #[test]
    fn ordinary_probe_accepted() {
        assert!(is_probe_valid("TTCGTTTAGTTTCGTTATTTAGTTA"));
        assert!(is_probe_valid(""));
    }
}
