use super::DesignError;

/// Trims and upper-cases `raw`, rejecting empty input and any symbol outside
/// A/C/G/T.
pub fn normalize_sequence(raw: &str) -> Result<String, DesignError> {
    let sequence = raw.trim().to_ascii_uppercase();
    if sequence.is_empty() {
        return Err(DesignError::EmptySequence);
    }
    if let Some((position, base)) = sequence
        .chars()
        .enumerate()
        .find(|(_, base)| !matches!(base, 'A' | 'C' | 'G' | 'T'))
    {
        return Err(DesignError::InvalidBase { base, position });
    }
    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_sequence("  acgT ").unwrap(), "ACGT");
        assert_eq!(normalize_sequence("\tacgt\n").unwrap(), "ACGT");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(normalize_sequence("   "), Err(DesignError::EmptySequence));
    }

    #[test]
    fn rejects_ambiguous_bases() {
        assert_eq!(
            normalize_sequence("ACGNT"),
            Err(DesignError::InvalidBase {
                base: 'N',
                position: 3
            })
        );
    }
}
