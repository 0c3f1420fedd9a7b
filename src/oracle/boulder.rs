//! Boulder-IO, the `TAG=VALUE` record format spoken by `primer3_core`.
//!
//! A record is a run of `TAG=VALUE` lines closed by a line holding a single
//! `=`.

use super::OracleError;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoulderRecord {
    fields: Vec<(String, String)>,
}

impl BoulderRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tag: &str, value: impl ToString) {
        self.fields.push((tag.to_string(), value.to_string()));
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Last value stored under `tag`.
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(t, _)| t == tag)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    pub fn require(&self, tag: &str) -> Result<&str, OracleError> {
        self.get(tag).ok_or_else(|| OracleError::MissingField {
            key: tag.to_string(),
        })
    }

    pub fn parse_opt<T: FromStr>(&self, tag: &str) -> Result<Option<T>, OracleError> {
        self.get(tag)
            .map(|value| parse_value(tag, value))
            .transpose()
    }

    pub fn parse_or<T: FromStr>(&self, tag: &str, default: T) -> Result<T, OracleError> {
        Ok(self.parse_opt(tag)?.unwrap_or(default))
    }

    /// Decodes a required `pos,len` pair.
    pub fn parse_pos_len(&self, tag: &str) -> Result<(usize, usize), OracleError> {
        let value = self.require(tag)?;
        let invalid = || OracleError::InvalidField {
            key: tag.to_string(),
            value: value.to_string(),
        };
        let (pos, len) = value.split_once(',').ok_or_else(invalid)?;
        let pos = pos.trim().parse().map_err(|_| invalid())?;
        let len = len.trim().parse().map_err(|_| invalid())?;
        Ok((pos, len))
    }

    /// Splits `text` into records. A trailing record without its `=`
    /// terminator is kept if it holds any field.
    pub fn parse(text: &str) -> Result<Vec<BoulderRecord>, OracleError> {
        let mut records = Vec::new();
        let mut current = BoulderRecord::new();
        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            if line == "=" {
                records.push(std::mem::take(&mut current));
                continue;
            }
            let (tag, value) = line.split_once('=').ok_or_else(|| OracleError::Io {
                message: format!("Malformed Boulder-IO line: '{}'", line),
            })?;
            current.push(tag, value);
        }
        if !current.is_empty() {
            records.push(current);
        }
        Ok(records)
    }
}

fn parse_value<T: FromStr>(tag: &str, value: &str) -> Result<T, OracleError> {
    value.trim().parse().map_err(|_| OracleError::InvalidField {
        key: tag.to_string(),
        value: value.to_string(),
    })
}

impl fmt::Display for BoulderRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (tag, value) in &self.fields {
            writeln!(f, "{}={}", tag, value)?;
        }
        writeln!(f, "=")
    }
}
