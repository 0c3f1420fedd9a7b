//! Sequence strings with marked runs, rendered either as HTML spans or with
//! bracket delimiters.

use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// A CpG site, or a position that was one before conversion.
    CpgSite,
    /// A degenerate base standing in for a bisulfite-dependent position.
    Degenerate,
}

impl Emphasis {
    fn color(&self) -> &'static str {
        match self {
            Emphasis::CpgSite => "red",
            Emphasis::Degenerate => "blue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkupStyle {
    Html,
    #[default]
    Brackets,
}

impl FromStr for MarkupStyle {
    type Err = &'static str;
    fn from_str(style: &str) -> Result<Self, Self::Err> {
        match style {
            "html" => Ok(MarkupStyle::Html),
            "brackets" => Ok(MarkupStyle::Brackets),
            _ => Err("Invalid markup style. Options are: html, brackets"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    text: String,
    emphasis: Option<Emphasis>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    segments: Vec<Segment>,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends unmarked text, coalescing with a preceding unmarked segment.
    pub fn push_plain(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(last) if last.emphasis.is_none() => last.text.push_str(text),
            _ => self.segments.push(Segment {
                text: text.to_string(),
                emphasis: None,
            }),
        }
    }

    pub fn push_marked(&mut self, text: &str, emphasis: Emphasis) {
        self.segments.push(Segment {
            text: text.to_string(),
            emphasis: Some(emphasis),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The underlying sequence with all marks dropped.
    pub fn plain(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Marked runs as (text, emphasis) in order.
    pub fn marked(&self) -> impl Iterator<Item = (&str, Emphasis)> {
        self.segments
            .iter()
            .filter_map(|s| s.emphasis.map(|e| (s.text.as_str(), e)))
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment.emphasis {
                Some(emphasis) => out.push_str(&format!(
                    "<span style=\"color:{};\"><strong>{}</strong></span>",
                    emphasis.color(),
                    segment.text
                )),
                None => out.push_str(&segment.text),
            }
        }
        out
    }

    pub fn to_brackets(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment.emphasis {
                Some(_) => {
                    out.push('[');
                    out.push_str(&segment.text);
                    out.push(']');
                }
                None => out.push_str(&segment.text),
            }
        }
        out
    }

    pub fn render(&self, style: MarkupStyle) -> String {
        match style {
            MarkupStyle::Html => self.to_html(),
            MarkupStyle::Brackets => self.to_brackets(),
        }
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_brackets())
    }
}
