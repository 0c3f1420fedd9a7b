mod adapter;
mod annotate;
mod candidate;
mod config;
mod error;
mod input;
mod markup;
mod pipeline;
mod probe;
mod rank;

pub use adapter::{
    fixed_primer_request, free_search_request, search_pairs, search_probe_for_fixed_primers,
};
pub use annotate::{degenerate_primer, highlight_cpg, highlight_original_cpgs, PrimerStrand};
pub use candidate::{AnnotatedPrimerPair, PrimerInfo, ProbeInfo};
pub use config::{DesignConfig, FallbackContext, ProductSizeRange};
pub use error::DesignError;
pub use input::normalize_sequence;
pub use markup::{Emphasis, Markup, MarkupStyle};
pub use pipeline::{design_from_sequence, design_primers, DesignReport, SearchMode};
pub use probe::is_probe_valid;
pub use rank::rank_candidates;
