use crate::design::{DesignConfig, FallbackContext, MarkupStyle, ProductSizeRange};
use crate::utils::{GenomicRegion, Result};
use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser)]
#[command(name="bisprobe",
          version=&**FULL_VERSION,
          about="Primer and probe design for methylation-specific PCR",
          long_about = None,
          disable_help_subcommand = true,
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Design primer pairs and probes on bisulfite-converted sequence")]
    Design(DesignArgs),
    #[clap(about = "Write the methylated and unmethylated bisulfite conversions")]
    Convert(ConvertArgs),
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["sequence", "fasta_path", "genome_path"])))]
pub struct InputArgs {
    #[clap(short = 's')]
    #[clap(long = "sequence")]
    #[clap(help = "Input DNA sequence")]
    #[clap(value_name = "SEQUENCE")]
    pub sequence: Option<String>,

    #[clap(short = 'f')]
    #[clap(long = "fasta")]
    #[clap(help = "FASTA file with one or more input sequences (optionally gzipped)")]
    #[clap(value_name = "FASTA")]
    #[arg(value_parser = check_file_exists)]
    pub fasta_path: Option<PathBuf>,

    #[clap(short = 'g')]
    #[clap(long = "genome")]
    #[clap(help = "Path to indexed reference genome FASTA")]
    #[clap(value_name = "GENOME")]
    #[clap(requires = "region")]
    #[arg(value_parser = check_file_exists)]
    pub genome_path: Option<PathBuf>,

    #[clap(short = 'r')]
    #[clap(long = "region")]
    #[clap(help = "Reference region to design on (CONTIG:START-END, 0-based half-open)")]
    #[clap(value_name = "REGION")]
    #[clap(requires = "genome_path")]
    #[arg(value_parser = GenomicRegion::from_string)]
    pub region: Option<GenomicRegion>,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct DesignArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(help = "Output TSV path (.gz for compressed output; stdout if omitted)")]
    #[clap(value_name = "OUTPUT")]
    #[arg(value_parser = check_prefix_path)]
    pub output: Option<PathBuf>,

    #[clap(long = "primer3")]
    #[clap(help = "primer3_core executable (default: $BISPROBE_PRIMER3_BIN or primer3_core)")]
    #[clap(value_name = "PATH")]
    pub primer3: Option<String>,

    #[clap(short = 't')]
    #[clap(long = "threads")]
    #[clap(help = "Number of input sequences designed in parallel")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    #[arg(value_parser = threads_in_range)]
    pub num_threads: usize,

    #[clap(long = "markup")]
    #[clap(value_name = "STYLE")]
    #[clap(help = "Rendering of highlighted sites (html or brackets)")]
    #[clap(default_value = "brackets")]
    pub markup: MarkupStyle,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "product-size-range")]
    #[clap(value_name = "MIN-MAX")]
    #[clap(help = "Accepted amplicon size range; may be given multiple times")]
    #[clap(default_value = "70-150")]
    #[arg(value_parser = product_size_range_from_string)]
    pub product_size_range: Vec<ProductSizeRange>,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "primer-min-tm")]
    #[clap(value_name = "TM")]
    #[clap(help = "Minimum primer melting temperature")]
    #[clap(default_value = "52.0")]
    pub primer_min_tm: f64,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "primer-opt-tm")]
    #[clap(value_name = "TM")]
    #[clap(help = "Optimal primer melting temperature")]
    #[clap(default_value = "55.0")]
    pub primer_opt_tm: f64,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "primer-max-tm")]
    #[clap(value_name = "TM")]
    #[clap(help = "Maximum primer melting temperature")]
    #[clap(default_value = "58.0")]
    pub primer_max_tm: f64,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "probe-min-tm")]
    #[clap(value_name = "TM")]
    #[clap(help = "Minimum probe melting temperature")]
    #[clap(default_value = "57.0")]
    pub probe_min_tm: f64,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "probe-opt-tm")]
    #[clap(value_name = "TM")]
    #[clap(help = "Optimal probe melting temperature")]
    #[clap(default_value = "60.0")]
    pub probe_opt_tm: f64,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "probe-max-tm")]
    #[clap(value_name = "TM")]
    #[clap(help = "Maximum probe melting temperature")]
    #[clap(default_value = "63.0")]
    pub probe_max_tm: f64,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "salt-mono")]
    #[clap(value_name = "MM")]
    #[clap(help = "Monovalent cation concentration (mM)")]
    #[clap(default_value = "50.0")]
    #[arg(value_parser = ensure_non_negative_float)]
    pub salt_mono: f64,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "salt-div")]
    #[clap(value_name = "MM")]
    #[clap(help = "Divalent cation concentration (mM)")]
    #[clap(default_value = "3.0")]
    #[arg(value_parser = ensure_non_negative_float)]
    pub salt_div: f64,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "dntp-conc")]
    #[clap(value_name = "MM")]
    #[clap(help = "dNTP concentration (mM)")]
    #[clap(default_value = "0.8")]
    #[arg(value_parser = ensure_non_negative_float)]
    pub dntp_conc: f64,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "fallback-context")]
    #[clap(value_name = "CONTEXT")]
    #[clap(help = "Whether relaxed fallback pairs get unmethylated probes (omit or keep)")]
    #[clap(default_value = "omit")]
    pub fallback_context: FallbackContext,
}

impl DesignArgs {
    pub fn design_config(&self) -> DesignConfig {
        DesignConfig {
            primer_min_tm: self.primer_min_tm,
            primer_opt_tm: self.primer_opt_tm,
            primer_max_tm: self.primer_max_tm,
            probe_min_tm: self.probe_min_tm,
            probe_opt_tm: self.probe_opt_tm,
            probe_max_tm: self.probe_max_tm,
            salt_mono: self.salt_mono,
            salt_div: self.salt_div,
            dntp_conc: self.dntp_conc,
            product_size_range: self.product_size_range.clone(),
            fallback_context: self.fallback_context,
        }
    }
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct ConvertArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(help = "Output FASTA path (stdout if omitted)")]
    #[clap(value_name = "OUTPUT")]
    #[arg(value_parser = check_prefix_path)]
    pub output: Option<PathBuf>,
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_prefix_path(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(path.to_path_buf())
}

fn threads_in_range(s: &str) -> Result<usize> {
    let thread: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid thread number", s))?;
    if thread >= 1 {
        Ok(thread)
    } else {
        Err("Number of threads must be at least 1".into())
    }
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn ensure_non_negative_float(s: &str) -> Result<f64> {
    let value = s
        .parse::<f64>()
        .map_err(|e| format!("Could not parse float: {}", e))?;
    if value < 0.0 {
        Err(format!("The value must be non-negative, got: {}", value))
    } else {
        Ok(value)
    }
}

fn product_size_range_from_string(s: &str) -> Result<ProductSizeRange> {
    ProductSizeRange::from_string(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("bisprobe").chain(args.iter().copied()))
    }

    #[test]
    fn design_defaults_match_config_defaults() {
        let cli = parse(&["design", "--sequence", "ACGT"]).unwrap();
        let Command::Design(args) = cli.command else {
            panic!("expected design command");
        };
        assert_eq!(args.design_config(), DesignConfig::default());
        assert_eq!(args.num_threads, 1);
        assert_eq!(args.markup, MarkupStyle::Brackets);
    }

    #[test]
    fn design_repeated_product_ranges() {
        let cli = parse(&[
            "design",
            "-s",
            "ACGT",
            "--product-size-range",
            "80-120",
            "--product-size-range",
            "150-200",
            "--fallback-context",
            "keep",
        ])
        .unwrap();
        let Command::Design(args) = cli.command else {
            panic!("expected design command");
        };
        let config = args.design_config();
        assert_eq!(
            config.product_size_range,
            vec![
                ProductSizeRange { min: 80, max: 120 },
                ProductSizeRange { min: 150, max: 200 }
            ]
        );
        assert_eq!(config.fallback_context, FallbackContext::Keep);
    }

    #[test]
    fn malformed_product_range_rejected_at_parse() {
        assert!(parse(&["design", "-s", "ACGT", "--product-size-range", "abc"]).is_err());
        assert!(parse(&["design", "-s", "ACGT", "--product-size-range", "100"]).is_err());
    }

    #[test]
    fn input_is_required() {
        assert!(parse(&["convert"]).is_err());
        assert!(parse(&["convert", "-s", "ACGT"]).is_ok());
    }

    #[test]
    fn region_requires_genome() {
        assert!(parse(&["convert", "--region", "chr1:0-100"]).is_err());
    }

    #[test]
    fn threads_validation() {
        assert_eq!(threads_in_range("4"), Ok(4));
        assert!(threads_in_range("0").is_err());
        assert!(threads_in_range("x").is_err());
    }

    #[test]
    fn negative_concentration_rejected() {
        assert!(ensure_non_negative_float("-1").is_err());
        assert_eq!(ensure_non_negative_float("0.8"), Ok(0.8));
    }
}
