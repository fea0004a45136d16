use clap::builder::styling::AnsiColor;
use clap::builder::Styles;
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};

use crate::error::BoundsError;
use crate::filter::{FilterOpts, GcBounds};
use crate::reader::TruncationPolicy;
use crate::validate::Alphabet;

const fn extra_build_info() -> &'static str {
    match option_env!("CARGO_BUILD_DESC") {
        Some(e) => e,
        None => env!("CARGO_PKG_VERSION"),
    }
}
pub const VERSION: &str = extra_build_info();
const INFO_STRING: &str = "
🧬 gcfilter version ";
const AFTER_STRING: &str = "
   ──────────────────────────────────
   filter FASTQ reads by length and GC content";

// colouring of the help
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().bold())
    .usage(AnsiColor::BrightMagenta.on_default().bold())
    .literal(AnsiColor::BrightMagenta.on_default())
    .placeholder(AnsiColor::White.on_default());

#[derive(Parser)]
#[command(
    version = VERSION,
    about = format!("{}{}{}", INFO_STRING, VERSION, AFTER_STRING),
    arg_required_else_help = true,
    styles = STYLES
)]
pub struct Cli {
    /// the input .fastq file
    pub input: String,

    /// minimum read length to pass the filtration. reads of exactly this length pass.
    #[arg(long, default_value_t = 0)]
    pub min_length: usize,

    /// GC content bounds in percent, as `MIN MAX` (both inclusive) or just `MIN`.
    /// when only the minimum is given, the maximum is 100. for example:
    ///     --gc-bounds 30 70
    ///     --gc-bounds 45
    #[arg(
        long,
        num_args = 1..=2,
        value_names = ["MIN", "MAX"],
        default_values_t = [0.0, 100.0],
        action = ArgAction::Set,
        allow_negative_numbers = true,
        verbatim_doc_comment
    )]
    pub gc_bounds: Vec<f64>,

    /// write reads which fail the filtration to `<BASE>__failed.<EXT>`
    #[arg(long)]
    pub keep_filtered: bool,

    /// base name for the output files. defaults to the input file name without its extension.
    /// reads which pass are written to `<BASE>__passed.<EXT>`
    #[arg(long, verbatim_doc_comment)]
    pub output_base_name: Option<String>,

    /// what to do when the input ends part way through a record
    #[arg(long, value_enum, default_value_t = TruncationPolicy::Error)]
    pub on_truncated: TruncationPolicy,

    /// also accept IUPAC ambiguity codes (R, Y, S, W, K, M, B, D, H, V) in sequences
    #[arg(long)]
    pub iupac: bool,

    /// write a JSON summary of the run to this file
    #[arg(long)]
    pub report: Option<String>,
}

impl Cli {
    /// Turns `--gc-bounds` into a range. When both bounds are given, the maximum must be
    /// strictly higher than the minimum.
    pub fn gc_bounds(&self) -> Result<GcBounds, BoundsError> {
        match self.gc_bounds[..] {
            [min] => GcBounds::at_least(min),
            [min, max] if max <= min => Err(BoundsError::NotAboveMinimum { min, max }),
            [min, max] => GcBounds::new(min, max),
            _ => Err(BoundsError::Count(self.gc_bounds.len())),
        }
    }

    pub fn filter_opts(&self) -> Result<FilterOpts, BoundsError> {
        Ok(FilterOpts {
            min_length: self.min_length,
            gc: self.gc_bounds()?,
            alphabet: if self.iupac {
                Alphabet::Iupac
            } else {
                Alphabet::Strict
            },
        })
    }

    /// Like `filter_opts`, but unusable bounds end the program with a usage error, the
    /// same way clap reports any other bad argument.
    pub fn filter_opts_or_exit(&self) -> FilterOpts {
        self.filter_opts().unwrap_or_else(|e| {
            Cli::command()
                .error(
                    ErrorKind::ValueValidation,
                    indoc::formatdoc! {"
                    Invalid GC bounds: {e}. For example:
                      --gc-bounds 30 70
                      --gc-bounds 45
                    "},
                )
                .exit()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gcfilter").chain(args.iter().copied())).unwrap()
    }

    fn bounds(args: &[&str]) -> Result<GcBounds, BoundsError> {
        let mut full = vec!["reads.fastq", "--gc-bounds"];
        full.extend_from_slice(args);
        parse(&full).gc_bounds()
    }

    #[test]
    fn bounds_with_min_and_max() {
        let b = bounds(&["30", "70"]).unwrap();
        assert_eq!((b.min(), b.max()), (30.0, 70.0));
    }

    #[test]
    fn bounds_with_only_min() {
        let b = bounds(&["50"]).unwrap();
        assert_eq!((b.min(), b.max()), (50.0, 100.0));
    }

    #[test]
    fn bounds_reject_bad_values() {
        assert_eq!(bounds(&["-5", "50"]), Err(BoundsError::Min(-5.0)));
        assert_eq!(bounds(&["10", "150"]), Err(BoundsError::Max(150.0)));
        assert_eq!(
            bounds(&["105", "15"]),
            Err(BoundsError::NotAboveMinimum { min: 105.0, max: 15.0 })
        );
        assert_eq!(
            bounds(&["50", "50"]),
            Err(BoundsError::NotAboveMinimum { min: 50.0, max: 50.0 })
        );
        assert_eq!(bounds(&["120"]), Err(BoundsError::Min(120.0)));
    }

    #[test]
    fn bounds_must_be_numbers() {
        let res = Cli::try_parse_from(["gcfilter", "reads.fastq", "--gc-bounds", "as", "50"]);
        assert!(res.is_err());
    }

    #[test]
    fn at_most_two_bounds() {
        let res = Cli::try_parse_from(["gcfilter", "--gc-bounds", "1", "2", "3", "reads.fastq"]);
        assert!(res.is_err());
    }

    #[test]
    fn defaults() {
        let cli = parse(&["reads.fastq"]);
        let opts = cli.filter_opts().unwrap();

        assert_eq!(cli.input, "reads.fastq");
        assert_eq!(opts.min_length, 0);
        assert_eq!(opts.gc, GcBounds::default());
        assert_eq!(opts.alphabet, Alphabet::Strict);
        assert!(!cli.keep_filtered);
        assert_eq!(cli.output_base_name, None);
        assert_eq!(cli.on_truncated, TruncationPolicy::Error);
        assert_eq!(cli.report, None);
    }

    #[test]
    fn all_options() {
        let cli = parse(&[
            "--min-length",
            "35",
            "--gc-bounds",
            "20",
            "80",
            "--keep-filtered",
            "--output-base-name",
            "sample",
            "--on-truncated",
            "drop",
            "--iupac",
            "--report",
            "run.json",
            "reads.fastq",
        ]);
        let opts = cli.filter_opts().unwrap();

        assert_eq!(opts.min_length, 35);
        assert_eq!(opts.gc, GcBounds::new(20.0, 80.0).unwrap());
        assert_eq!(opts.alphabet, Alphabet::Iupac);
        assert!(cli.keep_filtered);
        assert_eq!(cli.output_base_name.as_deref(), Some("sample"));
        assert_eq!(cli.on_truncated, TruncationPolicy::Drop);
        assert_eq!(cli.report.as_deref(), Some("run.json"));
    }

    #[test]
    fn negative_length_is_rejected() {
        let res = Cli::try_parse_from(["gcfilter", "--min-length", "-50", "reads.fastq"]);
        assert!(res.is_err());
    }

    #[test]
    fn repeated_argument_is_rejected() {
        let res = Cli::try_parse_from([
            "gcfilter",
            "--min-length",
            "45",
            "--min-length",
            "35",
            "reads.fastq",
        ]);
        assert!(res.is_err());

        let res = Cli::try_parse_from([
            "gcfilter",
            "reads.fastq",
            "--gc-bounds",
            "10",
            "--gc-bounds",
            "20",
        ]);
        assert!(res.is_err());
    }
}
