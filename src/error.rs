use thiserror::Error;

/// Fatal conditions raised while streaming a FASTQ file through the filter.
///
/// Every variant stops the run. Output written before the error is left on disk.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error(
        "FASTQ file {file} seems to be corrupted:
line {line}: {reason}
please fix the file, then try again"
    )]
    MalformedRecord {
        file: String,
        line: u64,
        reason: String,
    },

    #[error(
        "a sequence of zero length was found in {file} at line {line}:
GC content is undefined for an empty read"
    )]
    DegenerateInput { file: String, line: u64 },

    #[error(
        "FASTQ file {file} is truncated:
{trailing_lines} trailing line(s) after {records} complete record(s) do not form a full record
suggestion: pass `--on-truncated drop` to discard the incomplete record"
    )]
    TruncatedInput {
        file: String,
        records: u64,
        trailing_lines: usize,
    },

    #[error(
        "output file {path} is the input file:
reading it while it is being written would lose the input
suggestion: pass a different `--output-base-name`"
    )]
    OutputIsInput { path: String },

    #[error("I/O error on {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// GC bounds which cannot be used for filtering.
#[derive(Error, Debug, PartialEq)]
pub enum BoundsError {
    #[error("minimum GC content threshold must be between 0% and 100%, got {0}")]
    Min(f64),

    #[error("maximum GC content threshold must be between 0% and 100%, got {0}")]
    Max(f64),

    #[error("maximum GC content threshold ({max}) is lower than the minimum ({min})")]
    Reversed { min: f64, max: f64 },

    #[error("maximum GC content threshold ({max}) must be higher than the minimum ({min})")]
    NotAboveMinimum { min: f64, max: f64 },

    #[error("expected one or two GC content thresholds, got {0}")]
    Count(usize),
}

impl FilterError {
    /// Wraps an I/O error with the path of the file it occurred on.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        FilterError::Io {
            path: path.into(),
            source,
        }
    }
}
