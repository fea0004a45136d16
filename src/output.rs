use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::FilterError;
use crate::record::Record;

pub const PASSED_SUFFIX: &str = "__passed";
pub const FAILED_SUFFIX: &str = "__failed";
const DEFAULT_EXTENSION: &str = "fastq";

/// The two files a run writes to, named `{base}__passed.{ext}` and `{base}__failed.{ext}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub passed: PathBuf,
    pub failed: PathBuf,
}

impl OutputPaths {
    /// Derives output names from the input path.
    ///
    /// The base name is `base_name` if given, otherwise the file stem of `input` (so outputs
    /// land in the working directory). The extension is taken from `input`, defaulting to
    /// `fastq`.
    pub fn derive(input: &Path, base_name: Option<&str>) -> Self {
        let base = match base_name {
            Some(b) if !b.is_empty() => b.to_string(),
            _ => input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| String::from("reads")),
        };

        let ext = input
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

        OutputPaths {
            passed: PathBuf::from(format!("{base}{PASSED_SUFFIX}.{ext}")),
            failed: PathBuf::from(format!("{base}{FAILED_SUFFIX}.{ext}")),
        }
    }

    /// Fails if an output which will be created resolves to the same file as `input`.
    ///
    /// Must run before any output is created, since creating it truncates the file.
    pub fn ensure_distinct_from(&self, input: &Path, keep_failed: bool) -> Result<(), FilterError> {
        let input = input
            .canonicalize()
            .map_err(|e| FilterError::io(input.display().to_string(), e))?;

        let outputs = if keep_failed {
            vec![&self.passed, &self.failed]
        } else {
            vec![&self.passed]
        };

        for output in outputs {
            // an output which does not exist yet cannot be the input
            if output.canonicalize().is_ok_and(|p| p == input) {
                return Err(FilterError::OutputIsInput {
                    path: output.display().to_string(),
                });
            }
        }
        Ok(())
    }
}

/// A record destination that remembers its path, so write failures can name it.
pub struct Sink<W: Write> {
    path: String,
    writer: W,
}

impl Sink<BufWriter<File>> {
    /// Creates (or truncates) the file at `path`.
    pub fn create(path: &Path) -> Result<Self, FilterError> {
        let label = path.display().to_string();
        let file = File::create(path).map_err(|e| FilterError::io(label.clone(), e))?;
        Ok(Sink::new(label, BufWriter::new(file)))
    }
}

impl<W: Write> Sink<W> {
    pub fn new(path: impl Into<String>, writer: W) -> Self {
        Self {
            path: path.into(),
            writer,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    #[cfg(test)]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn write_record(&mut self, record: &Record) -> Result<(), FilterError> {
        record
            .write_to(&mut self.writer)
            .map_err(|e| FilterError::io(self.path.clone(), e))
    }

    pub fn flush(&mut self) -> Result<(), FilterError> {
        self.writer
            .flush()
            .map_err(|e| FilterError::io(self.path.clone(), e))
    }
}
