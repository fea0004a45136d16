use std::io::BufRead;

use serde::Serialize;

use crate::error::FilterError;
use crate::record::Record;

/// What to do when the input ends part way through a record.
#[derive(clap::ValueEnum, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TruncationPolicy {
    /// Fail the run with a `TruncatedInput` error
    #[default]
    Error,

    /// Discard the trailing lines with a warning; counts only include complete records
    Drop,
}

/// Groups the lines of a FASTQ stream into 4-line records.
///
/// The reader is forward-only and holds at most one record at a time. Once an error is
/// yielded, iteration stops.
pub struct RecordReader<R: BufRead> {
    reader: R,
    file: String,
    policy: TruncationPolicy,
    lines: u64,
    records: u64,
    done: bool,
}

impl<R: BufRead> RecordReader<R> {
    /// Creates a reader over `reader`. `file` is only used to label errors.
    pub fn new(reader: R, file: impl Into<String>, policy: TruncationPolicy) -> Self {
        Self {
            reader,
            file: file.into(),
            policy,
            lines: 0,
            records: 0,
            done: false,
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// Reads one line into `buf` with its `\n` or `\r\n` terminator removed.
    ///
    /// Lines are raw bytes; their content is left for validation to judge.
    /// Returns `Ok(false)` at end of file.
    fn read_line_trim_newline(&mut self, buf: &mut Vec<u8>) -> Result<bool, FilterError> {
        let n = self
            .reader
            .read_until(b'\n', buf)
            .map_err(|e| FilterError::io(self.file.clone(), e))?;

        if n == 0 {
            return Ok(false);
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        self.lines += 1;
        Ok(true)
    }

    fn truncated(&self, trailing_lines: usize) -> Option<Result<Record, FilterError>> {
        match self.policy {
            TruncationPolicy::Error => Some(Err(FilterError::TruncatedInput {
                file: self.file.clone(),
                records: self.records,
                trailing_lines,
            })),
            TruncationPolicy::Drop => {
                warn!(
                    "Dropping {trailing_lines} trailing line(s) of {} which do not form a complete record",
                    self.file
                );
                None
            }
        }
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Record, FilterError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let start = self.lines + 1;
        let mut lines: [Vec<u8>; 4] = Default::default();

        for (i, buf) in lines.iter_mut().enumerate() {
            match self.read_line_trim_newline(buf) {
                Ok(true) => (),
                Ok(false) => {
                    self.done = true;
                    // a clean end of file falls exactly on a record boundary
                    if i == 0 {
                        return None;
                    }
                    return self.truncated(i);
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }

        let [header, seq, separator, qual] = lines;
        self.records += 1;

        Some(Ok(Record {
            header,
            seq,
            separator,
            qual,
            line: start,
        }))
    }
}
