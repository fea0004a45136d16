use std::io::{BufRead, Write};

use serde::Serialize;

use crate::error::FilterError;
use crate::filter::{filter, FilterOpts, Outcome};
use crate::output::Sink;
use crate::reader::RecordReader;
use crate::validate::validate;

const PROGRESS_INTERVAL: u64 = 50000;

/// Running totals for a single pass over the input.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    pub records_seen: u64,
    pub records_passed: u64,
    pub records_failed: u64,
    /// failed records written to the failed output, zero unless it is enabled
    pub failed_written: u64,
}

impl Counts {
    pub fn pass_percentage(&self) -> f64 {
        if self.records_seen == 0 {
            return 0.0;
        }
        self.records_passed as f64 * 100.0 / self.records_seen as f64
    }
}

/// Drives records through validation and filtering and routes them to the outputs.
pub struct Engine {
    opts: FilterOpts,
    counts: Counts,
}

impl Engine {
    pub fn new(opts: FilterOpts) -> Self {
        Self {
            opts,
            counts: Counts::default(),
        }
    }

    pub fn opts(&self) -> &FilterOpts {
        &self.opts
    }

    #[cfg(test)]
    pub fn counts(&self) -> Counts {
        self.counts
    }

    /// Streams every record of `reader` into `passed`, or into `failed` if one is given.
    ///
    /// Records keep their input order in both outputs. Both sinks are flushed before this
    /// returns, whether or not the run succeeded, and nothing already written is removed.
    ///
    /// # Errors
    ///
    /// Stops at the first error and returns it:
    /// * `MalformedRecord` if a record fails validation
    /// * `DegenerateInput` if a record has an empty sequence
    /// * `TruncatedInput` if the input ends mid-record and the reader is set to fail on it
    /// * `Io` if the input cannot be read or an output cannot be written
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        reader: RecordReader<R>,
        passed: &mut Sink<W>,
        mut failed: Option<&mut Sink<W>>,
    ) -> Result<Counts, FilterError> {
        let result = self.process(reader, passed, &mut failed);

        // flush on every exit path so partial output reaches disk
        let flushed = passed
            .flush()
            .and_then(|_| failed.as_mut().map_or(Ok(()), |f| f.flush()));

        result?;
        flushed?;
        Ok(self.counts)
    }

    fn process<R: BufRead, W: Write>(
        &mut self,
        reader: RecordReader<R>,
        passed: &mut Sink<W>,
        failed: &mut Option<&mut Sink<W>>,
    ) -> Result<(), FilterError> {
        let file = reader.file().to_string();

        for record in reader {
            let record = record?;
            self.counts.records_seen += 1;

            if self.counts.records_seen % PROGRESS_INTERVAL == 0 {
                info!("Processed: {}", self.counts.records_seen);
            }

            validate(&record, self.opts.alphabet, &file)?;

            match filter(&record, &self.opts, &file)? {
                Outcome::Passed => {
                    self.counts.records_passed += 1;
                    passed.write_record(&record)?;
                }
                Outcome::Failed => {
                    self.counts.records_failed += 1;
                    if let Some(sink) = failed.as_mut() {
                        sink.write_record(&record)?;
                        self.counts.failed_written += 1;
                    }
                }
            }
        }

        Ok(())
    }
}
