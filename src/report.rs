use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::engine::Counts;
use crate::filter::FilterOpts;
use crate::reader::TruncationPolicy;

/// Summary of a completed run, written as JSON when `--report` is given.
#[derive(Serialize, Default)]
pub struct RunReport {
    pub gcfilter_version: String,
    pub input_path: String,
    pub passed_path: String,
    pub failed_path: Option<String>,
    pub run_date: String,
    pub elapsed: f64,
    #[serde(flatten)]
    pub counts: Counts,
    pub pass_percentage: f64,
    pub filter: FilterOpts,
    pub on_truncated: TruncationPolicy,
}

impl RunReport {
    pub fn new(input_path: &str, filter: &FilterOpts, on_truncated: TruncationPolicy) -> Self {
        RunReport {
            gcfilter_version: crate::cli::VERSION.to_string(),
            input_path: input_path.to_string(),
            run_date: format!("{:?}", chrono::offset::Local::now()),
            filter: filter.clone(),
            on_truncated,
            ..RunReport::default()
        }
    }

    pub fn set_counts(&mut self, counts: Counts) {
        self.counts = counts;
        self.pass_percentage = counts.pass_percentage();
    }

    /// Writes the report as pretty-printed JSON to `path`.
    pub fn write(&self, path: &str) -> Result<()> {
        let file = File::create(path).with_context(|| format!("Unable to create report {path}"))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .with_context(|| format!("Could not write report to {path}"))?;
        writer.flush()?;
        Ok(())
    }
}
