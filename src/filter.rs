use serde::Serialize;

use crate::error::{BoundsError, FilterError};
use crate::record::Record;
use crate::validate::Alphabet;

/// An inclusive range of GC percentages, `0 <= min <= max <= 100`.
#[derive(Serialize, Copy, Clone, Debug, PartialEq)]
pub struct GcBounds {
    min: f64,
    max: f64,
}

impl GcBounds {
    pub fn new(min: f64, max: f64) -> Result<Self, BoundsError> {
        if !(0.0..=100.0).contains(&min) {
            return Err(BoundsError::Min(min));
        }
        if !(0.0..=100.0).contains(&max) {
            return Err(BoundsError::Max(max));
        }
        if max < min {
            return Err(BoundsError::Reversed { min, max });
        }
        Ok(GcBounds { min, max })
    }

    /// Only a lower bound; the upper bound is 100%.
    pub fn at_least(min: f64) -> Result<Self, BoundsError> {
        Self::new(min, 100.0)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, gc: f64) -> bool {
        (self.min <= gc) && (gc <= self.max)
    }
}

impl Default for GcBounds {
    fn default() -> Self {
        GcBounds {
            min: 0.0,
            max: 100.0,
        }
    }
}

#[derive(Serialize, Clone, Debug, Default)]
pub struct FilterOpts {
    /// reads shorter than this fail; a read of exactly this length passes
    pub min_length: usize,
    pub gc: GcBounds,
    pub alphabet: Alphabet,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
}

/// Percentage of bases in `seq` that are `G` or `C`, or `None` for an empty sequence.
pub fn gc_content(seq: &[u8]) -> Option<f64> {
    if seq.is_empty() {
        return None;
    }
    let gc = seq.iter().filter(|&&b| b == b'G' || b == b'C').count();
    Some((gc * 100) as f64 / seq.len() as f64)
}

/// The pass condition on its own: long enough, and GC content within bounds.
pub fn is_passing(len: usize, gc: f64, opts: &FilterOpts) -> bool {
    len >= opts.min_length && opts.gc.contains(gc)
}

/// Decides whether an already validated record passes the length and GC filters.
///
/// # Errors
///
/// Returns `FilterError::DegenerateInput` if the sequence is empty, since its GC content
/// is undefined.
pub fn filter(record: &Record, opts: &FilterOpts, file: &str) -> Result<Outcome, FilterError> {
    let Some(gc) = gc_content(&record.seq) else {
        return Err(FilterError::DegenerateInput {
            file: file.to_string(),
            line: record.seq_line(),
        });
    };

    if is_passing(record.seq.len(), gc, opts) {
        Ok(Outcome::Passed)
    } else {
        Ok(Outcome::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SEQ: &str = "ATGCAACATCAGCT";
    const SEQ_GC: f64 = 42.857142857142854;

    fn opts(min_length: usize, min: f64, max: f64) -> FilterOpts {
        FilterOpts {
            min_length,
            gc: GcBounds::new(min, max).unwrap(),
            alphabet: Alphabet::Strict,
        }
    }

    fn record(seq: &str) -> Record {
        Record {
            header: "@r".into(),
            seq: seq.into(),
            separator: "+".into(),
            qual: "I".repeat(seq.len()).into(),
            line: 9,
        }
    }

    #[test]
    fn gc_of_reference_sequence() {
        assert_eq!(gc_content(SEQ.as_bytes()), Some(SEQ_GC));
    }

    #[test]
    fn gc_of_empty_sequence_is_undefined() {
        assert_eq!(gc_content(b""), None);
    }

    #[test]
    fn min_gc_bound_is_inclusive() {
        assert_eq!(filter(&record(SEQ), &opts(13, SEQ_GC, 50.0), "t").unwrap(), Outcome::Passed);
    }

    #[test]
    fn max_gc_bound_is_inclusive() {
        assert_eq!(filter(&record(SEQ), &opts(13, 40.0, SEQ_GC), "t").unwrap(), Outcome::Passed);
    }

    #[test]
    fn length_equal_to_minimum_passes() {
        assert_eq!(filter(&record(SEQ), &opts(14, 40.0, SEQ_GC), "t").unwrap(), Outcome::Passed);
        assert_eq!(filter(&record(SEQ), &opts(15, 40.0, SEQ_GC), "t").unwrap(), Outcome::Failed);
    }

    #[test]
    fn gc_outside_bounds_fails() {
        assert_eq!(filter(&record(SEQ), &opts(0, 43.0, 100.0), "t").unwrap(), Outcome::Failed);
        assert_eq!(filter(&record(SEQ), &opts(0, 0.0, 42.0), "t").unwrap(), Outcome::Failed);
    }

    #[test]
    fn empty_sequence_is_degenerate() {
        match filter(&record(""), &FilterOpts::default(), "t") {
            Err(FilterError::DegenerateInput { line, .. }) => assert_eq!(line, 10),
            other => panic!("expected DegenerateInput, got {other:?}"),
        }
    }

    #[test]
    fn bounds_are_validated() {
        assert_eq!(GcBounds::new(-1.0, 50.0), Err(BoundsError::Min(-1.0)));
        assert_eq!(GcBounds::new(10.0, 150.0), Err(BoundsError::Max(150.0)));
        assert_eq!(
            GcBounds::new(60.0, 40.0),
            Err(BoundsError::Reversed { min: 60.0, max: 40.0 })
        );
        assert!(GcBounds::new(f64::NAN, 40.0).is_err());
        assert!(GcBounds::new(50.0, 50.0).is_ok());
        assert_eq!(GcBounds::at_least(30.0).unwrap().max(), 100.0);
        assert_eq!(GcBounds::default(), GcBounds::new(0.0, 100.0).unwrap());
    }

    proptest! {
        #[test]
        fn gc_matches_count_and_is_a_percentage(seq in "[ACGTN]{1,500}") {
            let g = seq.bytes().filter(|&b| b == b'G' || b == b'C').count();
            let gc = gc_content(seq.as_bytes()).unwrap();
            prop_assert_eq!(gc, (g * 100) as f64 / seq.len() as f64);
            prop_assert!((0.0..=100.0).contains(&gc));
        }

        #[test]
        fn passing_needs_both_conditions(
            seq in "[ACGTN]{1,200}",
            min_length in 0usize..250,
            a in 0.0f64..=100.0,
            b in 0.0f64..=100.0,
        ) {
            let (min, max) = if a <= b { (a, b) } else { (b, a) };
            let o = opts(min_length, min, max);
            let gc = gc_content(seq.as_bytes()).unwrap();
            let expected = seq.len() >= min_length && min <= gc && gc <= max;

            let outcome = filter(&record(&seq), &o, "t").unwrap();
            prop_assert_eq!(outcome == Outcome::Passed, expected);
        }
    }
}
