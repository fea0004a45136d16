use serde::Serialize;

use crate::error::FilterError;
use crate::record::Record;

/// Bases accepted in a sequence line by default.
pub const DNA_ALPHABET: &[u8] = b"ACGTN";

/// Uppercase IUPAC nucleotide codes, including ambiguity codes such as `V`.
pub const IUPAC_ALPHABET: &[u8] = b"ACGTNRYSWKMBDHV";

pub const HEADER_MARKER: u8 = b'@';
pub const SEPARATOR: &[u8] = b"+";

/// The set of characters a sequence line may contain.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Alphabet {
    #[default]
    Strict,
    Iupac,
}

impl Alphabet {
    pub fn symbols(&self) -> &'static [u8] {
        match self {
            Alphabet::Strict => DNA_ALPHABET,
            Alphabet::Iupac => IUPAC_ALPHABET,
        }
    }

    fn describe(&self) -> String {
        let bases: Vec<String> = self
            .symbols()
            .iter()
            .map(|b| (*b as char).to_string())
            .collect();

        match bases.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
            _ => bases.concat(),
        }
    }
}

/// Checks the structure of a record, line by line, stopping at the first problem.
///
/// # Errors
///
/// Returns `FilterError::MalformedRecord` pointing at the offending line if:
/// * the header does not start with `@`
/// * the sequence contains a character outside `alphabet`
/// * the separator line is not exactly `+`
/// * the quality line is not the same length as the sequence
pub fn validate(record: &Record, alphabet: Alphabet, file: &str) -> Result<(), FilterError> {
    let malformed = |line: u64, reason: String| FilterError::MalformedRecord {
        file: file.to_string(),
        line,
        reason,
    };

    if record.header.first() != Some(&HEADER_MARKER) {
        return Err(malformed(
            record.header_line(),
            format!(
                "a header line must start with the '{}' symbol",
                HEADER_MARKER as char
            ),
        ));
    }

    let symbols = alphabet.symbols();
    if let Some(base) = record.seq.iter().find(|b| !symbols.contains(b)) {
        return Err(malformed(
            record.seq_line(),
            format!(
                "a read sequence contains '{}', but must contain only {}",
                base.escape_ascii(),
                alphabet.describe()
            ),
        ));
    }

    if record.separator != SEPARATOR {
        return Err(malformed(
            record.separator_line(),
            String::from("a separator line should be a plus (+) sign"),
        ));
    }

    let qual_len = record.qual.len();
    if qual_len != record.seq.len() {
        return Err(malformed(
            record.qual_line(),
            format!(
                "a quality line should be of the same length as a read sequence line ({qual_len} != {})",
                record.seq.len()
            ),
        ));
    }

    Ok(())
}
