use std::io::Write;

/// A single FASTQ read, exactly as it appeared in the input (minus line terminators).
///
/// Lines are kept as raw bytes, so a stray non-ASCII byte reaches validation intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub header: Vec<u8>,
    pub seq: Vec<u8>,
    pub separator: Vec<u8>,
    pub qual: Vec<u8>,
    /// 1-based line number of the header line
    pub line: u64,
}

impl Record {
    pub fn header_line(&self) -> u64 {
        self.line
    }

    pub fn seq_line(&self) -> u64 {
        self.line + 1
    }

    pub fn separator_line(&self) -> u64 {
        self.line + 2
    }

    pub fn qual_line(&self) -> u64 {
        self.line + 3
    }

    /// Writes the record back out as four newline-terminated lines.
    ///
    /// This is `std::io::Write`, so a `Vec<u8>` or `Cursor` can stand in for a file.
    pub fn write_to(&self, writer: &mut impl Write) -> std::io::Result<()> {
        for line in [&self.header, &self.seq, &self.separator, &self.qual] {
            writer.write_all(line)?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }
}
