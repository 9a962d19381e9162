//! Record reader.

use std::io;

use crate::input::ReadStatus;

use super::Record;

/// A streaming MSMC2 record reader.
///
/// Records are parsed one line at a time from a single reused buffer, so that memory use does
/// not depend on the size of the input.
#[derive(Debug)]
pub struct Reader<R> {
    inner: R,
    buf: String,
    line: usize,
}

impl<R> Reader<R>
where
    R: io::BufRead,
{
    /// Creates a new reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: String::new(),
            line: 0,
        }
    }

    /// Returns the one-based number of the line last read, or zero if nothing has been read.
    pub fn current_line(&self) -> usize {
        self.line
    }

    /// Reads the next record.
    ///
    /// Blank lines are skipped. Records that fail to parse are returned as errors of kind
    /// [`io::ErrorKind::InvalidData`].
    pub fn read_record(&mut self) -> ReadStatus<Record<'_>> {
        loop {
            self.buf.clear();

            match self.inner.read_line(&mut self.buf) {
                Ok(0) => return ReadStatus::Done,
                Ok(_) => self.line += 1,
                Err(e) => return ReadStatus::Error(e),
            }

            if self.buf.trim().is_empty() {
                log::trace!("Skipping blank line {}", self.line);
                continue;
            }

            return match Record::parse(&self.buf) {
                Ok(record) => ReadStatus::Read(record),
                Err(e) => ReadStatus::Error(io::Error::new(io::ErrorKind::InvalidData, e)),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_record<'a>(status: ReadStatus<Record<'a>>) -> Record<'a> {
        match status {
            ReadStatus::Read(record) => record,
            ReadStatus::Error(e) => panic!("unexpected error: {e}"),
            ReadStatus::Done => panic!("unexpected end of input"),
        }
    }

    #[test]
    fn test_read_records() {
        let src = b"8\t264084\t63\tTTAAA\n8\t264090\t2\tTTATA\n";
        let mut reader = Reader::new(&src[..]);

        let first = expect_record(reader.read_record());
        assert_eq!(first.position, "264084");
        assert_eq!(first.alleles, b"TTAAA");
        assert_eq!(reader.current_line(), 1);

        let second = expect_record(reader.read_record());
        assert_eq!(second.position, "264090");
        assert_eq!(second.invariant, 2);
        assert_eq!(reader.current_line(), 2);

        assert!(matches!(reader.read_record(), ReadStatus::Done));
    }

    #[test]
    fn test_read_without_trailing_newline() {
        let mut reader = Reader::new(&b"1 10 4 ACCA"[..]);

        assert_eq!(expect_record(reader.read_record()).alleles, b"ACCA");
        assert!(matches!(reader.read_record(), ReadStatus::Done));
    }

    #[test]
    fn test_skips_blank_lines() {
        let src = b"\n1 10 4 ACCA\n   \n\n1 12 1 AACA\n\n";
        let mut reader = Reader::new(&src[..]);

        assert_eq!(expect_record(reader.read_record()).position, "10");
        assert_eq!(reader.current_line(), 2);
        assert_eq!(expect_record(reader.read_record()).position, "12");
        assert_eq!(reader.current_line(), 5);
        assert!(matches!(reader.read_record(), ReadStatus::Done));
        assert_eq!(reader.current_line(), 6);
    }

    #[test]
    fn test_read_invalid_record() {
        let src = b"1 10 4 ACCA\n1 8 264084 63 TAAA\n";
        let mut reader = Reader::new(&src[..]);

        expect_record(reader.read_record());

        match reader.read_record() {
            ReadStatus::Error(e) => {
                assert_eq!(e.kind(), io::ErrorKind::InvalidData);
                assert_eq!(e.to_string(), "chromosome 1 position 8 has too many columns");
            }
            _ => panic!("expected error"),
        }
        assert_eq!(reader.current_line(), 2);
    }

    #[test]
    fn test_read_empty() {
        let mut reader = Reader::new(&b""[..]);

        assert!(matches!(reader.read_record(), ReadStatus::Done));
        assert_eq!(reader.current_line(), 0);
    }
}
