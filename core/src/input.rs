//! Input for creating spectra.

use std::{
    env,
    fs::File,
    io::{self, IsTerminal as _},
    path::{Path, PathBuf},
};

use flate2::bufread::MultiGzDecoder;

pub mod record;
pub use record::{Locus, Record};

/// A status when trying to read an element from a reader.
#[derive(Debug)]
pub enum ReadStatus<T> {
    /// Element was succesfully read.
    Read(T),
    /// An error was encountered.
    Error(io::Error),
    /// The reader has finished.
    Done,
}

/// An input source for reading.
#[derive(Debug)]
pub enum Input {
    /// A path from which to read a file.
    Path(PathBuf),
    /// Stdin.
    Stdin,
}

impl Input {
    /// By default, reading an `Input` checks that either a path is provided, or that input is
    /// available via stdin, instead of hanging.
    ///
    /// In some contexts, e.g. testing, this can cause issues, and so it may be disabled by setting
    /// this environment variable, or by using [`Input::new_unchecked`].
    pub const ENV_KEY_DISABLE_CHECK: &'static str = "MSMC2SFS_ALLOW_STDIN";

    /// Creates a new input source.
    pub fn new(input: Option<PathBuf>) -> io::Result<Self> {
        let check = env::var(Self::ENV_KEY_DISABLE_CHECK).is_err();

        if input.is_some() && !io::stdin().is_terminal() && check {
            Err(io::Error::new(
                io::ErrorKind::Other,
                "received input both via file and stdin",
            ))
        } else if input.is_none() && io::stdin().is_terminal() && check {
            Err(io::Error::new(
                io::ErrorKind::Other,
                "received no input via file or stdin",
            ))
        } else {
            Ok(Self::new_unchecked(input))
        }
    }

    /// Creates a new input source without checking that any data is available.
    pub fn new_unchecked(input: Option<PathBuf>) -> Self {
        if let Some(path) = input {
            Self::Path(path)
        } else {
            Self::Stdin
        }
    }

    /// Open the input for reading.
    pub fn open(&self) -> io::Result<Reader> {
        match self {
            Input::Path(path) => File::open(path).map(io::BufReader::new).map(Reader::File),
            Input::Stdin => Ok(Reader::Stdin(io::stdin().lock())),
        }
    }

    /// Open the input for reading, transparently decompressing gzipped data.
    pub fn open_decompressed(&self) -> io::Result<Box<dyn io::BufRead>> {
        decompress(self.open()?)
    }

    /// Returns the provided path if provided, otherwise `None`.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Input::Path(path) => Some(path.as_ref()),
            Input::Stdin => None,
        }
    }
}

/// A reader from either a file or stdin.
#[derive(Debug)]
pub enum Reader {
    /// A reader from a file.
    File(io::BufReader<File>),
    /// A reader stdin.
    Stdin(io::StdinLock<'static>),
}

impl io::Read for Reader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Reader::File(reader) => reader.read(buf),
            Reader::Stdin(reader) => reader.read(buf),
        }
    }
}

impl io::BufRead for Reader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            Reader::File(reader) => reader.fill_buf(),
            Reader::Stdin(reader) => reader.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            Reader::File(reader) => reader.consume(amt),
            Reader::Stdin(reader) => reader.consume(amt),
        }
    }
}

/// Wraps a reader in a gzip decoder if its contents start with the gzip magic number.
pub fn decompress<R>(mut reader: R) -> io::Result<Box<dyn io::BufRead>>
where
    R: 'static + io::BufRead,
{
    match CompressionMethod::detect(&mut reader)? {
        Some(CompressionMethod::Gzip) => {
            log::debug!("Detected gzip compressed input");

            Ok(Box::new(io::BufReader::new(MultiGzDecoder::new(reader))))
        }
        None => Ok(Box::new(reader)),
    }
}

/// A compression method for input data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompressionMethod {
    /// Gzip, including BGZF.
    Gzip,
}

impl CompressionMethod {
    /// Detects the compression method from the start of a reader without consuming any data.
    pub fn detect<R>(reader: &mut R) -> io::Result<Option<Self>>
    where
        R: io::BufRead,
    {
        const GZIP_MAGIC_NUMBER: [u8; 2] = [0x1f, 0x8b];

        let src = reader.fill_buf()?;

        if let Some(buf) = src.get(..GZIP_MAGIC_NUMBER.len()) {
            if buf == GZIP_MAGIC_NUMBER {
                return Ok(Some(CompressionMethod::Gzip));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::{Read as _, Write as _};

    use flate2::{write::GzEncoder, Compression};

    #[test]
    fn test_detect_plain() -> io::Result<()> {
        let mut src = &b"8 264084 63 TTAAA\n"[..];

        assert_eq!(CompressionMethod::detect(&mut src)?, None);
        assert_eq!(src.len(), 18);

        Ok(())
    }

    #[test]
    fn test_detect_empty() -> io::Result<()> {
        assert_eq!(CompressionMethod::detect(&mut &b""[..])?, None);

        Ok(())
    }

    #[test]
    fn test_decompress_gzip() -> io::Result<()> {
        let text = "8 264084 63 TTAAA\n8 264090 2 TTATA\n";

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes())?;
        let compressed = encoder.finish()?;

        let mut reader = decompress(io::Cursor::new(compressed))?;
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;

        assert_eq!(buf, text);

        Ok(())
    }

    #[test]
    fn test_decompress_plain_passthrough() -> io::Result<()> {
        let text = "8 264084 63 TTAAA\n";

        let mut reader = decompress(io::Cursor::new(text.as_bytes().to_vec()))?;
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;

        assert_eq!(buf, text);

        Ok(())
    }
}
