//! Writing spectra.
//!
//! A spectrum is written as a single line of space-separated integers in index order.

use std::{fs, io, path::Path};

use super::Spectrum;

/// Writes a spectrum to a writer.
pub fn write_spectrum<W>(writer: &mut W, spectrum: &Spectrum) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(writer, "{spectrum}")
}

/// Write spectrum to stdout.
pub fn write_to_stdout(spectrum: &Spectrum) -> io::Result<()> {
    write_spectrum(&mut io::stdout().lock(), spectrum)
}

/// Write spectrum to path.
///
/// If path already exists, it will be overwritten.
pub fn write_to_path<P>(path: P, spectrum: &Spectrum) -> io::Result<()>
where
    P: AsRef<Path>,
{
    write_spectrum(&mut fs::File::create(path)?, spectrum)
}

/// Write spectrum to path or stdout.
///
/// If the provided path is `None`, write to stdout.
/// If path already exists, it will be overwritten.
pub fn write_to_path_or_stdout<P>(path: Option<P>, spectrum: &Spectrum) -> io::Result<()>
where
    P: AsRef<Path>,
{
    match path {
        Some(path) => write_to_path(path, spectrum),
        None => write_to_stdout(spectrum),
    }
}
