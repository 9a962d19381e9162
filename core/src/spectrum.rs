//! Unfolded site count spectrum and its accumulation from records.

use std::{
    fmt::{self, Write as _},
    ops::{Deref, Index, IndexMut},
};

pub mod io;

use crate::{
    input::{Locus, Record},
    site::{self, Classification, ClassifyError},
    Layout,
};

/// A one-dimensional, unfolded site count spectrum.
///
/// Index `k > 0` holds the number of sites with `k` copies of the derived allele, and index zero
/// holds the number of invariant sites. Counts are signed, since the invariant bin may be driven
/// below zero by records with an invariant site count of zero or less.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Spectrum(Vec<i64>);

impl Spectrum {
    /// Creates a new spectrum with `len` bins, all zero.
    pub fn from_zeros(len: usize) -> Self {
        Self(vec![0; len])
    }

    /// Creates a new spectrum from raw bins.
    pub fn from_vec<V>(bins: V) -> Self
    where
        V: Into<Vec<i64>>,
    {
        Self(bins.into())
    }

    /// Returns the bins as a slice.
    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    /// Returns the bins.
    pub fn into_vec(self) -> Vec<i64> {
        self.0
    }

    /// Returns the number of segregating sites, i.e. the sum of all bins except the invariant bin.
    pub fn segregating_sites(&self) -> i64 {
        self.0.iter().skip(1).sum()
    }
}

impl Deref for Spectrum {
    type Target = [i64];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Index<usize> for Spectrum {
    type Output = i64;

    fn index(&self, index: usize) -> &Self::Output {
        self.0.index(index)
    }
}

impl IndexMut<usize> for Spectrum {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.0.index_mut(index)
    }
}

impl From<Vec<i64>> for Spectrum {
    fn from(bins: Vec<i64>) -> Self {
        Self(bins)
    }
}

impl fmt::Display for Spectrum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self.0.split_first() {
            Some((first, rest)) => rest.iter().fold(first.to_string(), |mut s, x| {
                s.push(' ');
                write!(s, "{x}").unwrap();
                s
            }),
            None => String::new(),
        };

        f.write_str(&s)
    }
}

/// A streaming spectrum accumulator.
///
/// The accumulator owns a spectrum shaped by its layout, and folds records into it one at a time.
#[derive(Clone, Debug)]
pub struct Accumulator {
    layout: Layout,
    spectrum: Spectrum,
}

impl Accumulator {
    /// Creates a new accumulator with an all-zero spectrum.
    pub fn new(layout: Layout) -> Self {
        let spectrum = Spectrum::from_zeros(layout.spectrum_len());

        Self { layout, spectrum }
    }

    /// Returns the layout of the accumulator.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Classifies a record and adds it to the spectrum.
    ///
    /// If the record has a derived allele, the bin corresponding to the number of derived alleles
    /// is incremented by one, and the invariant site count less one is added to bin zero.
    /// Otherwise, the spectrum is left unchanged. In either case the classification is returned.
    ///
    /// # Errors
    ///
    /// If the record cannot be classified, if the derived allele count does not fit in the
    /// spectrum, or if the invariant site count overflows bin zero. The spectrum is left unchanged
    /// on error.
    pub fn ingest(&mut self, record: &Record<'_>) -> Result<Classification, IngestError> {
        let classification = site::classify(record, &self.layout)?;

        if let Some(derived) = classification.derived {
            let count = record.alleles.iter().filter(|&&x| x == derived).count();

            let max = self.spectrum.len() - 1;
            if count > max {
                return Err(IngestError::DerivedCountOutOfRange {
                    locus: record.locus(),
                    count,
                    max,
                });
            }

            let invariant = classification
                .invariant
                .checked_sub(1)
                .and_then(|x| self.spectrum[0].checked_add(x))
                .ok_or_else(|| IngestError::InvariantOverflow {
                    locus: record.locus(),
                    invariant: classification.invariant,
                })?;

            self.spectrum[count] += 1;
            self.spectrum[0] = invariant;
        }

        Ok(classification)
    }

    /// Returns the current spectrum.
    pub fn export(&self) -> &Spectrum {
        &self.spectrum
    }

    /// Returns the spectrum, consuming the accumulator.
    pub fn into_spectrum(self) -> Spectrum {
        self.spectrum
    }
}

/// An error associated with adding a record to a spectrum.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IngestError {
    /// Record could not be classified.
    Classify(ClassifyError),
    /// The derived allele count exceeds the largest spectrum index.
    DerivedCountOutOfRange {
        /// Location of the record.
        locus: Locus,
        /// Observed derived allele count.
        count: usize,
        /// Largest spectrum index.
        max: usize,
    },
    /// Adding the invariant site count to bin zero overflows.
    InvariantOverflow {
        /// Location of the record.
        locus: Locus,
        /// Invariant site count of the record.
        invariant: i64,
    },
}

impl From<ClassifyError> for IngestError {
    fn from(e: ClassifyError) -> Self {
        Self::Classify(e)
    }
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::Classify(e) => write!(f, "{e}"),
            IngestError::DerivedCountOutOfRange { locus, count, max } => write!(
                f,
                "{locus} has {count} derived alleles, but spectrum only holds up to {max}"
            ),
            IngestError::InvariantOverflow { locus, invariant } => write!(
                f,
                "{locus} has invariant site count {invariant}, which overflows the invariant bin"
            ),
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IngestError::Classify(e) => Some(e),
            IngestError::DerivedCountOutOfRange { .. } | IngestError::InvariantOverflow { .. } => {
                None
            }
        }
    }
}
