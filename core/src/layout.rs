//! Allele layout.
//!
//! Each record carries a fixed number of alleles, some of which are designated as outgroup
//! alleles. The layout captures both, and is validated once before any input is read.

use std::{collections::HashSet, fmt};

/// The allele layout of an input.
///
/// Holds the total number of alleles per record together with the zero-based positions of the
/// outgroup alleles. The outgroup positions are guaranteed to be non-empty, in bounds, and
/// pairwise distinct.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Layout {
    allele_total: usize,
    outgroup: Vec<usize>,
}

impl Layout {
    /// Creates a new layout.
    ///
    /// # Errors
    ///
    /// If `allele_total` is zero, if `outgroup` is empty, or if any outgroup index is either out
    /// of bounds or repeated.
    pub fn new(allele_total: usize, outgroup: Vec<usize>) -> Result<Self, LayoutError> {
        if allele_total == 0 {
            return Err(LayoutError::NoAlleles);
        }

        if outgroup.is_empty() {
            return Err(LayoutError::EmptyOutgroup);
        }

        let mut seen = HashSet::with_capacity(outgroup.len());
        for &index in outgroup.iter() {
            if index >= allele_total {
                return Err(LayoutError::OutgroupOutOfBounds {
                    index,
                    allele_total,
                });
            } else if !seen.insert(index) {
                return Err(LayoutError::DuplicateOutgroup { index });
            }
        }

        Ok(Self::new_unchecked(allele_total, outgroup))
    }

    pub(crate) fn new_unchecked(allele_total: usize, outgroup: Vec<usize>) -> Self {
        Self {
            allele_total,
            outgroup,
        }
    }

    /// Returns the total number of alleles per record.
    pub fn allele_total(&self) -> usize {
        self.allele_total
    }

    /// Returns the outgroup allele indices, in the order provided.
    pub fn outgroup(&self) -> &[usize] {
        &self.outgroup
    }

    /// Returns the number of alleles not in the outgroup.
    ///
    /// This is the largest derived allele count the spectrum can record.
    pub fn ingroup_total(&self) -> usize {
        self.allele_total - self.outgroup.len()
    }

    /// Returns the number of bins in a spectrum over this layout.
    pub fn spectrum_len(&self) -> usize {
        self.ingroup_total() + 1
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outgroup = self
            .outgroup
            .iter()
            .map(|x| x.to_string())
            .collect::<Vec<_>>()
            .join(",");

        write!(f, "{} alleles, outgroup at [{outgroup}]", self.allele_total)
    }
}

/// An error associated with an invalid allele layout.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LayoutError {
    /// The allele total was zero.
    NoAlleles,
    /// No outgroup indices were provided.
    EmptyOutgroup,
    /// An outgroup index was not less than the allele total.
    OutgroupOutOfBounds {
        /// The offending index.
        index: usize,
        /// The allele total.
        allele_total: usize,
    },
    /// An outgroup index was provided more than once.
    DuplicateOutgroup {
        /// The repeated index.
        index: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::NoAlleles => f.write_str("allele total must be positive"),
            LayoutError::EmptyOutgroup => f.write_str("at least one outgroup index is required"),
            LayoutError::OutgroupOutOfBounds {
                index,
                allele_total,
            } => write!(
                f,
                "outgroup index {index} out of bounds for allele total {allele_total}"
            ),
            LayoutError::DuplicateOutgroup { index } => {
                write!(f, "outgroup index {index} provided more than once")
            }
        }
    }
}

impl std::error::Error for LayoutError {}
