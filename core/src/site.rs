//! Site classification.
//!
//! A record contributes to the unfolded spectrum only when its outgroup alleles agree on a single
//! ancestral allele, and when exactly two distinct alleles are observed across all alleles at the
//! site. The derived allele is then the segregating allele that is not ancestral.

use std::fmt;

use indexmap::IndexSet;

use crate::{
    input::{Locus, Record},
    Layout,
};

/// The two distinct alleles at a biallelic site, in order of first appearance.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Segregating([u8; 2]);

impl Segregating {
    /// Returns the segregating allele other than the provided one, if the provided allele is
    /// segregating.
    pub fn other(&self, allele: u8) -> Option<u8> {
        match self.0 {
            [a, b] if a == allele => Some(b),
            [a, b] if b == allele => Some(a),
            _ => None,
        }
    }
}

impl fmt::Display for Segregating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b] = self.0;
        write!(f, "{}/{}", char::from(a), char::from(b))
    }
}

/// The classification of a single record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Classification {
    /// The ancestral allele, if all outgroup alleles agree.
    pub ancestral: Option<u8>,
    /// The segregating alleles, if the site is strictly biallelic.
    pub segregating: Option<Segregating>,
    /// The derived allele, if both the ancestral and segregating alleles are known.
    pub derived: Option<u8>,
    /// The invariant site count of the record.
    pub invariant: i64,
    distinct: usize,
}

impl Classification {
    /// Returns the reason for the record not contributing to the spectrum, if any.
    pub fn skipped(&self) -> Option<Skipped> {
        if self.derived.is_some() {
            None
        } else if self.ancestral.is_none() {
            Some(Skipped::OutgroupDisagreement)
        } else if self.distinct < 2 {
            Some(Skipped::Monomorphic)
        } else {
            Some(Skipped::Multiallelic)
        }
    }
}

/// A reason for a record not contributing to the spectrum.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum Skipped {
    /// Outgroup alleles disagree.
    OutgroupDisagreement = 0,
    /// Only a single allele observed.
    Monomorphic = 1,
    /// More than two alleles observed.
    Multiallelic = 2,
}

impl Skipped {
    /// The number of skip reasons.
    pub const N: usize = 3;

    /// All skip reasons.
    pub const VARIANTS: [Skipped; Self::N] = [
        Self::OutgroupDisagreement,
        Self::Monomorphic,
        Self::Multiallelic,
    ];

    /// Returns a string representation for having skipped the record.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::OutgroupDisagreement => "outgroup disagreement",
            Self::Monomorphic => "monomorphic site",
            Self::Multiallelic => "multiallelic site",
        }
    }
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Returns the ancestral allele if the alleles at all outgroup indices agree, otherwise `None`.
///
/// # Panics
///
/// If any outgroup index is out of bounds for the alleles.
pub fn ancestral(alleles: &[u8], outgroup: &[usize]) -> Option<u8> {
    let (&first, rest) = outgroup.split_first()?;
    let allele = alleles[first];

    rest.iter()
        .all(|&i| alleles[i] == allele)
        .then_some(allele)
}

fn distinct(alleles: &[u8]) -> IndexSet<u8> {
    let mut set = IndexSet::with_capacity(2);

    for &allele in alleles {
        set.insert(allele);

        if set.len() > 2 {
            break;
        }
    }

    set
}

/// Returns the segregating alleles if exactly two distinct alleles are present, otherwise `None`.
pub fn segregating(alleles: &[u8]) -> Option<Segregating> {
    segregating_from_distinct(&distinct(alleles))
}

fn segregating_from_distinct(set: &IndexSet<u8>) -> Option<Segregating> {
    (set.len() == 2).then(|| Segregating([set[0], set[1]]))
}

/// Classifies a record according to a layout.
///
/// Classification is pure: the same record and layout always give the same result.
///
/// # Errors
///
/// If the number of alleles in the record does not match the layout, or if the ancestral allele is
/// not among the segregating alleles.
pub fn classify(record: &Record<'_>, layout: &Layout) -> Result<Classification, ClassifyError> {
    let alleles = record.alleles;

    if alleles.len() != layout.allele_total() {
        return Err(ClassifyError::AlleleCountMismatch {
            locus: record.locus(),
            found: alleles.len(),
            expected: layout.allele_total(),
        });
    }

    let ancestral = ancestral(alleles, layout.outgroup());
    let set = distinct(alleles);
    let segregating = segregating_from_distinct(&set);

    let derived = match (ancestral, segregating) {
        (Some(ancestral), Some(segregating)) => Some(segregating.other(ancestral).ok_or(
            ClassifyError::AmbiguousDerivedAllele {
                locus: record.locus(),
                ancestral,
                segregating,
            },
        )?),
        _ => None,
    };

    Ok(Classification {
        ancestral,
        segregating,
        derived,
        invariant: record.invariant,
        distinct: set.len(),
    })
}

/// An error associated with classifying a record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ClassifyError {
    /// The number of alleles does not match the layout.
    AlleleCountMismatch {
        /// Location of the record.
        locus: Locus,
        /// Number of alleles in the record.
        found: usize,
        /// Number of alleles expected by the layout.
        expected: usize,
    },
    /// The ancestral allele is not one of the segregating alleles, so the derived allele is
    /// undetermined.
    AmbiguousDerivedAllele {
        /// Location of the record.
        locus: Locus,
        /// The ancestral allele.
        ancestral: u8,
        /// The segregating alleles.
        segregating: Segregating,
    },
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifyError::AlleleCountMismatch {
                locus,
                found,
                expected,
            } => write!(f, "{locus} has {found} alleles, expected {expected}"),
            ClassifyError::AmbiguousDerivedAllele {
                locus,
                ancestral,
                segregating,
            } => write!(
                f,
                "{locus} has ancestral allele '{}' not among segregating alleles {segregating}",
                char::from(*ancestral)
            ),
        }
    }
}

impl std::error::Error for ClassifyError {}
