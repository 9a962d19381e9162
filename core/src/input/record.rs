//! MSMC2 input records.
//!
//! Each line of an MSMC2 input consists of four whitespace-separated columns: the chromosome, the
//! position, the number of sites since the previous record (including the current one), and the
//! alleles observed at the current site, one byte per allele.

use std::{fmt, str::FromStr};

pub mod reader;
pub use reader::Reader;

const COLUMNS: usize = 4;

/// A single MSMC2 record borrowing from an input line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Record<'a> {
    /// Chromosome name, used verbatim.
    pub chromosome: &'a str,
    /// Position, used verbatim.
    pub position: &'a str,
    /// Number of sites summarised by the record, including the record site itself.
    pub invariant: i64,
    /// Alleles at the record site.
    pub alleles: &'a [u8],
}

impl<'a> Record<'a> {
    /// Parses a record from a single line of text.
    ///
    /// # Errors
    ///
    /// If the line does not have exactly four columns, or if the third column is not an integer.
    pub fn parse(line: &'a str) -> Result<Self, ParseRecordError> {
        let mut fields = line.split_ascii_whitespace();

        let mut columns = [""; COLUMNS];
        for (i, column) in columns.iter_mut().enumerate() {
            *column = fields
                .next()
                .ok_or(ParseRecordError::MissingColumns { found: i })?;
        }
        let [chromosome, position, invariant, alleles] = columns;

        if fields.next().is_some() {
            return Err(ParseRecordError::TooManyColumns {
                locus: Locus::new(chromosome, position),
            });
        }

        let invariant =
            i64::from_str(invariant).map_err(|_| ParseRecordError::InvalidInvariantCount {
                locus: Locus::new(chromosome, position),
                value: invariant.to_string(),
            })?;

        Ok(Self {
            chromosome,
            position,
            invariant,
            alleles: alleles.as_bytes(),
        })
    }

    /// Returns an owned copy of the record location.
    pub fn locus(&self) -> Locus {
        Locus::new(self.chromosome, self.position)
    }
}

/// The location of a record, as given in the input.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Locus {
    /// Chromosome name.
    pub chromosome: String,
    /// Position.
    pub position: String,
}

impl Locus {
    /// Creates a new locus.
    pub fn new<S, T>(chromosome: S, position: T) -> Self
    where
        S: ToString,
        T: ToString,
    {
        Self {
            chromosome: chromosome.to_string(),
            position: position.to_string(),
        }
    }
}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "chromosome {} position {}",
            self.chromosome, self.position
        )
    }
}

/// An error associated with parsing a record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseRecordError {
    /// Fewer than four columns.
    MissingColumns {
        /// Number of columns found.
        found: usize,
    },
    /// More than four columns.
    TooManyColumns {
        /// Location of the record.
        locus: Locus,
    },
    /// The invariant site count could not be parsed.
    InvalidInvariantCount {
        /// Location of the record.
        locus: Locus,
        /// The raw count column.
        value: String,
    },
}

impl fmt::Display for ParseRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseRecordError::MissingColumns { found } => {
                write!(f, "record has {found} columns, expected {COLUMNS}")
            }
            ParseRecordError::TooManyColumns { locus } => {
                write!(f, "{locus} has too many columns")
            }
            ParseRecordError::InvalidInvariantCount { locus, value } => {
                write!(f, "{locus} has invalid invariant site count '{value}'")
            }
        }
    }
}

impl std::error::Error for ParseRecordError {}
