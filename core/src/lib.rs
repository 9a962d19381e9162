#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Unfolded site frequency spectra from MSMC2 input.
//!
//! This serves as the core library implementation for the `msmc2sfs` CLI, but can also be used as
//! a free-standing library.
//!
//! # Overview
//!
//! MSMC2 input lists one record per line, giving a chromosome, a position, the number of sites
//! summarised by the record, and the alleles observed at the record site. A [`Layout`] fixes the
//! number of alleles per record and marks some of them as outgroup alleles, which determine the
//! ancestral allele. An [`Accumulator`] classifies each [`Record`] and counts derived alleles into
//! an unfolded [`Spectrum`].
//!
//! # Example
//!
//! ```
//! use msmc2sfs_core::{input::Record, Accumulator, Layout};
//!
//! // Five alleles per record, the first two of which are outgroup alleles
//! let layout = Layout::new(5, vec![0, 1])?;
//! let mut accumulator = Accumulator::new(layout);
//!
//! for line in ["8 264084 63 TTAAA", "8 264084 63 TTATA"] {
//!     accumulator.ingest(&Record::parse(line)?)?;
//! }
//!
//! assert_eq!(accumulator.export().as_slice(), &[124, 0, 1, 1]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod input;
pub use input::{Input, Record};

pub mod layout;
pub use layout::Layout;

pub mod site;

pub mod spectrum;
pub use spectrum::{Accumulator, Spectrum};
