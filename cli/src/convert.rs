use std::path::PathBuf;

use anyhow::{Context, Error};

use clap::Args;

use msmc2sfs_core::spectrum;

mod runner;
use runner::Runner;

/// Create unfolded SFS from MSMC2 input.
#[derive(Args, Debug)]
pub struct Convert {
    /// Input MSMC2 file.
    ///
    /// If no file is provided, stdin will be used. Gzipped input is decompressed automatically.
    #[arg(long = "msmc2-file", visible_alias = "msmc2_file", value_name = "FILE")]
    input: Option<PathBuf>,

    /// Total number of alleles expected in the final column of each record.
    #[arg(
        short = 'n',
        long = "allele-total",
        visible_alias = "allele_total",
        value_name = "INT"
    )]
    allele_total: usize,

    /// Zero-based indices of the alleles to be treated as the outgroup.
    ///
    /// All outgroup alleles must match for a record to be counted in the SFS. Multiple
    /// space- or comma-separated indices can be provided.
    #[arg(
        short = 'g',
        long = "outgroup-index",
        visible_alias = "outgroup_index",
        required = true,
        num_args = 1..,
        value_delimiter = ',',
        value_name = "INT"
    )]
    outgroup: Vec<usize>,

    /// Output file.
    ///
    /// If no file is provided, the SFS is written to stdout.
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl Convert {
    pub fn run(self) -> Result<(), Error> {
        let runner = Runner::try_from(&self)?;

        let spectrum = runner.run()?;

        spectrum::io::write_to_path_or_stdout(self.output.as_ref(), &spectrum).with_context(|| {
            match &self.output {
                Some(path) => format!("Failed to write SFS to path '{}'", path.display()),
                None => String::from("Failed to write SFS to stdout"),
            }
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind as ClapErrorKind;

    use crate::tests::{parse_args, try_parse_args};

    #[test]
    fn test_parse_space_separated_outgroup() {
        let cli = parse_args("msmc2sfs --msmc2-file input.msmc --allele-total 5 -g 0 1");

        assert_eq!(cli.convert.outgroup, vec![0, 1]);
        assert_eq!(cli.convert.allele_total, 5);
        assert_eq!(
            cli.convert.input.as_deref(),
            Some(std::path::Path::new("input.msmc"))
        );
    }

    #[test]
    fn test_parse_comma_separated_outgroup() {
        let cli = parse_args("msmc2sfs -n 7 -g 0,2,4");

        assert_eq!(cli.convert.outgroup, vec![0, 2, 4]);
        assert!(cli.convert.input.is_none());
    }

    #[test]
    fn test_parse_underscore_aliases() {
        let cli = parse_args("msmc2sfs --msmc2_file in.txt --allele_total 4 --outgroup_index 3");

        assert_eq!(cli.convert.allele_total, 4);
        assert_eq!(cli.convert.outgroup, vec![3]);
    }

    #[test]
    fn test_outgroup_required() {
        let result = try_parse_args("msmc2sfs --allele-total 5");

        assert_eq!(
            result.unwrap_err().kind(),
            ClapErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_negative_outgroup_rejected() {
        let result = try_parse_args("msmc2sfs --allele-total 5 -g -1");

        assert!(result.is_err());
    }
}
