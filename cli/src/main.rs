#![deny(unsafe_code)]

use std::io::Write;

use anyhow::Error;

use clap::{ArgAction, Parser};

mod convert;
use convert::Convert;

const NAME: &str = env!("CARGO_BIN_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convert an MSMC2 file to an unfolded SFS using alleles from at least one outgroup.
#[derive(Debug, Parser)]
#[clap(name = NAME, version = VERSION, about)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    convert: Convert,

    /// Suppress log output.
    ///
    /// By default, information may be logged to stderr while running. Set this flag once to silence
    /// normal logging output, and set twice to silence warnings.
    #[arg(
        short = 'q',
        long,
        action = ArgAction::Count,
        global = true,
        conflicts_with = "verbose"
    )]
    quiet: u8,

    /// Log output verbosity.
    ///
    /// Set this flag once to show debug information, and set twice to show trace information.
    #[clap(short = 'v', long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Print CLI arguments for debugging.
    #[clap(long, hide = true, global = true)]
    debug: bool,
}

impl Cli {
    pub fn run(self) -> Result<(), Error> {
        if self.debug {
            eprintln!("{self:#?}");
        }

        let level = if self.quiet > 0 {
            match self.quiet {
                1 => log::LevelFilter::Warn,
                _ => log::LevelFilter::Off,
            }
        } else {
            match self.verbose {
                0 => log::LevelFilter::Info,
                1 => log::LevelFilter::Debug,
                _ => log::LevelFilter::Trace,
            }
        };

        match env_logger::Builder::new()
            .filter_level(level)
            .target(env_logger::Target::Stderr)
            .format(|buf, record| {
                let level = record.level().as_str().to_lowercase();
                let args = record.args();
                writeln!(buf, "[msmc2sfs {level:>5}] {args}")
            })
            .try_init()
        {
            Ok(()) => (),
            Err(e) => eprintln!("failed to setup logger: {e}"),
        }

        self.convert.run()
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.run() {
        Ok(()) => (),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::error::ErrorKind as ClapErrorKind;

    pub fn try_parse_args(cmd: &str) -> Result<Cli, clap::Error> {
        Parser::try_parse_from(cmd.split_whitespace())
    }

    pub fn parse_args(cmd: &str) -> Cli {
        try_parse_args(cmd).expect("failed to parse command")
    }

    #[test]
    fn test_no_args() {
        let result = try_parse_args("msmc2sfs");

        assert_eq!(
            result.unwrap_err().kind(),
            ClapErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_quiet_and_verbose_conflict() {
        let result = try_parse_args("msmc2sfs -q -v --allele-total 5 -g 0 1");

        assert_eq!(result.unwrap_err().kind(), ClapErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_verbosity_count() {
        let cli = parse_args("msmc2sfs -qq --allele-total 5 -g 0 1");

        assert_eq!(cli.quiet, 2);
        assert_eq!(cli.verbose, 0);
    }
}
