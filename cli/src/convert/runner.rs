use std::io;

use anyhow::{Context, Error};

use msmc2sfs_core::{
    input::{record, ReadStatus},
    site::{Classification, Skipped},
    Accumulator, Input, Layout, Record, Spectrum,
};

use super::Convert;

pub struct Runner {
    reader: record::Reader<Box<dyn io::BufRead>>,
    accumulator: Accumulator,
    summary: Summary,
}

impl Runner {
    pub fn new(reader: Box<dyn io::BufRead>, layout: Layout) -> Self {
        Self {
            reader: record::Reader::new(reader),
            accumulator: Accumulator::new(layout),
            summary: Summary::default(),
        }
    }

    pub fn run(mut self) -> Result<Spectrum, Error> {
        log::debug!("Using layout with {}", self.accumulator.layout());

        loop {
            match self.reader.read_record() {
                ReadStatus::Read(record) => {
                    let classification = self.accumulator.ingest(&record)?;
                    self.summary.add(&record, &classification);
                }
                ReadStatus::Error(e) => Err(e)?,
                ReadStatus::Done => break,
            }
        }

        let spectrum = self.accumulator.into_spectrum();
        self.summary.log(&spectrum);

        Ok(spectrum)
    }
}

impl TryFrom<&Convert> for Runner {
    type Error = Error;

    fn try_from(args: &Convert) -> Result<Self, Self::Error> {
        let layout = Layout::new(args.allele_total, args.outgroup.clone())?;

        let input = Input::new(args.input.clone())?;
        let reader = input.open_decompressed().with_context(|| match input.as_path() {
            Some(path) => format!(
                "Failed to open MSMC2 file from provided path '{}'",
                path.display()
            ),
            None => String::from("Failed to read MSMC2 input from stdin"),
        })?;

        Ok(Self::new(reader, layout))
    }
}

#[derive(Clone, Debug, Default)]
struct Summary {
    records: usize,
    counted: usize,
    skipped: [usize; Skipped::N],
}

impl Summary {
    fn add(&mut self, record: &Record<'_>, classification: &Classification) {
        self.records += 1;

        match classification.skipped() {
            Some(reason) => {
                log::trace!("Skipping record at {} due to {reason}.", record.locus());

                self.skipped[reason as u8 as usize] += 1;
            }
            None => self.counted += 1,
        }
    }

    fn log(&self, spectrum: &Spectrum) {
        log::info!(
            "Read {} records, of which {} were counted in the SFS.",
            self.records,
            self.counted
        );

        log::info!(
            "SFS contains {} segregating sites.",
            spectrum.segregating_sites()
        );

        for reason in Skipped::VARIANTS {
            let count = self.skipped[reason as u8 as usize];

            if count > 0 {
                log::info!("Skipped {count} records due to {reason}.");
            }
        }

        if spectrum[0] < 0 {
            log::warn!(
                "Invariant site count is negative ({}), since some counted records report \
                fewer than one invariant site.",
                spectrum[0]
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(src: &'static str, allele_total: usize, outgroup: &[usize]) -> Result<Spectrum, Error> {
        let layout = Layout::new(allele_total, outgroup.to_vec())?;

        Runner::new(Box::new(src.as_bytes()), layout).run()
    }

    #[test]
    fn test_run() -> Result<(), Error> {
        let src = "8\t264084\t63\tTTAAA\n8\t264084\t63\tTTATA\n";

        assert_eq!(run(src, 5, &[0, 1])?.as_slice(), &[124, 0, 1, 1]);

        Ok(())
    }

    #[test]
    fn test_run_skips_unusable_records() -> Result<(), Error> {
        let src = "1 10 4 TTAAA\n1 20 9 TAAAA\n1 30 9 TTTTT\n\n1 40 9 TTACA\n1 50 2 TTTTA\n";

        assert_eq!(run(src, 5, &[0, 1])?.as_slice(), &[4, 1, 0, 1]);

        Ok(())
    }

    #[test]
    fn test_run_empty() -> Result<(), Error> {
        assert_eq!(run("", 5, &[0, 1])?.as_slice(), &[0, 0, 0, 0]);

        Ok(())
    }

    #[test]
    fn test_run_too_many_columns() {
        let result = run("1       8       264084  63      TAAA\n", 5, &[0, 1]);

        assert_eq!(
            result.unwrap_err().to_string(),
            "chromosome 1 position 8 has too many columns"
        );
    }

    #[test]
    fn test_run_allele_count_mismatch() {
        let result = run("8 264084 63 TTAAA\n8       264084  63      TAAA\n", 5, &[0, 1]);

        assert_eq!(
            result.unwrap_err().to_string(),
            "chromosome 8 position 264084 has 4 alleles, expected 5"
        );
    }

    #[test]
    fn test_summary_counts() {
        let layout = Layout::new(5, vec![0, 1]).unwrap();
        let mut accumulator = Accumulator::new(layout);
        let mut summary = Summary::default();

        for line in ["1 1 1 TTAAA", "1 2 1 TAAAA", "1 3 1 TAAAA", "1 4 1 TTCGA"] {
            let record = Record::parse(line).unwrap();
            let classification = accumulator.ingest(&record).unwrap();
            summary.add(&record, &classification);
        }

        assert_eq!(summary.records, 4);
        assert_eq!(summary.counted, 1);
        assert_eq!(summary.skipped, [2, 0, 1]);
    }
}
