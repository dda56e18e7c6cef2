//! JSON Lines report writer.

use std::io::Write;

use reach_types::EntryReport;
use sha2::{Digest, Sha256};

use crate::error::OutputError;
use crate::fingerprint::OutputFingerprint;

/// Writes one [`EntryReport`] per line and hashes exactly the bytes written.
pub struct ReportWriter<W: Write> {
    out: W,
    hasher: Sha256,
    written: usize,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            hasher: Sha256::new(),
            written: 0,
        }
    }

    pub fn write(&mut self, report: &EntryReport) -> Result<(), OutputError> {
        let mut line = serde_json::to_vec(report)?;
        line.push(b'\n');
        self.out.write_all(&line)?;
        self.hasher.update(&line);
        self.written += 1;
        Ok(())
    }

    pub fn write_all<'a, I>(&mut self, reports: I) -> Result<(), OutputError>
    where
        I: IntoIterator<Item = &'a EntryReport>,
    {
        for report in reports {
            self.write(report)?;
        }
        Ok(())
    }

    /// Flush and return the fingerprint of everything written.
    pub fn finish(mut self) -> Result<OutputFingerprint, OutputError> {
        self.out.flush()?;
        Ok(OutputFingerprint {
            hash: hex::encode(self.hasher.finalize()),
            reports: self.written,
        })
    }
}
