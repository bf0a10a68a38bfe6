use std::io::BufRead;

use crate::error::{ParseError, Result};

/// Read counts from a `samtools flagstat` report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagstatRecord {
    pub total: u64,
    pub mapped: u64,
}

impl FlagstatRecord {
    pub fn new(total: u64, mapped: u64) -> Self {
        Self { total, mapped }
    }

    /// Parses a flagstat report.
    ///
    /// The total is the leading count of the first line. The mapped count is
    /// taken from the first line containing `mapped (` that is not the
    /// `primary mapped` line, and is 0 if no such line exists.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines();

        let first = match lines.next() {
            Some(line) => line?,
            None => return Err(ParseError::Empty("flagstat report".to_string())),
        };
        let total = leading_count(&first, 1)?;

        let mut mapped = 0;
        for (idx, line) in lines.enumerate() {
            let line = line?;
            if line.contains("mapped (") && !line.contains("primary") {
                mapped = leading_count(&line, idx + 2)?;
                break;
            }
        }

        Ok(Self { total, mapped })
    }

    pub fn mapping_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.mapped as f64 / self.total as f64 * 100.0
        }
    }

    pub fn mapping_rate_string(&self) -> String {
        format!("{:.2}", self.mapping_rate())
    }
}

fn leading_count(line: &str, line_number: usize) -> Result<u64> {
    let token = line
        .split_whitespace()
        .next()
        .ok_or_else(|| ParseError::MalformedRow {
            line: line_number,
            reason: "empty line where a read count was expected".to_string(),
        })?;

    token.parse().map_err(|_| ParseError::MalformedRow {
        line: line_number,
        reason: format!("'{}' is not a read count", token),
    })
}
