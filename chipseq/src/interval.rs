use std::{fmt::Display, io::BufRead};

use crate::error::{ParseError, Result};

/// A chromosome-scoped half-open interval, as found in BED peak files.
///
/// `start < end` is not checked; callers loading untrusted files must
/// filter inverted intervals themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct GenomicInterval {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub score: Option<f64>,
}

impl GenomicInterval {
    pub fn new(chrom: &str, start: u64, end: u64) -> Self {
        Self {
            chrom: chrom.to_string(),
            start,
            end,
            score: None,
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Two intervals overlap iff they share a chromosome and
    /// `start1 < end2 && start2 < end1`.
    pub fn overlaps(&self, other: &GenomicInterval) -> bool {
        self.chrom == other.chrom && self.start < other.end && other.start < self.end
    }

    /// Parses one tab-delimited BED line. Returns `Ok(None)` for comment,
    /// blank and short (fewer than three columns) lines.
    pub fn from_bed_line(line: &str, line_number: usize) -> Result<Option<Self>> {
        let line = line.trim_end_matches('\r');
        if line.starts_with('#') || line.trim().is_empty() {
            return Ok(None);
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 3 {
            return Ok(None);
        }

        let start = parse_coordinate(fields[1], "start", line_number)?;
        let end = parse_coordinate(fields[2], "end", line_number)?;

        let mut interval = GenomicInterval::new(fields[0], start, end);
        // BED column 5; MACS narrowPeak files carry an integer score here.
        if let Some(score) = fields.get(4).and_then(|s| s.trim().parse::<f64>().ok()) {
            interval.score = Some(score);
        }

        Ok(Some(interval))
    }
}

fn parse_coordinate(field: &str, name: &str, line_number: usize) -> Result<u64> {
    field
        .trim()
        .parse::<u64>()
        .map_err(|_| ParseError::MalformedRow {
            line: line_number,
            reason: format!("invalid {} coordinate '{}'", name, field),
        })
}

impl Display for GenomicInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}

/// Reads every interval from a BED stream, skipping comments and short lines.
pub fn read_bed<R: BufRead>(reader: R) -> Result<Vec<GenomicInterval>> {
    let mut intervals = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(interval) = GenomicInterval::from_bed_line(&line, idx + 1)? {
            intervals.push(interval);
        }
    }

    Ok(intervals)
}
