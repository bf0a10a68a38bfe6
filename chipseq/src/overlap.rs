use ahash::AHashMap;

use crate::interval::GenomicInterval;

/// Returns true if `interval` overlaps at least one interval in `others`.
pub fn has_overlap(interval: &GenomicInterval, others: &[GenomicInterval]) -> bool {
    others.iter().any(|other| interval.overlaps(other))
}

/// Counts intervals in `a` with at least one overlapping interval in `b`.
///
/// Quadratic nested loop; each interval of `a` is counted at most once.
pub fn count_overlapping<'a, I>(a: I, b: &[GenomicInterval]) -> usize
where
    I: IntoIterator<Item = &'a GenomicInterval>,
{
    a.into_iter()
        .filter(|interval| has_overlap(interval, b))
        .count()
}

struct ChromIndex {
    starts: Vec<u64>,
    // Running maximum of `end` over intervals sorted by start.
    max_ends: Vec<u64>,
}

/// Per-chromosome index of intervals sorted by start offset.
///
/// Answers "does anything overlap `[start, end)`?" with one binary search:
/// among the intervals starting before `end`, an overlap exists iff the
/// largest end among them lies beyond `start`.
pub struct IntervalIndex {
    chroms: AHashMap<String, ChromIndex>,
}

impl IntervalIndex {
    pub fn build(intervals: &[GenomicInterval]) -> Self {
        let mut grouped: AHashMap<String, Vec<(u64, u64)>> = AHashMap::new();
        for interval in intervals {
            grouped
                .entry(interval.chrom.clone())
                .or_default()
                .push((interval.start, interval.end));
        }

        let chroms = grouped
            .into_iter()
            .map(|(chrom, mut ranges)| {
                ranges.sort_unstable();

                let mut starts = Vec::with_capacity(ranges.len());
                let mut max_ends = Vec::with_capacity(ranges.len());
                let mut running_max = 0;
                for (start, end) in ranges {
                    running_max = running_max.max(end);
                    starts.push(start);
                    max_ends.push(running_max);
                }

                (chrom, ChromIndex { starts, max_ends })
            })
            .collect();

        Self { chroms }
    }

    pub fn overlaps_any(&self, interval: &GenomicInterval) -> bool {
        let Some(index) = self.chroms.get(&interval.chrom) else {
            return false;
        };

        let candidates = index.starts.partition_point(|&start| start < interval.end);
        candidates > 0 && index.max_ends[candidates - 1] > interval.start
    }

    pub fn count_overlapping(&self, intervals: &[GenomicInterval]) -> usize {
        intervals
            .iter()
            .filter(|interval| self.overlaps_any(interval))
            .count()
    }
}

/// Sort-and-search equivalent of [`count_overlapping`].
pub fn count_overlapping_indexed(a: &[GenomicInterval], b: &[GenomicInterval]) -> usize {
    IntervalIndex::build(b).count_overlapping(a)
}

/// Directional overlap counts between two replicate peak sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapSummary {
    pub a_total: usize,
    pub b_total: usize,
    pub a_overlapping: usize,
    pub b_overlapping: usize,
}

impl OverlapSummary {
    pub fn new(a_total: usize, b_total: usize, a_overlapping: usize, b_overlapping: usize) -> Self {
        Self {
            a_total,
            b_total,
            a_overlapping,
            b_overlapping,
        }
    }

    pub fn a_only(&self) -> usize {
        self.a_total - self.a_overlapping
    }

    pub fn b_only(&self) -> usize {
        self.b_total - self.b_overlapping
    }

    pub fn a_overlap_pct(&self) -> f64 {
        percentage(self.a_overlapping, self.a_total)
    }

    pub fn b_overlap_pct(&self) -> f64 {
        percentage(self.b_overlapping, self.b_total)
    }

    /// Mean of the two directional counts, truncated.
    ///
    /// The two counts are not a set intersection: several peaks of one
    /// replicate may overlap a single peak of the other. This is only an
    /// approximation for a two-set diagram.
    pub fn averaged_intersection(&self) -> usize {
        (self.a_overlapping + self.b_overlapping) / 2
    }

    pub fn averaged_overlap(&self) -> f64 {
        (self.a_overlapping + self.b_overlapping) as f64 / 2.0
    }
}

/// `part / whole * 100`, or 0 for an empty whole.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
