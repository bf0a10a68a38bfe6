use ahash::AHashMap;
use chipseq::{AnnotatedPeak, ExpressionRecord, Regulation, SignificanceThresholds};
use std::cmp::Ordering;

/// A promoter peak joined with a significant DE result for the same gene.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub peak: &'a AnnotatedPeak,
    pub expression: &'a ExpressionRecord,
}

impl Candidate<'_> {
    pub fn abs_log2_fold_change(&self) -> f64 {
        self.expression.log2_fold_change.map_or(f64::NAN, f64::abs)
    }
}

/// Peaks within `tss_window` of a TSS with a score above `min_score`.
pub fn promoter_peaks(peaks: &[AnnotatedPeak], tss_window: i64, min_score: f64) -> Vec<&AnnotatedPeak> {
    peaks
        .iter()
        .filter(|peak| peak.within_tss(tss_window))
        .filter(|peak| peak.score().is_some_and(|score| score > min_score))
        .collect()
}

pub fn significant_genes<'a>(
    genes: &'a [ExpressionRecord],
    thresholds: &SignificanceThresholds,
) -> Vec<&'a ExpressionRecord> {
    genes
        .iter()
        .filter(|gene| gene.regulation(thresholds) != Regulation::NotSignificant)
        .collect()
}

// NaN sorts last.
fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}

/// Inner join of peaks and genes on the trimmed gene name, ordered by
/// absolute fold-change and then peak score, both descending.
pub fn join_candidates<'a>(
    peaks: &[&'a AnnotatedPeak],
    genes: &[&'a ExpressionRecord],
) -> Vec<Candidate<'a>> {
    let mut by_name: AHashMap<&str, Vec<&'a ExpressionRecord>> = AHashMap::new();
    for &gene in genes {
        by_name.entry(gene.gene_name.trim()).or_default().push(gene);
    }

    let mut candidates: Vec<Candidate<'a>> = peaks
        .iter()
        .copied()
        .filter_map(|peak| {
            let name = peak.trimmed_gene_name()?;
            by_name.get(name).map(|matches| (peak, matches))
        })
        .flat_map(|(peak, matches)| {
            matches.iter().map(move |&expression| Candidate { peak, expression })
        })
        .collect();

    candidates.sort_by(|a, b| {
        descending(a.abs_log2_fold_change(), b.abs_log2_fold_change()).then_with(|| {
            descending(
                a.peak.score().unwrap_or(f64::NAN),
                b.peak.score().unwrap_or(f64::NAN),
            )
        })
    });
    candidates
}

/// The first `top` down-regulated candidates. When there are none, the
/// first `top` candidates of any direction; the flag reports the fallback.
pub fn top_down_regulated<'a>(
    candidates: &[Candidate<'a>],
    thresholds: &SignificanceThresholds,
    top: usize,
) -> (Vec<Candidate<'a>>, bool) {
    let down: Vec<Candidate<'a>> = candidates
        .iter()
        .filter(|c| c.expression.regulation(thresholds) == Regulation::Down)
        .take(top)
        .copied()
        .collect();

    if down.is_empty() {
        (candidates.iter().take(top).copied().collect(), true)
    } else {
        (down, false)
    }
}

/// Peak and expression evidence for a single named gene.
#[derive(Debug)]
pub struct GeneReport<'a> {
    pub gene: String,
    pub peak_count: usize,
    pub best_peak: Option<&'a AnnotatedPeak>,
    pub expression: Option<&'a ExpressionRecord>,
    pub significant: bool,
}

impl<'a> GeneReport<'a> {
    pub fn new(
        gene: &str,
        peaks: &'a [AnnotatedPeak],
        genes: &'a [ExpressionRecord],
        thresholds: &SignificanceThresholds,
    ) -> Self {
        let gene_peaks: Vec<&AnnotatedPeak> = peaks
            .iter()
            .filter(|peak| peak.trimmed_gene_name() == Some(gene))
            .collect();

        let best_peak = gene_peaks.iter().copied().min_by(|a, b| {
            descending(a.score().unwrap_or(f64::NAN), b.score().unwrap_or(f64::NAN))
        });

        let expression = genes.iter().find(|record| record.gene_name.trim() == gene);
        let significant = expression.is_some_and(|record| {
            thresholds.is_significant(record.log2_fold_change, record.padj)
        });

        Self {
            gene: gene.to_string(),
            peak_count: gene_peaks.len(),
            best_peak,
            expression,
            significant,
        }
    }

    pub fn is_good_candidate(&self) -> bool {
        self.peak_count > 0 && self.significant
    }
}
