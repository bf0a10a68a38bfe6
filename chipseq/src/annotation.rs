use std::{collections::BTreeSet, fmt::Display};

use ahash::AHashSet;
use regex::{Regex, RegexBuilder};

use crate::interval::GenomicInterval;

/// Keywords marking a peak as inside a gene body in HOMER annotations.
pub const GENE_BODY_KEYWORDS: [&str; 6] = ["promoter", "exon", "intron", "5", "3", "UTR"];

/// Coarse genomic feature class of a HOMER `Annotation` string, e.g.
/// `promoter-TSS (NM_001754)` or `intron (NM_004347, intron 2 of 8)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnnotationCategory {
    Promoter,
    FivePrimeUtr,
    Exon,
    Intron,
    ThreePrimeUtr,
    Tts,
    NonCoding,
    Intergenic,
    Other,
    Unknown,
}

impl AnnotationCategory {
    pub fn from_annotation(annotation: Option<&str>) -> Self {
        let Some(text) = annotation.map(str::trim).filter(|t| !t.is_empty()) else {
            return AnnotationCategory::Unknown;
        };
        let text = text.to_lowercase();

        if text.starts_with("promoter") {
            AnnotationCategory::Promoter
        } else if text.starts_with("5' utr") {
            AnnotationCategory::FivePrimeUtr
        } else if text.starts_with("exon") {
            AnnotationCategory::Exon
        } else if text.starts_with("intron") {
            AnnotationCategory::Intron
        } else if text.starts_with("3' utr") {
            AnnotationCategory::ThreePrimeUtr
        } else if text.starts_with("tts") {
            AnnotationCategory::Tts
        } else if text.starts_with("non-coding") {
            AnnotationCategory::NonCoding
        } else if text.starts_with("intergenic") {
            AnnotationCategory::Intergenic
        } else {
            AnnotationCategory::Other
        }
    }
}

impl Display for AnnotationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AnnotationCategory::Promoter => "promoter-TSS",
            AnnotationCategory::FivePrimeUtr => "5' UTR",
            AnnotationCategory::Exon => "exon",
            AnnotationCategory::Intron => "intron",
            AnnotationCategory::ThreePrimeUtr => "3' UTR",
            AnnotationCategory::Tts => "TTS",
            AnnotationCategory::NonCoding => "non-coding",
            AnnotationCategory::Intergenic => "Intergenic",
            AnnotationCategory::Other => "other",
            AnnotationCategory::Unknown => "NA",
        };
        write!(f, "{}", label)
    }
}

/// A peak with its nearest-gene annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedPeak {
    pub interval: GenomicInterval,
    pub gene_name: Option<String>,
    pub distance_to_tss: Option<i64>,
    pub annotation: Option<String>,
    pub gene_description: Option<String>,
}

impl AnnotatedPeak {
    pub fn new(
        interval: GenomicInterval,
        gene_name: Option<String>,
        distance_to_tss: Option<i64>,
        annotation: Option<String>,
    ) -> Self {
        Self {
            interval,
            gene_name,
            distance_to_tss,
            annotation,
            gene_description: None,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.gene_description = description.filter(|d| !d.trim().is_empty());
        self
    }

    pub fn score(&self) -> Option<f64> {
        self.interval.score
    }

    /// Gene name with surrounding whitespace removed; `None` when blank.
    pub fn trimmed_gene_name(&self) -> Option<&str> {
        self.gene_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn category(&self) -> AnnotationCategory {
        AnnotationCategory::from_annotation(self.annotation.as_deref())
    }

    pub fn is_promoter(&self) -> bool {
        self.annotation
            .as_deref()
            .is_some_and(|a| a.to_lowercase().contains("promoter"))
    }

    /// Missing distances are never within a window.
    pub fn within_tss(&self, window: i64) -> bool {
        self.distance_to_tss
            .is_some_and(|d| d.unsigned_abs() <= window.unsigned_abs())
    }
}

/// Deduplicated, alphabetically sorted gene names of promoter peaks.
pub fn promoter_genes(peaks: &[AnnotatedPeak]) -> Vec<String> {
    peaks
        .iter()
        .filter(|peak| peak.is_promoter())
        .filter_map(|peak| peak.trimmed_gene_name().map(String::from))
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// Genes with at least one peak within `window` bp of their TSS.
pub fn genes_within_tss(peaks: &[AnnotatedPeak], window: i64) -> AHashSet<String> {
    peaks
        .iter()
        .filter(|peak| peak.within_tss(window))
        .filter_map(|peak| peak.trimmed_gene_name().map(String::from))
        .collect()
}

/// Matches peaks lying in or near a gene body: the annotation mentions any
/// of the keywords (case-insensitive), or the peak is within `max_distance`
/// of the TSS.
pub struct GeneBodyRule {
    pattern: Regex,
    max_distance: i64,
}

impl GeneBodyRule {
    pub fn new<S: AsRef<str>>(keywords: &[S], max_distance: i64) -> Result<Self, regex::Error> {
        let alternation = keywords
            .iter()
            .map(|k| regex::escape(k.as_ref()))
            .collect::<Vec<String>>()
            .join("|");

        let pattern = RegexBuilder::new(&alternation)
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            pattern,
            max_distance,
        })
    }

    pub fn with_default_keywords(max_distance: i64) -> Result<Self, regex::Error> {
        Self::new(&GENE_BODY_KEYWORDS[..], max_distance)
    }

    pub fn matches(&self, peak: &AnnotatedPeak) -> bool {
        let keyword_hit = peak
            .annotation
            .as_deref()
            .is_some_and(|a| self.pattern.is_match(a));

        keyword_hit || peak.within_tss(self.max_distance)
    }

    pub fn genes(&self, peaks: &[AnnotatedPeak]) -> AHashSet<String> {
        peaks
            .iter()
            .filter(|peak| self.matches(peak))
            .filter_map(|peak| peak.trimmed_gene_name().map(String::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peak(gene: Option<&str>, distance: Option<i64>, annotation: Option<&str>) -> AnnotatedPeak {
        AnnotatedPeak::new(
            GenomicInterval::new("chr1", 100, 200),
            gene.map(String::from),
            distance,
            annotation.map(String::from),
        )
    }

    #[test]
    fn test_category_parsing() {
        let cases = [
            (Some("promoter-TSS (NM_001754)"), AnnotationCategory::Promoter),
            (Some("Promoter"), AnnotationCategory::Promoter),
            (Some("intron (NM_004347, intron 2 of 8)"), AnnotationCategory::Intron),
            (Some("exon (NM_002026, exon 3 of 46)"), AnnotationCategory::Exon),
            (Some("5' UTR (NM_001754, exon 1 of 8)"), AnnotationCategory::FivePrimeUtr),
            (Some("3' UTR (NM_001754, exon 8 of 8)"), AnnotationCategory::ThreePrimeUtr),
            (Some("TTS (NM_001754)"), AnnotationCategory::Tts),
            (Some("non-coding (NR_002819, exon 1 of 1)"), AnnotationCategory::NonCoding),
            (Some("Intergenic"), AnnotationCategory::Intergenic),
            (Some("satellite"), AnnotationCategory::Other),
            (Some("  "), AnnotationCategory::Unknown),
            (None, AnnotationCategory::Unknown),
        ];

        for (text, expected) in cases {
            assert_eq!(AnnotationCategory::from_annotation(text), expected, "{:?}", text);
        }
    }

    #[test]
    fn test_promoter_genes_sorted_unique_non_empty() {
        let peaks = vec![
            peak(Some("RUNX1 "), Some(-20), Some("promoter-TSS (NM_001754)")),
            peak(Some("RUNX1"), Some(300), Some("Promoter-TSS (NM_001122607)")),
            peak(Some("BMP2"), Some(10), Some("PROMOTER-TSS (NM_001200)")),
            peak(Some("   "), Some(10), Some("promoter-TSS (NR_1)")),
            peak(None, Some(10), Some("promoter-TSS (NR_2)")),
            peak(Some("FN1"), Some(40_000), Some("intron (NM_002026, intron 2 of 45)")),
            peak(Some("ACTB"), Some(0), None),
            peak(Some("ABCA1"), Some(50), Some("promoter-TSS (NM_005502)")),
        ];

        assert_eq!(promoter_genes(&peaks), vec!["ABCA1", "BMP2", "RUNX1"]);
    }

    #[test]
    fn test_genes_within_tss() {
        let peaks = vec![
            peak(Some("MALAT1"), Some(-5000), Some("promoter-TSS")),
            peak(Some("NEAT1"), Some(5001), Some("intron")),
            peak(Some("FN1"), None, Some("exon")),
        ];

        let genes = genes_within_tss(&peaks, 5000);
        assert_eq!(genes.len(), 1);
        assert!(genes.contains("MALAT1"));
    }

    #[test]
    fn test_within_tss_extreme_distances() {
        assert!(peak(None, Some(-5000), None).within_tss(5000));
        assert!(!peak(None, Some(i64::MIN), None).within_tss(5000));
        assert!(!peak(None, Some(i64::MAX), None).within_tss(i64::MAX - 1));
        assert!(peak(None, Some(i64::MIN + 1), None).within_tss(i64::MAX));
    }

    #[test]
    fn test_blank_description_is_dropped() {
        let described = peak(Some("FN1"), None, None).with_description(Some("fibronectin 1".into()));
        assert_eq!(described.gene_description.as_deref(), Some("fibronectin 1"));

        let blank = peak(Some("FN1"), None, None).with_description(Some("  ".into()));
        assert_eq!(blank.gene_description, None);
    }

    #[test]
    fn test_gene_body_rule() -> Result<(), regex::Error> {
        let rule = GeneBodyRule::with_default_keywords(20_000)?;

        assert!(rule.matches(&peak(Some("A"), Some(90_000), Some("Intron (NM_1, intron 1 of 3)"))));
        assert!(rule.matches(&peak(Some("B"), None, Some("3' UTR (NM_2)"))));
        assert!(rule.matches(&peak(Some("C"), Some(-19_999), Some("Intergenic"))));
        assert!(!rule.matches(&peak(Some("D"), Some(25_000), Some("Intergenic"))));
        assert!(!rule.matches(&peak(Some("E"), None, None)));

        let genes = rule.genes(&[
            peak(Some("A"), Some(90_000), Some("intron")),
            peak(Some("D"), Some(25_000), Some("Intergenic")),
        ]);
        assert_eq!(genes.len(), 1);
        assert!(genes.contains("A"));
        Ok(())
    }

    #[test]
    fn test_keywords_are_literal() -> Result<(), regex::Error> {
        let rule = GeneBodyRule::new(&["5'"][..], 0)?;
        assert!(rule.matches(&peak(None, None, Some("5' UTR"))));
        assert!(!rule.matches(&peak(None, None, Some("50 UTR"))));
        Ok(())
    }
}
