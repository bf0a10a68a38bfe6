use anyhow::Result;
use chipseq::{
    AnnotatedPeak, AnnotationCategory, Description, ExpressionRecord, Regulation,
    SignificanceThresholds,
};
use log::info;
use std::collections::BTreeMap;
use tabled::{settings::Style, Table, Tabled};

use crate::{
    data_load::{load_annotated_peaks, load_expression},
    utils::{format_scientific, format_thousands, format_thousands_signed, print_section},
};

pub mod args;
pub mod candidates;

pub use args::PeakStatsArgs;
use candidates::{
    join_candidates, promoter_peaks, significant_genes, top_down_regulated, GeneReport,
};

#[derive(Tabled)]
struct PeakPreviewRow {
    #[tabled(rename = "Gene Name")]
    gene: String,
    #[tabled(rename = "Peak Score")]
    score: String,
    #[tabled(rename = "Distance to TSS")]
    distance: String,
    #[tabled(rename = "Annotation")]
    annotation: String,
}

impl From<&AnnotatedPeak> for PeakPreviewRow {
    fn from(peak: &AnnotatedPeak) -> Self {
        Self {
            gene: peak.trimmed_gene_name().unwrap_or("NA").to_string(),
            score: fmt_optional(peak.score(), |s| format!("{:.2}", s)),
            distance: fmt_optional(peak.distance_to_tss, |d| d.to_string()),
            annotation: peak.annotation.clone().unwrap_or_else(|| "NA".to_string()),
        }
    }
}

fn fmt_optional<T>(value: Option<T>, f: impl Fn(T) -> String) -> String {
    value.map(f).unwrap_or_else(|| "NA".to_string())
}

fn location(peak: &AnnotatedPeak) -> String {
    format!(
        "{}:{}-{}",
        peak.interval.chrom,
        format_thousands(peak.interval.start),
        format_thousands(peak.interval.end)
    )
}

fn print_description(name: &str, values: &[f64]) {
    println!("\n{} statistics:", name);
    match Description::from_values(values) {
        Some(description) => {
            for (stat, value) in description.rows() {
                println!("{:<8}{:>16.6}", stat, value);
            }
        }
        None => println!("{:<8}{:>16}", "count", 0),
    }
}

/// Up to `n` gene names from each side of a join, to show why it came back empty.
pub fn sample_gene_names<'a>(
    peaks: &[&'a AnnotatedPeak],
    genes: &[&'a ExpressionRecord],
    n: usize,
) -> (Vec<&'a str>, Vec<&'a str>) {
    let peak_names = peaks
        .iter()
        .copied()
        .filter_map(|peak| peak.trimmed_gene_name())
        .take(n)
        .collect();
    let gene_names = genes
        .iter()
        .map(|&gene| gene.gene_name.trim())
        .take(n)
        .collect();
    (peak_names, gene_names)
}

/// First `max_chars` characters, with `...` appended when cut.
pub fn description_preview(description: &str, max_chars: usize) -> String {
    let mut preview: String = description.chars().take(max_chars).collect();
    if description.chars().count() > max_chars {
        preview.push_str("...");
    }
    preview
}

/// Number of peaks per annotation category, most frequent first.
pub fn category_counts(peaks: &[AnnotatedPeak]) -> Vec<(AnnotationCategory, usize)> {
    let mut counts: BTreeMap<AnnotationCategory, usize> = BTreeMap::new();
    for peak in peaks {
        *counts.entry(peak.category()).or_default() += 1;
    }

    let mut counts: Vec<(AnnotationCategory, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub fn peak_stats(args: PeakStatsArgs) -> Result<()> {
    info!("Running chiprepro 'peak-stats'");
    let thresholds = SignificanceThresholds::new(args.alpha, args.min_log2_fold_change);

    let genes = load_expression(&args.rnaseq)?;
    let peaks = load_annotated_peaks(&args.peaks)?;

    print_section("PEAKS STATISTICS");
    println!("Total peaks: {}", peaks.len());
    println!("Total genes in RNA-seq: {}", genes.len());

    let scores: Vec<f64> = peaks.iter().filter_map(AnnotatedPeak::score).collect();
    let distances: Vec<f64> = peaks
        .iter()
        .filter_map(|peak| peak.distance_to_tss.map(|d| d as f64))
        .collect();
    print_description("Peak Score", &scores);
    print_description("Distance to TSS", &distances);

    println!("\nFirst 5 peaks:");
    let preview: Vec<PeakPreviewRow> = peaks.iter().take(5).map(PeakPreviewRow::from).collect();
    let mut table = Table::new(&preview);
    table.with(Style::blank());
    println!("{table}");

    println!("\nAnnotation categories:");
    for (category, count) in category_counts(&peaks) {
        println!(
            "  {:<14}{:>8} ({:.1}%)",
            category.to_string(),
            count,
            chipseq::percentage(count, peaks.len())
        );
    }

    let significant = significant_genes(&genes, &thresholds);
    let up = significant
        .iter()
        .filter(|g| g.regulation(&thresholds) == Regulation::Up)
        .count();
    println!("\nSignificant DE genes: {}", significant.len());
    println!("  Up-regulated: {}", up);
    println!("  Down-regulated: {}", significant.len() - up);

    print_section("FINDING CANDIDATES");
    let promoter = promoter_peaks(&peaks, args.tss_window, args.min_score);
    println!(
        "Promoter peaks (within {} bp of TSS): {}",
        format_thousands(args.tss_window.unsigned_abs()),
        promoter.len()
    );

    let candidates = join_candidates(&promoter, &significant);
    println!("Genes with both peaks and significant DE: {}", candidates.len());

    if candidates.is_empty() {
        let (peak_names, gene_names) = sample_gene_names(&promoter, &significant, 10);
        println!("\nNo overlap found. Sample gene names from peaks:");
        println!("{:?}", peak_names);
        println!("\nSample gene names from RNA-seq:");
        println!("{:?}", gene_names);
    } else {
        print_section(&format!("TOP {} CANDIDATES (Down-regulated)", args.top));
        let (shown, fallback) = top_down_regulated(&candidates, &thresholds, args.top);
        if fallback {
            println!("No down-regulated candidates found. Showing all candidates:");
        }

        for (rank, candidate) in shown.iter().enumerate() {
            let peak = candidate.peak;
            let expression = candidate.expression;
            println!("\n{}. Gene: {}", rank + 1, expression.gene_name.trim());
            println!("   Location: {}", location(peak));
            println!(
                "   Peak Score: {}",
                fmt_optional(peak.score(), |s| format!("{:.2}", s))
            );
            println!(
                "   Distance to TSS: {} bp",
                fmt_optional(peak.distance_to_tss, format_thousands_signed)
            );
            println!(
                "   log2 Fold Change: {}",
                fmt_optional(expression.log2_fold_change, |v| format!("{:.2}", v))
            );
            println!(
                "   Adjusted p-value: {}",
                fmt_optional(expression.padj, format_scientific)
            );
            println!("   Annotation: {}", peak.annotation.as_deref().unwrap_or("NA"));
            if let Some(description) = peak.gene_description.as_deref() {
                println!("   Description: {}", description_preview(description, 100));
            }
        }
    }

    print_section(&format!("GENES OF INTEREST ({})", args.genes.join(", ")));
    for gene in &args.genes {
        let report = GeneReport::new(gene, &peaks, &genes, &thresholds);
        println!("\n{}:", report.gene);

        match report.best_peak {
            Some(peak) => {
                println!("  Found {} peak(s)", report.peak_count);
                println!("  Location: {}", location(peak));
                println!(
                    "  Peak Score: {}",
                    fmt_optional(peak.score(), |s| format!("{:.2}", s))
                );
                println!(
                    "  Distance to TSS: {} bp",
                    fmt_optional(peak.distance_to_tss, format_thousands_signed)
                );
                println!(
                    "  Annotation: {}",
                    peak.annotation.as_deref().unwrap_or("NA")
                );
            }
            None => println!("  No peaks found"),
        }

        match report.expression {
            Some(expression) => {
                println!("  Found in RNA-seq");
                println!(
                    "  log2 Fold Change: {}",
                    fmt_optional(expression.log2_fold_change, |v| format!("{:.2}", v))
                );
                println!(
                    "  Adjusted p-value: {}",
                    fmt_optional(expression.padj, format_scientific)
                );
                println!(
                    "  Significant DE: {}",
                    if report.significant { "YES" } else { "NO" }
                );
                if report.is_good_candidate() {
                    println!("  >>> GOOD CANDIDATE <<<");
                }
            }
            None => println!("  Not found in RNA-seq"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chipseq::GenomicInterval;

    fn peak(annotation: &str) -> AnnotatedPeak {
        AnnotatedPeak::new(
            GenomicInterval::new("chr1", 0, 10),
            None,
            None,
            Some(annotation.to_string()),
        )
    }

    #[test]
    fn test_category_counts() {
        let peaks = vec![
            peak("intron (NM_004347, intron 2 of 8)"),
            peak("Intergenic"),
            peak("intron (NM_001754, intron 1 of 5)"),
            peak("promoter-TSS (NM_001754)"),
        ];

        let counts = category_counts(&peaks);
        assert_eq!(counts[0], (AnnotationCategory::Intron, 2));
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_sample_gene_names() {
        let peaks = vec![
            AnnotatedPeak::new(GenomicInterval::new("chr1", 0, 10), Some(" ACTB ".to_string()), None, None),
            AnnotatedPeak::new(GenomicInterval::new("chr1", 20, 30), None, None, None),
            AnnotatedPeak::new(GenomicInterval::new("chr2", 0, 10), Some("GAPDH".to_string()), None, None),
        ];
        let genes = vec![
            ExpressionRecord::new("TP53", Some(-2.0), Some(0.001)),
            ExpressionRecord::new("MYC", Some(3.0), Some(0.001)),
        ];
        let peak_refs: Vec<&AnnotatedPeak> = peaks.iter().collect();
        let gene_refs: Vec<&ExpressionRecord> = genes.iter().collect();

        let (peak_names, gene_names) = sample_gene_names(&peak_refs, &gene_refs, 1);
        assert_eq!(peak_names, vec!["ACTB"]);
        assert_eq!(gene_names, vec!["TP53"]);

        let (peak_names, _) = sample_gene_names(&peak_refs, &gene_refs, 10);
        assert_eq!(peak_names, vec!["ACTB", "GAPDH"]);
    }

    #[test]
    fn test_description_preview() {
        assert_eq!(description_preview("fibronectin 1", 100), "fibronectin 1");
        assert_eq!(description_preview("runt-related", 4), "runt...");
        assert_eq!(description_preview("ü", 1), "ü");
    }

    #[test]
    fn test_peak_preview_row() {
        let row = PeakPreviewRow::from(&AnnotatedPeak::new(
            GenomicInterval::new("chr21", 34_787_000, 34_787_400).with_score(12.346),
            Some("RUNX1 ".to_string()),
            Some(-1_250),
            None,
        ));
        assert_eq!(row.gene, "RUNX1");
        assert_eq!(row.score, "12.35");
        assert_eq!(row.distance, "-1250");
        assert_eq!(row.annotation, "NA");
    }
}
