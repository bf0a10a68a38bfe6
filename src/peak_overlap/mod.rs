use anyhow::Result;
use chipseq::{
    count_overlapping, count_overlapping_indexed, percentage, GenomicInterval, OverlapSummary,
};
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use log::{info, warn};
use std::time::Instant;
use tabled::{settings::Style, Table, Tabled};

use crate::{
    data_load::load_peaks,
    plot::{draw_venn, VennCounts},
    utils::{format_thousands, prepare_output, print_section},
};

pub mod args;

pub use args::{OverlapMethod, PeakOverlapArgs};

#[derive(Debug, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Pair-wise count, reporting progress over `a`.
fn count_overlapping_with_progress(
    a: &[GenomicInterval],
    b: &[GenomicInterval],
    message: &str,
) -> Result<usize> {
    let pb = ProgressBar::new(a.len() as u64);
    pb.set_style(ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}",
    )?);
    pb.set_message(message.to_string());

    let count = count_overlapping(a.iter().progress_with(pb.clone()), b);
    pb.finish_and_clear();

    Ok(count)
}

pub fn summarize_overlap(
    rep1: &[GenomicInterval],
    rep2: &[GenomicInterval],
    method: OverlapMethod,
) -> Result<OverlapSummary> {
    let (rep1_overlapping, rep2_overlapping) = match method {
        OverlapMethod::Naive => (
            count_overlapping_with_progress(rep1, rep2, "Rep1 vs Rep2")?,
            count_overlapping_with_progress(rep2, rep1, "Rep2 vs Rep1")?,
        ),
        OverlapMethod::Sweep => (
            count_overlapping_indexed(rep1, rep2),
            count_overlapping_indexed(rep2, rep1),
        ),
    };

    Ok(OverlapSummary::new(
        rep1.len(),
        rep2.len(),
        rep1_overlapping,
        rep2_overlapping,
    ))
}

pub fn venn_counts(summary: &OverlapSummary) -> VennCounts {
    VennCounts {
        left_only: summary.a_only(),
        right_only: summary.b_only(),
        both: summary.averaged_intersection(),
    }
}

pub fn peak_overlap(args: PeakOverlapArgs) -> Result<()> {
    info!("Running chiprepro 'peak-overlap'");
    prepare_output(&args.output, "svg")?;

    let rep1 = load_peaks(&args.rep1)?;
    let rep2 = load_peaks(&args.rep2)?;

    let start = Instant::now();
    let summary = summarize_overlap(&rep1, &rep2, args.method)?;
    info!(
        "Counted overlaps ({:?}) in {}",
        args.method,
        humantime::format_duration(start.elapsed())
    );

    print_section("PEAK OVERLAP BETWEEN REPLICATES");
    println!("Rep1 peaks: {}", format_thousands(summary.a_total as u64));
    println!("Rep2 peaks: {}", format_thousands(summary.b_total as u64));
    println!(
        "Rep1 peaks overlapping Rep2: {} ({:.1}%)",
        format_thousands(summary.a_overlapping as u64),
        summary.a_overlap_pct()
    );
    println!(
        "Rep2 peaks overlapping Rep1: {} ({:.1}%)",
        format_thousands(summary.b_overlapping as u64),
        summary.b_overlap_pct()
    );
    println!("Rep1 only: {}", format_thousands(summary.a_only() as u64));
    println!("Rep2 only: {}", format_thousands(summary.b_only() as u64));
    println!(
        "Both (mean of the two directional counts, approximate): {}",
        format_thousands(summary.averaged_intersection() as u64)
    );

    let reproducible = if args.reproducible.exists() {
        Some(load_peaks(&args.reproducible)?.len())
    } else {
        warn!("Reproducible peaks not found at {:?}", args.reproducible);
        None
    };

    if let Some(count) = reproducible {
        let smaller = summary.a_total.min(summary.b_total);
        println!();
        println!("Reproducible peaks: {}", format_thousands(count as u64));
        println!(
            "  {:.1}% of the smaller replicate",
            percentage(count, smaller)
        );
        if summary.averaged_overlap() > 0.0 {
            println!(
                "  {:.1}% of the averaged overlap",
                count as f64 / summary.averaged_overlap() * 100.0
            );
        }
    }

    let mut notes = vec![
        format!(
            "Rep1: {} peaks ({:.1}% overlap)",
            format_thousands(summary.a_total as u64),
            summary.a_overlap_pct()
        ),
        format!(
            "Rep2: {} peaks ({:.1}% overlap)",
            format_thousands(summary.b_total as u64),
            summary.b_overlap_pct()
        ),
        "Overlap shown is the mean of both directional counts".to_string(),
    ];
    if let Some(count) = reproducible {
        notes.push(format!(
            "Reproducible peaks: {}",
            format_thousands(count as u64)
        ));
    }

    draw_venn(
        &venn_counts(&summary),
        ("IP Replicate 1", "IP Replicate 2"),
        "Peak Overlap Between Replicates",
        &notes,
        &args.output,
    )?;
    info!("Saved Venn diagram as {:?}", args.output);

    let rows = vec![
        SummaryRow {
            metric: "Rep1 peaks",
            value: format_thousands(summary.a_total as u64),
        },
        SummaryRow {
            metric: "Rep2 peaks",
            value: format_thousands(summary.b_total as u64),
        },
        SummaryRow {
            metric: "Rep1 overlapping Rep2",
            value: format_thousands(summary.a_overlapping as u64),
        },
        SummaryRow {
            metric: "Rep2 overlapping Rep1",
            value: format_thousands(summary.b_overlapping as u64),
        },
        SummaryRow {
            metric: "Reproducible peaks",
            value: reproducible
                .map(|count| format_thousands(count as u64))
                .unwrap_or_else(|| "N/A".to_string()),
        },
        SummaryRow {
            metric: "Rep1 overlap %",
            value: format!("{:.1}", summary.a_overlap_pct()),
        },
        SummaryRow {
            metric: "Rep2 overlap %",
            value: format!("{:.1}", summary.b_overlap_pct()),
        },
    ];

    print_section("SUMMARY");
    let mut table = Table::new(&rows);
    table.with(Style::blank());
    println!("{table}");

    Ok(())
}
