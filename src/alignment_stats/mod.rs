use anyhow::{bail, Result};
use chipseq::FlagstatRecord;
use log::{info, warn};
use tabled::{settings::Style, Table, Tabled};

use crate::{
    data_load::load_flagstat,
    plot::draw_table,
    utils::{format_thousands, prepare_output, print_section, LabeledPath},
};

pub mod args;

pub use args::AlignmentStatsArgs;

#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct AlignmentRow {
    #[tabled(rename = "Sample")]
    pub sample: String,
    #[tabled(rename = "Total Reads")]
    pub total_reads: String,
    #[tabled(rename = "Mapped Reads")]
    pub mapped_reads: String,
    #[tabled(rename = "Mapping Rate (%)")]
    pub mapping_rate: String,
}

impl AlignmentRow {
    pub fn new(sample: &str, record: &FlagstatRecord) -> Self {
        Self {
            sample: sample.to_string(),
            total_reads: format_thousands(record.total),
            mapped_reads: format_thousands(record.mapped),
            mapping_rate: record.mapping_rate_string(),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.sample.clone(),
            self.total_reads.clone(),
            self.mapped_reads.clone(),
            self.mapping_rate.clone(),
        ]
    }
}

/// Loads every report that exists; missing reports are skipped with a warning.
pub fn collect_sample_stats(samples: &[LabeledPath]) -> Result<Vec<(String, FlagstatRecord)>> {
    let mut stats = Vec::with_capacity(samples.len());

    for sample in samples {
        if !sample.path.exists() {
            warn!("Warning: {:?} not found", sample.path);
            continue;
        }
        let record = load_flagstat(&sample.path)?;
        stats.push((sample.label.clone(), record));
    }

    Ok(stats)
}

/// Samples whose mapping rate is strictly below `min_mapping_rate`.
pub fn low_quality_samples(
    stats: &[(String, FlagstatRecord)],
    min_mapping_rate: f64,
) -> Vec<&(String, FlagstatRecord)> {
    stats
        .iter()
        .filter(|(_, record)| record.mapping_rate() < min_mapping_rate)
        .collect()
}

pub fn alignment_stats(args: AlignmentStatsArgs) -> Result<()> {
    info!("Running chiprepro 'alignment-stats'");
    prepare_output(&args.output, "svg")?;

    let samples = args.samples_or_default();
    let stats = collect_sample_stats(&samples)?;
    if stats.is_empty() {
        bail!("None of the {} flagstat reports were found", samples.len());
    }

    for (label, record) in low_quality_samples(&stats, args.min_mapping_rate) {
        warn!(
            "{}: mapping rate {:.2}% is below {:.0}%",
            label,
            record.mapping_rate(),
            args.min_mapping_rate
        );
    }

    let rows: Vec<AlignmentRow> = stats
        .iter()
        .map(|(label, record)| AlignmentRow::new(label, record))
        .collect();

    print_section("ALIGNMENT STATISTICS");
    let mut table = Table::new(&rows);
    table.with(Style::blank());
    println!("{table}");

    let cells: Vec<Vec<String>> = rows.iter().map(AlignmentRow::cells).collect();
    draw_table(
        &["Sample", "Total Reads", "Mapped Reads", "Mapping Rate (%)"],
        &cells,
        "Alignment Statistics",
        &args.output,
    )?;
    info!("Saved table as {:?}", args.output);

    Ok(())
}
