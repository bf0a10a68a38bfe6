use clap::{Parser, Subcommand};

use crate::{
    alignment_stats::AlignmentStatsArgs, chip_vs_rna::ChipVsRnaArgs,
    correlation::CorrelationArgs, enrichment::EnrichmentArgs, peak_overlap::PeakOverlapArgs,
    peak_stats::PeakStatsArgs, promoter_genes::PromoterGenesArgs,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read counts and mapping rates from samtools flagstat reports.
    AlignmentStats(AlignmentStatsArgs),
    /// Overlap between two replicate peak sets.
    PeakOverlap(PeakOverlapArgs),
    /// Peak score and TSS distance statistics, and ChIP/RNA-seq candidate genes.
    PeakStats(PeakStatsArgs),
    /// Gene list of promoter-bound peaks, for enrichment analysis.
    PromoterGenes(PromoterGenesArgs),
    /// Fraction of differentially expressed genes with a nearby peak.
    ChipVsRna(ChipVsRnaArgs),
    /// Replicate and IP/INPUT correlations from a sample correlation matrix.
    Correlation(CorrelationArgs),
    /// Top enriched pathways from Enrichr result tables.
    Enrichment(EnrichmentArgs),
}
