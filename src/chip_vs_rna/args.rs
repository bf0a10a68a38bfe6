use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct ChipVsRnaArgs {
    #[arg(
        long,
        default_value = "results/GSE75070_MCF7_shRUNX1_shNS_RNAseq_log2_foldchange.txt",
        help = "Differential expression table with genename, log2FoldChange and padj columns."
    )]
    pub rnaseq: PathBuf,

    #[arg(
        long,
        default_value = "results/homer/annotations/annotated_peaks.txt",
        help = "HOMER annotatePeaks output."
    )]
    pub peaks: PathBuf,

    #[arg(long, default_value_t = 0.01, help = "Adjusted p-value cutoff (exclusive).")]
    pub alpha: f64,

    #[arg(long, default_value_t = 1.0, help = "Absolute log2 fold-change cutoff (exclusive).")]
    pub min_log2_fold_change: f64,

    #[arg(long, default_value_t = 5000, help = "Distance (bp) from the TSS counted as TSS-bound.")]
    pub tss_window: i64,

    #[arg(
        long,
        default_value_t = 20000,
        help = "Distance (bp) from the TSS counted as gene-body-bound, in addition to genic annotations."
    )]
    pub gene_body_window: i64,

    #[arg(short, long, default_value = "results/figure_2F.svg")]
    pub output: PathBuf,
}
