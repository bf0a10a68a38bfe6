use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct PeakStatsArgs {
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

    #[arg(long, default_value_t = 5000, help = "Maximum distance (bp) from a TSS for promoter peaks.")]
    pub tss_window: i64,

    #[arg(long, default_value_t = 0.0, help = "Promoter peaks need a score above this.")]
    pub min_score: f64,

    #[arg(long, default_value_t = 10, help = "Number of candidates to print.")]
    pub top: usize,

    #[arg(
        long,
        num_args(1..),
        default_values = ["MALAT1", "NEAT1", "FN1", "FBN2", "BMP2"],
        help = "Genes to report individually."
    )]
    pub genes: Vec<String>,
}
