use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlapMethod {
    /// Compare every pair of peaks.
    Naive,
    /// Binary search in per-chromosome sorted peaks.
    Sweep,
}

#[derive(Parser, Debug)]
pub struct PeakOverlapArgs {
    #[arg(long, default_value = "results/IP_rep1_peaks.bed", help = "Peaks of the first replicate (BED).")]
    pub rep1: PathBuf,

    #[arg(long, default_value = "results/IP_rep2_peaks.bed", help = "Peaks of the second replicate (BED).")]
    pub rep2: PathBuf,

    #[arg(
        long,
        default_value = "results/peaks/reproducible_peaks.bed",
        help = "Reproducible peaks (BED). Skipped if the file does not exist."
    )]
    pub reproducible: PathBuf,

    #[arg(long, value_enum, default_value_t = OverlapMethod::Sweep)]
    pub method: OverlapMethod,

    #[arg(short, long, default_value = "results/supp_figure_S2C_venn.svg")]
    pub output: PathBuf,
}
