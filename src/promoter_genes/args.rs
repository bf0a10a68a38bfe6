use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct PromoterGenesArgs {
    #[arg(
        long,
        default_value = "results/homer/annotations/annotated_peaks.txt",
        help = "HOMER annotatePeaks output."
    )]
    pub peaks: PathBuf,

    #[arg(
        short,
        long,
        default_value = "results/genes_for_enrichr.txt",
        help = "Gene list, one gene per line."
    )]
    pub output: PathBuf,
}
