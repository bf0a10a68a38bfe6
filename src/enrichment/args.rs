use clap::Parser;
use std::path::PathBuf;

use crate::utils::{parse_labeled_path, LabeledPath};

#[derive(Parser, Debug)]
pub struct EnrichmentArgs {
    #[arg(
        short,
        long = "library",
        value_parser = parse_labeled_path,
        num_args(1..),
        required = true,
        help = "Enrichr result tables as <label>=<path>. Example: '-l Hallmark=results/enrichr/MSigDB_Hallmark_2020_table.txt'"
    )]
    pub libraries: Vec<LabeledPath>,

    #[arg(short, long, default_value_t = 5, help = "Terms kept per library.")]
    pub top: usize,

    #[arg(short, long, default_value = "results/enrichment_top_pathways_figure.svg")]
    pub output: PathBuf,
}
