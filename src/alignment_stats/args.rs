use clap::Parser;
use std::path::PathBuf;

use crate::utils::{parse_labeled_path, LabeledPath};

#[derive(Parser, Debug)]
pub struct AlignmentStatsArgs {
    #[arg(
        short,
        long = "sample",
        value_parser = parse_labeled_path,
        num_args(1..),
        help = "Flagstat reports as <label>=<path>. Example: '-s \"INPUT Rep1=results/flagstat/INPUT_rep1_flagstat.txt\"'. Defaults to the INPUT and IP replicates in --flagstat-dir."
    )]
    pub samples: Vec<LabeledPath>,

    #[arg(
        long,
        default_value = "results/flagstat",
        help = "Directory holding <sample>_flagstat.txt reports when no --sample is given."
    )]
    pub flagstat_dir: PathBuf,

    #[arg(short, long, default_value = "results/supp_figure_S2A_table.svg")]
    pub output: PathBuf,

    #[arg(
        long,
        default_value_t = 70.0,
        help = "Mapping rate (%) below which a sample is reported as low quality."
    )]
    pub min_mapping_rate: f64,
}

impl AlignmentStatsArgs {
    pub fn samples_or_default(&self) -> Vec<LabeledPath> {
        if !self.samples.is_empty() {
            return self.samples.clone();
        }

        [
            ("INPUT Rep1", "INPUT_rep1"),
            ("INPUT Rep2", "INPUT_rep2"),
            ("RUNX1 IP Rep1", "IP_rep1"),
            ("RUNX1 IP Rep2", "IP_rep2"),
        ]
        .into_iter()
        .map(|(label, stem)| LabeledPath {
            label: label.to_string(),
            path: self.flagstat_dir.join(format!("{}_flagstat.txt", stem)),
        })
        .collect()
    }
}
