use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct CorrelationArgs {
    #[arg(
        short,
        long,
        default_value = "results/correlation_matrix.tab",
        help = "Sample correlation matrix from plotCorrelation --outFileCorMatrix."
    )]
    pub matrix: PathBuf,
}
