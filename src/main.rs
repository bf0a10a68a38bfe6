use anyhow::Result;
use clap::Parser;
use humantime::format_duration;
use log::info;
use std::time::Instant;

mod alignment_stats;
mod argparser;
mod chip_vs_rna;
mod correlation;
mod data;
mod data_load;
mod enrichment;
mod peak_overlap;
mod peak_stats;
mod plot;
mod promoter_genes;
mod utils;

use argparser::{Args, Commands};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let start = Instant::now();

    match args.command {
        Commands::AlignmentStats(args) => alignment_stats::alignment_stats(args)?,
        Commands::PeakOverlap(args) => peak_overlap::peak_overlap(args)?,
        Commands::PeakStats(args) => peak_stats::peak_stats(args)?,
        Commands::PromoterGenes(args) => promoter_genes::promoter_genes(args)?,
        Commands::ChipVsRna(args) => chip_vs_rna::chip_vs_rna(args)?,
        Commands::Correlation(args) => correlation::correlation(args)?,
        Commands::Enrichment(args) => enrichment::enrichment(args)?,
    }

    info!("Finished in {}", format_duration(start.elapsed()));
    Ok(())
}
