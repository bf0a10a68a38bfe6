use anyhow::{Context, Result};
use chipseq::promoter_genes as collect_promoter_genes;
use log::info;
use std::{fs, path::Path};

use crate::{
    data_load::load_annotated_peaks,
    utils::{format_thousands, prepare_output, print_section},
};

pub mod args;

pub use args::PromoterGenesArgs;

/// Writes one gene per line, without a trailing newline.
pub fn write_gene_list(genes: &[String], output: &Path) -> Result<()> {
    fs::write(output, genes.join("\n"))
        .with_context(|| format!("Could not write gene list to: {:?}", output))
}

pub fn promoter_genes(args: PromoterGenesArgs) -> Result<()> {
    info!("Running chiprepro 'promoter-genes'");
    prepare_output(&args.output, "txt")?;

    let peaks = load_annotated_peaks(&args.peaks)?;
    let promoter_peaks = peaks.iter().filter(|p| p.is_promoter()).count();
    let genes = collect_promoter_genes(&peaks);

    print_section("PROMOTER-BOUND GENES");
    println!("Total annotated peaks: {}", format_thousands(peaks.len() as u64));
    println!(
        "Promoter-associated peaks: {}",
        format_thousands(promoter_peaks as u64)
    );
    println!("Unique genes: {}", format_thousands(genes.len() as u64));

    write_gene_list(&genes, &args.output)?;
    info!("Saved {} genes to {:?}", genes.len(), args.output);

    let preview: Vec<&str> = genes.iter().take(20).map(String::as_str).collect();
    println!("\nFirst genes: {}", preview.join(", "));
    Ok(())
}
