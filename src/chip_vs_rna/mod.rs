use ahash::AHashSet;
use anyhow::Result;
use chipseq::{
    genes_within_tss, percentage, ExpressionRecord, GeneBodyRule, Regulation,
    SignificanceThresholds,
};
use log::info;
use tabled::{settings::Style, Table, Tabled};

use crate::{
    data_load::{load_annotated_peaks, load_expression},
    plot::{draw_stacked_percentages, StackedBar},
    utils::{prepare_output, print_section},
};

pub mod args;

pub use args::ChipVsRnaArgs;

/// Bound and unbound counts of one DE gene set against one peak gene set.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingCategory {
    pub label: String,
    pub bound: usize,
    pub not_bound: usize,
    pub total: usize,
    pub pct_bound: f64,
}

#[derive(Tabled)]
struct BindingRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Bound")]
    bound: usize,
    #[tabled(rename = "Not Bound")]
    not_bound: usize,
    #[tabled(rename = "Total")]
    total: usize,
    #[tabled(rename = "% Bound")]
    pct_bound: String,
}

impl From<&BindingCategory> for BindingRow {
    fn from(category: &BindingCategory) -> Self {
        Self {
            category: category.label.clone(),
            bound: category.bound,
            not_bound: category.not_bound,
            total: category.total,
            pct_bound: format!("{:.1}", category.pct_bound),
        }
    }
}

impl BindingCategory {
    pub fn new(label: &str, genes: &AHashSet<String>, bound_genes: &AHashSet<String>) -> Self {
        let bound = genes.intersection(bound_genes).count();
        Self {
            label: label.to_string(),
            bound,
            not_bound: genes.len() - bound,
            total: genes.len(),
            pct_bound: percentage(bound, genes.len()),
        }
    }

    pub fn as_bar(&self) -> StackedBar {
        StackedBar::new(&self.label, self.bound, self.not_bound)
    }
}

fn genes_by_regulation(
    genes: &[ExpressionRecord],
    thresholds: &SignificanceThresholds,
    regulation: Regulation,
) -> AHashSet<String> {
    genes
        .iter()
        .filter(|gene| gene.regulation(thresholds) == regulation)
        .map(|gene| gene.gene_name.clone())
        .collect()
}

/// Up TSS, Down TSS, Up gene body, Down gene body.
pub fn binding_categories(
    up: &AHashSet<String>,
    down: &AHashSet<String>,
    tss_genes: &AHashSet<String>,
    gene_body_genes: &AHashSet<String>,
    tss_window: i64,
    gene_body_window: i64,
) -> Vec<BindingCategory> {
    let tss = format!("TSS ±{}kb", tss_window / 1000);
    let body = format!("Gene ±{}kb", gene_body_window / 1000);

    vec![
        BindingCategory::new(&format!("Up {}", tss), up, tss_genes),
        BindingCategory::new(&format!("Down {}", tss), down, tss_genes),
        BindingCategory::new(&format!("Up {}", body), up, gene_body_genes),
        BindingCategory::new(&format!("Down {}", body), down, gene_body_genes),
    ]
}

pub fn chip_vs_rna(args: ChipVsRnaArgs) -> Result<()> {
    info!("Running chiprepro 'chip-vs-rna'");
    prepare_output(&args.output, "svg")?;
    let thresholds = SignificanceThresholds::new(args.alpha, args.min_log2_fold_change);

    let genes = load_expression(&args.rnaseq)?;
    let peaks = load_annotated_peaks(&args.peaks)?;

    let up = genes_by_regulation(&genes, &thresholds, Regulation::Up);
    let down = genes_by_regulation(&genes, &thresholds, Regulation::Down);
    info!("{} up-regulated and {} down-regulated genes", up.len(), down.len());

    let tss_genes = genes_within_tss(&peaks, args.tss_window);
    let gene_body_genes = GeneBodyRule::with_default_keywords(args.gene_body_window)?.genes(&peaks);
    info!(
        "{} genes with a peak near the TSS, {} near the gene body",
        tss_genes.len(),
        gene_body_genes.len()
    );

    let categories = binding_categories(
        &up,
        &down,
        &tss_genes,
        &gene_body_genes,
        args.tss_window,
        args.gene_body_window,
    );

    print_section("PEAK BINDING AT DIFFERENTIALLY EXPRESSED GENES");
    for category in &categories {
        println!(
            "{}: {}/{} ({:.1}%)",
            category.label, category.bound, category.total, category.pct_bound
        );
    }
    println!();
    let rows: Vec<BindingRow> = categories.iter().map(BindingRow::from).collect();
    let mut table = Table::new(&rows);
    table.with(Style::blank());
    println!("{table}");

    let bars: Vec<StackedBar> = categories.iter().map(BindingCategory::as_bar).collect();
    draw_stacked_percentages(
        &bars,
        ("RUNX1 Bound", "Not Bound"),
        "RUNX1 Peak Binding at Differentially Expressed Genes",
        &args.output,
    )?;
    info!("Saved figure as {:?}", args.output);

    Ok(())
}
