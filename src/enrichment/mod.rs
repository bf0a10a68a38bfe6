use anyhow::Result;
use log::info;
use tabled::{settings::Style, Table, Tabled};

use crate::{
    data::EnrichmentTerm,
    data_load::load_enrichment,
    utils::{format_scientific, prepare_output, print_section},
};

pub mod args;
pub mod figure;

pub use args::EnrichmentArgs;
use figure::draw_enrichment_figure;

#[derive(Debug, PartialEq, Tabled)]
pub struct EnrichmentRow {
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Term")]
    pub term: String,
    #[tabled(rename = "Adjusted P-value")]
    pub adjusted_p_value: String,
    #[tabled(rename = "Combined Score")]
    pub combined_score: String,
}

impl From<&EnrichmentTerm> for EnrichmentRow {
    fn from(term: &EnrichmentTerm) -> Self {
        Self {
            category: term.library.clone(),
            term: term.term.clone(),
            adjusted_p_value: format_scientific(term.adjusted_p_value),
            combined_score: format!("{:.1}", term.combined_score),
        }
    }
}

pub fn enrichment(args: EnrichmentArgs) -> Result<()> {
    info!("Running chiprepro 'enrichment'");
    prepare_output(&args.output, "svg")?;

    let mut terms: Vec<EnrichmentTerm> = Vec::new();
    for library in &args.libraries {
        terms.extend(load_enrichment(&library.path, &library.label, args.top)?);
    }

    draw_enrichment_figure(
        &terms,
        "Top Enriched Pathways in Promoter-Bound Genes",
        &args.output,
    )?;
    info!("Saved figure as {:?}", args.output);

    print_section("TOP ENRICHED PATHWAYS - SUMMARY TABLE");
    let rows: Vec<EnrichmentRow> = terms.iter().map(EnrichmentRow::from).collect();
    let mut table = Table::new(&rows);
    table.with(Style::blank());
    println!("{table}");

    Ok(())
}
