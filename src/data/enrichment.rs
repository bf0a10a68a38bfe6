use regex::Regex;
use serde::Deserialize;

/// One row of an Enrichr results table.
#[derive(Debug, Deserialize)]
pub struct EnrichmentRecord {
    #[serde(rename = "Term")]
    pub term: String,

    #[serde(rename = "Adjusted P-value")]
    pub adjusted_p_value: f64,

    #[serde(rename = "Combined Score")]
    pub combined_score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentTerm {
    pub library: String,
    pub term: String,
    pub adjusted_p_value: f64,
    pub combined_score: f64,
}

impl EnrichmentTerm {
    pub fn from_record(library: &str, record: EnrichmentRecord, ontology_id: &Regex) -> Self {
        Self {
            library: library.to_string(),
            term: clean_term(&record.term, ontology_id),
            adjusted_p_value: record.adjusted_p_value,
            combined_score: record.combined_score,
        }
    }

    /// Zero p-values are clamped to the smallest positive double.
    pub fn neg_log10_padj(&self) -> f64 {
        -self.adjusted_p_value.max(f64::MIN_POSITIVE).log10()
    }
}

/// Matches a trailing ontology identifier such as ` (GO:0006412)` or
/// ` WP4172`.
pub fn ontology_id_pattern() -> Result<Regex, regex::Error> {
    Regex::new(r"\s*(\((GO|R-HSA|WP|hsa)[:\-]?[0-9A-Za-z\-]+\)|\s(WP|R-HSA-)[0-9]+)\s*$")
}

pub fn clean_term(term: &str, ontology_id: &Regex) -> String {
    ontology_id.replace(term.trim(), "").trim().to_string()
}
