use chipseq::{AnnotatedPeak, GenomicInterval};
use serde::Deserialize;

/// One row of a HOMER `annotatePeaks.pl` table. Only the columns used by the
/// analyses are read; the first (`PeakID (cmd=...)`) column is ignored.
#[derive(Debug, Deserialize)]
pub struct AnnotatedPeakRecord {
    #[serde(rename = "Chr")]
    pub chr: String,

    #[serde(rename = "Start")]
    pub start: u64,

    #[serde(rename = "End")]
    pub end: u64,

    #[serde(rename = "Peak Score", deserialize_with = "csv::invalid_option")]
    pub peak_score: Option<f64>,

    #[serde(rename = "Annotation")]
    pub annotation: Option<String>,

    #[serde(rename = "Distance to TSS", deserialize_with = "csv::invalid_option")]
    pub distance_to_tss: Option<i64>,

    #[serde(rename = "Gene Name")]
    pub gene_name: Option<String>,

    #[serde(rename = "Gene Description", default)]
    pub gene_description: Option<String>,
}

impl From<AnnotatedPeakRecord> for AnnotatedPeak {
    fn from(rec: AnnotatedPeakRecord) -> Self {
        let mut interval = GenomicInterval::new(&rec.chr, rec.start, rec.end);
        interval.score = rec.peak_score;

        AnnotatedPeak::new(interval, rec.gene_name, rec.distance_to_tss, rec.annotation)
            .with_description(rec.gene_description)
    }
}
