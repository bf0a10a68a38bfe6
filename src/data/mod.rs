pub mod annotated_peak;
pub mod correlation;
pub mod enrichment;
pub mod expression;

use csv::{Reader, ReaderBuilder};
use std::io::Read;

pub use annotated_peak::AnnotatedPeakRecord;
pub use correlation::CorrelationMatrix;
pub use enrichment::{EnrichmentRecord, EnrichmentTerm};
pub use expression::ExpressionRow;

/// Tab-delimited reader with a header row; `#` lines are comments.
pub fn tsv_reader<R: Read>(reader: R) -> Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b'\t')
        .comment(Some(b'#'))
        .flexible(true)
        .from_reader(reader)
}
