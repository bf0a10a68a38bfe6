pub mod annotation;
pub mod describe;
pub mod error;
pub mod flagstat;
pub mod interval;
pub mod overlap;
pub mod regulation;

pub use annotation::{
    genes_within_tss, promoter_genes, AnnotatedPeak, AnnotationCategory, GeneBodyRule,
};
pub use describe::{mean, Description};
pub use error::ParseError;
pub use flagstat::FlagstatRecord;
pub use interval::{read_bed, GenomicInterval};
pub use overlap::{
    count_overlapping, count_overlapping_indexed, percentage, IntervalIndex, OverlapSummary,
};
pub use regulation::{ExpressionRecord, Regulation, SignificanceThresholds};
