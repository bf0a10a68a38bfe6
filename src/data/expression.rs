use chipseq::ExpressionRecord;
use serde::Deserialize;

/// One row of a DESeq2-style results table. Extra columns are ignored and
/// `NA` values read as missing.
#[derive(Debug, Deserialize)]
pub struct ExpressionRow {
    pub genename: String,

    #[serde(rename = "log2FoldChange", deserialize_with = "csv::invalid_option")]
    pub log2_fold_change: Option<f64>,

    #[serde(deserialize_with = "csv::invalid_option")]
    pub padj: Option<f64>,
}

impl From<ExpressionRow> for ExpressionRecord {
    fn from(row: ExpressionRow) -> Self {
        ExpressionRecord::new(row.genename.trim(), row.log2_fold_change, row.padj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::tsv_reader;

    #[test]
    fn test_deserialization() -> anyhow::Result<()> {
        let table = "genename\tbaseMean\tlog2FoldChange\tlfcSE\tpvalue\tpadj\n\
                     MALAT1\t15000.2\t-2.31\t0.2\t1e-20\t3.5e-18\n\
                     NEAT1 \t800.0\tNA\tNA\tNA\tNA\n\
                     FN1\t120.5\t1.7\t0.3\t0.001\t\n";

        let records: Vec<ExpressionRecord> = tsv_reader(table.as_bytes())
            .deserialize::<ExpressionRow>()
            .map(|row| row.map(ExpressionRecord::from))
            .collect::<Result<_, _>>()?;

        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0],
            ExpressionRecord::new("MALAT1", Some(-2.31), Some(3.5e-18))
        );
        assert_eq!(records[1], ExpressionRecord::new("NEAT1", None, None));
        assert_eq!(records[2], ExpressionRecord::new("FN1", Some(1.7), None));
        Ok(())
    }

    #[test]
    fn test_missing_column_is_error() {
        let table = "gene\tlog2FoldChange\tpadj\nA\t1.0\t0.5\n";
        let result: Result<Vec<ExpressionRow>, _> =
            tsv_reader(table.as_bytes()).deserialize().collect();
        assert!(result.is_err());
    }
}
