use anyhow::{Context, Result};
use chipseq::ParseError;
use csv::ReaderBuilder;
use std::io::Read;

/// Square sample-by-sample correlation matrix, as written by
/// `plotCorrelation --outFileCorMatrix`.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    rows: Vec<String>,
    values: Vec<Vec<f64>>,
}

fn clean_label(label: &str) -> String {
    label.trim().trim_matches('\'').trim_matches('"').to_string()
}

impl CorrelationMatrix {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b'\t')
            .comment(Some(b'#'))
            .flexible(true)
            .from_reader(reader);

        let mut records = rdr.records();

        let header = match records.next() {
            Some(rec) => rec.context("Failed to read matrix header")?,
            None => return Err(ParseError::Empty("correlation matrix".to_string()).into()),
        };
        // The first header cell labels the row-name column and is usually empty.
        let columns: Vec<String> = header.iter().skip(1).map(clean_label).collect();

        let mut rows = Vec::with_capacity(columns.len());
        let mut values = Vec::with_capacity(columns.len());

        for (idx, rec) in records.enumerate() {
            let rec = rec.context("Failed to read matrix row")?;
            let line = idx + 2;

            if rec.len() != columns.len() + 1 {
                return Err(ParseError::SchemaMismatch(format!(
                    "row {} has {} values but the header names {} samples",
                    line,
                    rec.len().saturating_sub(1),
                    columns.len()
                ))
                .into());
            }

            let row_values = rec
                .iter()
                .skip(1)
                .map(|v| {
                    v.trim().parse::<f64>().map_err(|_| ParseError::MalformedRow {
                        line,
                        reason: format!("'{}' is not a correlation coefficient", v),
                    })
                })
                .collect::<Result<Vec<f64>, ParseError>>()?;

            rows.push(clean_label(&rec[0]));
            values.push(row_values);
        }

        if rows.len() != columns.len() {
            return Err(ParseError::SchemaMismatch(format!(
                "matrix has {} rows but {} columns",
                rows.len(),
                columns.len()
            ))
            .into());
        }

        Ok(Self {
            columns,
            rows,
            values,
        })
    }

    pub fn samples(&self) -> &[String] {
        &self.columns
    }

    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let r = self.rows.iter().position(|label| label == row)?;
        let c = self.columns.iter().position(|label| label == column)?;
        Some(self.values[r][c])
    }

    /// Rows in file order, paired with their label.
    pub fn iter_rows(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.rows
            .iter()
            .zip(self.values.iter())
            .map(|(label, values)| (label.as_str(), values.as_slice()))
    }
}
