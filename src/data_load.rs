use anyhow::{Context, Result};
use bytesize::ByteSize;
use chipseq::{
    read_bed, AnnotatedPeak, ExpressionRecord, FlagstatRecord, GenomicInterval, ParseError,
};
use log::{debug, info};
use std::{
    fs::{self, File},
    io::BufReader,
    path::Path,
};

use crate::data::{
    enrichment::ontology_id_pattern, tsv_reader, AnnotatedPeakRecord, CorrelationMatrix,
    EnrichmentRecord, EnrichmentTerm, ExpressionRow,
};

fn open_input(path: &Path) -> Result<BufReader<File>> {
    if !path.exists() {
        return Err(ParseError::MissingFile(path.to_path_buf()).into());
    }

    let size = fs::metadata(path)
        .with_context(|| format!("Could not read metadata of: {:?}", path))?
        .len();
    debug!("Opening {:?} ({})", path, ByteSize::b(size));

    let file = File::open(path).with_context(|| format!("Failed to open: {:?}", path))?;
    Ok(BufReader::new(file))
}

pub fn load_flagstat(path: &Path) -> Result<FlagstatRecord> {
    let reader = open_input(path)?;
    FlagstatRecord::from_reader(reader)
        .with_context(|| format!("Error parsing flagstat report: {:?}", path))
}

pub fn load_peaks(path: &Path) -> Result<Vec<GenomicInterval>> {
    let reader = open_input(path)?;
    let peaks =
        read_bed(reader).with_context(|| format!("Error parsing peak file: {:?}", path))?;

    info!("Loaded {} peaks from {:?}", peaks.len(), path);
    Ok(peaks)
}

pub fn load_annotated_peaks(path: &Path) -> Result<Vec<AnnotatedPeak>> {
    let reader = open_input(path)?;

    let peaks = tsv_reader(reader)
        .deserialize::<AnnotatedPeakRecord>()
        .enumerate()
        .map(|(idx, rec)| {
            rec.map(AnnotatedPeak::from)
                .with_context(|| format!("Invalid annotated peak at record {}", idx + 1))
        })
        .collect::<Result<Vec<AnnotatedPeak>>>()
        .with_context(|| format!("Error reading annotated peaks: {:?}", path))?;

    info!("Loaded {} annotated peaks from {:?}", peaks.len(), path);
    Ok(peaks)
}

/// Loads a differential expression table, keeping only rows with an
/// adjusted p-value.
pub fn load_expression(path: &Path) -> Result<Vec<ExpressionRecord>> {
    let reader = open_input(path)?;

    let records = tsv_reader(reader)
        .deserialize::<ExpressionRow>()
        .enumerate()
        .map(|(idx, rec)| {
            rec.map(ExpressionRecord::from)
                .with_context(|| format!("Invalid expression record {}", idx + 1))
        })
        .collect::<Result<Vec<ExpressionRecord>>>()
        .with_context(|| format!("Error reading expression table: {:?}", path))?;

    let total = records.len();
    let clean: Vec<ExpressionRecord> = records
        .into_iter()
        .filter(|rec| rec.padj.is_some())
        .collect();

    info!(
        "Loaded {} genes from {:?} ({} without adjusted p-value dropped)",
        clean.len(),
        path,
        total - clean.len()
    );
    Ok(clean)
}

pub fn load_correlation_matrix(path: &Path) -> Result<CorrelationMatrix> {
    let reader = open_input(path)?;
    CorrelationMatrix::from_reader(reader)
        .with_context(|| format!("Error parsing correlation matrix: {:?}", path))
}

/// Loads the `top` terms of an Enrichr table by ascending adjusted p-value.
pub fn load_enrichment(path: &Path, library: &str, top: usize) -> Result<Vec<EnrichmentTerm>> {
    let reader = open_input(path)?;
    let ontology_id = ontology_id_pattern()?;

    let mut terms = tsv_reader(reader)
        .deserialize::<EnrichmentRecord>()
        .enumerate()
        .map(|(idx, rec)| {
            rec.map(|r| EnrichmentTerm::from_record(library, r, &ontology_id))
                .with_context(|| format!("Invalid enrichment record {}", idx + 1))
        })
        .collect::<Result<Vec<EnrichmentTerm>>>()
        .with_context(|| format!("Error reading enrichment table: {:?}", path))?;

    if terms.is_empty() {
        return Err(ParseError::Empty(format!("{:?}", path)).into());
    }

    // Stable sort keeps Enrichr's own ordering among tied p-values.
    terms.sort_by(|a, b| a.adjusted_p_value.total_cmp(&b.adjusted_p_value));
    terms.truncate(top);

    info!("Loaded top {} '{}' terms from {:?}", terms.len(), library, path);
    Ok(terms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_is_reported() {
        let err = load_peaks(Path::new("does/not/exist.bed")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ParseError>(),
            Some(ParseError::MissingFile(_))
        ));
    }

    #[test]
    fn test_load_expression_drops_missing_padj() -> Result<()> {
        let mut table = NamedTempFile::new()?;
        writeln!(table, "genename\tlog2FoldChange\tpadj")?;
        writeln!(table, "A\t2.5\t0.001")?;
        writeln!(table, "B\t-3.0\tNA")?;
        writeln!(table, "C\t0.1\t0.9")?;

        let records = load_expression(table.path())?;
        let names: Vec<&str> = records.iter().map(|r| r.gene_name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
        Ok(())
    }

    #[test]
    fn test_load_enrichment_takes_top_terms() -> Result<()> {
        let mut table = NamedTempFile::new()?;
        writeln!(table, "Term\tP-value\tAdjusted P-value\tCombined Score")?;
        writeln!(table, "Myc Targets V1\t0.001\t0.0407\t10.2")?;
        writeln!(table, "Unfolded Protein Response\t0.0001\t0.0038\t22.9")?;
        writeln!(table, "DNA Repair\t0.01\t0.0862\t7.6")?;

        let terms = load_enrichment(table.path(), "Hallmark", 2)?;
        let names: Vec<&str> = terms.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(names, vec!["Unfolded Protein Response", "Myc Targets V1"]);
        Ok(())
    }

    #[test]
    fn test_load_annotated_peaks_schema_mismatch() -> Result<()> {
        let mut table = NamedTempFile::new()?;
        writeln!(table, "PeakID\tChr\tStart\tEnd")?;
        writeln!(table, "p1\tchr1\t1\t2")?;

        assert!(load_annotated_peaks(table.path()).is_err());
        Ok(())
    }
}
