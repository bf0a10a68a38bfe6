use anyhow::Result;
use log::{info, warn};

use crate::{data::CorrelationMatrix, data_load::load_correlation_matrix, utils::print_section};

pub mod args;

pub use args::CorrelationArgs;

/// Replicate and IP-vs-INPUT correlations read off a sample matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationSummary {
    pub ip_samples: Vec<String>,
    pub input_samples: Vec<String>,
    /// Between the first two IP samples.
    pub ip_replicate: Option<f64>,
    /// Between the first two INPUT samples.
    pub input_replicate: Option<f64>,
    /// Mean over every IP and INPUT pair.
    pub mean_ip_input: Option<f64>,
}

pub fn is_ip_sample(label: &str) -> bool {
    label.contains("IP_") && !label.contains("INPUT")
}

pub fn is_input_sample(label: &str) -> bool {
    label.contains("INPUT")
}

impl CorrelationSummary {
    pub fn from_matrix(matrix: &CorrelationMatrix) -> Self {
        let ip_samples: Vec<String> = matrix
            .samples()
            .iter()
            .filter(|s| is_ip_sample(s))
            .cloned()
            .collect();
        let input_samples: Vec<String> = matrix
            .samples()
            .iter()
            .filter(|s| is_input_sample(s))
            .cloned()
            .collect();

        let first_pair = |samples: &[String]| match samples {
            [a, b, ..] => matrix.get(a, b),
            _ => None,
        };

        let cross: Vec<f64> = ip_samples
            .iter()
            .flat_map(|ip| input_samples.iter().filter_map(|input| matrix.get(ip, input)))
            .collect();
        let mean_ip_input = chipseq::mean(&cross);

        Self {
            ip_replicate: first_pair(&ip_samples),
            input_replicate: first_pair(&input_samples),
            ip_samples,
            input_samples,
            mean_ip_input,
        }
    }
}

fn print_matrix(matrix: &CorrelationMatrix) {
    let width = matrix
        .samples()
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max(6)
        + 2;

    print!("{:width$}", "", width = width);
    for sample in matrix.samples() {
        print!("{:>width$}", sample, width = width);
    }
    println!();

    for (label, values) in matrix.iter_rows() {
        print!("{:width$}", label, width = width);
        for value in values {
            print!("{:>width$.3}", value, width = width);
        }
        println!();
    }
}

pub fn correlation(args: CorrelationArgs) -> Result<()> {
    info!("Running chiprepro 'correlation'");

    if !args.matrix.exists() {
        warn!("Correlation matrix not found at {:?}", args.matrix);
        return Ok(());
    }
    let matrix = load_correlation_matrix(&args.matrix)?;

    print_section("CORRELATION ANALYSIS");
    println!("Spearman correlation matrix:");
    print_matrix(&matrix);

    let summary = CorrelationSummary::from_matrix(&matrix);

    print_section("CORRELATION SUMMARY");
    println!("IP samples: {:?}", summary.ip_samples);
    println!("INPUT samples: {:?}", summary.input_samples);

    if let Some(value) = summary.ip_replicate {
        println!("\nIP replicate correlation: {:.3}", value);
    }
    if let Some(value) = summary.input_replicate {
        println!("INPUT replicate correlation: {:.3}", value);
    }
    if let Some(value) = summary.mean_ip_input {
        println!("Average IP-INPUT correlation: {:.3}", value);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATRIX: &str = "\t'INPUT_rep1'\t'INPUT_rep2'\t'IP_rep1'\t'IP_rep2'\n\
                          'INPUT_rep1'\t1.0\t0.96\t0.70\t0.68\n\
                          'INPUT_rep2'\t0.96\t1.0\t0.72\t0.66\n\
                          'IP_rep1'\t0.70\t0.72\t1.0\t0.93\n\
                          'IP_rep2'\t0.68\t0.66\t0.93\t1.0\n";

    #[test]
    fn test_sample_classes() {
        assert!(is_ip_sample("IP_rep1"));
        assert!(!is_ip_sample("INPUT_rep1"));
        assert!(!is_ip_sample("IP_INPUT_mix"));
        assert!(is_input_sample("INPUT_rep2"));
    }

    #[test]
    fn test_summary() -> Result<()> {
        let matrix = CorrelationMatrix::from_reader(MATRIX.as_bytes())?;
        let summary = CorrelationSummary::from_matrix(&matrix);

        assert_eq!(summary.ip_samples, vec!["IP_rep1", "IP_rep2"]);
        assert_eq!(summary.input_samples, vec!["INPUT_rep1", "INPUT_rep2"]);
        assert_eq!(summary.ip_replicate, Some(0.93));
        assert_eq!(summary.input_replicate, Some(0.96));
        let mean = summary.mean_ip_input.unwrap();
        assert!((mean - 0.69).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_single_replicate_has_no_pair() -> Result<()> {
        let matrix =
            CorrelationMatrix::from_reader("\tIP_rep1\tINPUT_rep1\nIP_rep1\t1\t0.5\nINPUT_rep1\t0.5\t1\n".as_bytes())?;
        let summary = CorrelationSummary::from_matrix(&matrix);

        assert_eq!(summary.ip_replicate, None);
        assert_eq!(summary.input_replicate, None);
        assert_eq!(summary.mean_ip_input, Some(0.5));
        Ok(())
    }
}
