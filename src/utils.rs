use anyhow::{bail, Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// A `LABEL=PATH` command line value.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledPath {
    pub label: String,
    pub path: PathBuf,
}

impl LabeledPath {
    pub fn new(label: &str, path: &str) -> Self {
        Self {
            label: label.to_string(),
            path: PathBuf::from(path),
        }
    }
}

pub fn parse_labeled_path(value: &str) -> Result<LabeledPath, String> {
    match value.split_once('=') {
        Some((label, path)) if !label.trim().is_empty() && !path.trim().is_empty() => {
            Ok(LabeledPath::new(label.trim(), path.trim()))
        }
        _ => Err(format!("Expected <label>=<path>, got '{}'", value)),
    }
}

/// Checks the output extension and creates the parent directory.
pub fn prepare_output(output: &Path, extension: &str) -> Result<()> {
    match output.extension() {
        Some(ext) if ext == extension => {}
        Some(ext) => bail!("Incorrect file extension {:?}. Should be {}", ext, extension),
        None => bail!("No filename provided for output. Should be a .{} file.", extension),
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create parent directory: {:?}", parent))?;
        }
    }
    Ok(())
}

/// `1234567` -> `"1,234,567"`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Same as [`format_thousands`] for signed values such as TSS distances.
pub fn format_thousands_signed(value: i64) -> String {
    let formatted = format_thousands(value.unsigned_abs());
    if value < 0 {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

/// Scientific notation with two decimals and a signed two-digit exponent,
/// e.g. `3.78e-03`.
pub fn format_scientific(value: f64) -> String {
    let formatted = format!("{:.2e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            Err(_) => formatted,
        },
        None => formatted,
    }
}

pub fn print_section(title: &str) {
    println!();
    println!("{}", "=".repeat(80));
    println!("{}", title);
    println!("{}", "=".repeat(80));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(850_000), "850,000");
        assert_eq!(format_thousands(1_000_000), "1,000,000");
        assert_eq!(format_thousands_signed(-12_345), "-12,345");
        assert_eq!(format_thousands_signed(42), "42");
    }

    #[test]
    fn test_format_scientific() {
        assert_eq!(format_scientific(0.003782349351695863), "3.78e-03");
        assert_eq!(format_scientific(0.9734537756006275), "9.73e-01");
        assert_eq!(format_scientific(1234.0), "1.23e+03");
        assert_eq!(format_scientific(0.0), "0.00e+00");
    }

    #[test]
    fn test_parse_labeled_path() {
        assert_eq!(
            parse_labeled_path("INPUT Rep1=results/flagstat/INPUT_rep1_flagstat.txt"),
            Ok(LabeledPath::new(
                "INPUT Rep1",
                "results/flagstat/INPUT_rep1_flagstat.txt"
            ))
        );
        assert!(parse_labeled_path("no_separator.txt").is_err());
        assert!(parse_labeled_path("=path.txt").is_err());
        assert!(parse_labeled_path("label=").is_err());
    }

    #[test]
    fn test_prepare_output() -> Result<()> {
        let dir = tempdir()?;
        let nested = dir.path().join("a").join("b").join("figure.svg");

        prepare_output(&nested, "svg")?;
        assert!(nested.parent().unwrap().is_dir());

        assert!(prepare_output(&dir.path().join("figure.png"), "svg").is_err());
        assert!(prepare_output(&dir.path().join("figure"), "svg").is_err());
        Ok(())
    }
}
