use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};
use tempfile::tempdir;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

fn run(args: &[&str]) -> Output {
    let output = Command::new(env!("CARGO_BIN_EXE_chiprepro"))
        .args(args)
        .env("RUST_LOG", "info")
        .output()
        .expect("Failed to execute chiprepro");

    assert!(
        output.status.success(),
        "Process ended with non-success status: {:?}\n{}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_alignment_stats() {
    let data = data_dir();
    let dir = tempdir().unwrap();
    let figure = dir.path().join("alignment.svg");

    let input = format!("INPUT Rep1={}", path_str(&data.join("INPUT_rep1_flagstat.txt")));
    let ip = format!("RUNX1 IP Rep1={}", path_str(&data.join("IP_rep1_flagstat.txt")));
    let missing = format!("INPUT Rep2={}", path_str(&data.join("INPUT_rep2_flagstat.txt")));

    let output = run(&[
        "alignment-stats",
        "-s",
        &input,
        &ip,
        &missing,
        "-o",
        path_str(&figure),
    ]);

    let out = stdout(&output);
    assert!(out.contains("1,000,000"), "{}", out);
    assert!(out.contains("85.00"));
    assert!(out.contains("1,900,000"));
    assert!(out.contains("95.00"));
    assert!(!out.contains("INPUT Rep2"));

    let svg = fs::read_to_string(&figure).expect("Could not read figure");
    assert!(svg.contains("RUNX1 IP Rep1"));
}

#[test]
fn test_alignment_stats_flags_low_mapping_rate() {
    let data = data_dir();
    let dir = tempdir().unwrap();

    let low = format!("RUNX1 IP Rep2={}", path_str(&data.join("low_mapping_flagstat.txt")));
    let good = format!("INPUT Rep1={}", path_str(&data.join("INPUT_rep1_flagstat.txt")));

    let output = run(&[
        "alignment-stats",
        "-s",
        &low,
        &good,
        "--min-mapping-rate",
        "70",
        "-o",
        path_str(&dir.path().join("alignment.svg")),
    ]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("RUNX1 IP Rep2: mapping rate 61.20% is below 70%"),
        "{}",
        stderr
    );
    assert!(!stderr.contains("INPUT Rep1: mapping rate"));
    assert!(stdout(&output).contains("61.20"));
}

#[test]
fn test_peak_overlap_methods_agree() {
    let data = data_dir();
    let dir = tempdir().unwrap();

    let mut reports = Vec::new();
    for method in ["naive", "sweep"] {
        let figure = dir.path().join(format!("venn_{}.svg", method));
        let output = run(&[
            "peak-overlap",
            "--rep1",
            path_str(&data.join("IP_rep1_peaks.bed")),
            "--rep2",
            path_str(&data.join("IP_rep2_peaks.bed")),
            "--reproducible",
            path_str(&data.join("reproducible_peaks.bed")),
            "--method",
            method,
            "-o",
            path_str(&figure),
        ]);
        assert!(figure.exists());
        reports.push(stdout(&output));
    }

    assert_eq!(reports[0], reports[1]);
    let out = &reports[0];
    assert!(out.contains("Rep1 peaks overlapping Rep2: 3 (75.0%)"), "{}", out);
    assert!(out.contains("Rep2 peaks overlapping Rep1: 2 (66.7%)"));
    assert!(out.contains("Rep1 only: 1"));
    assert!(out.contains("Reproducible peaks: 2"));
    assert!(out.contains("66.7% of the smaller replicate"));
    assert!(out.contains("80.0% of the averaged overlap"));
}

#[test]
fn test_peak_overlap_without_reproducible_peaks() {
    let data = data_dir();
    let dir = tempdir().unwrap();

    let output = run(&[
        "peak-overlap",
        "--rep1",
        path_str(&data.join("IP_rep1_peaks.bed")),
        "--rep2",
        path_str(&data.join("IP_rep2_peaks.bed")),
        "--reproducible",
        path_str(&dir.path().join("missing.bed")),
        "-o",
        path_str(&dir.path().join("venn.svg")),
    ]);

    assert!(stdout(&output).contains("N/A"));
}

#[test]
fn test_promoter_genes() {
    let data = data_dir();
    let dir = tempdir().unwrap();
    let out_file = dir.path().join("genes_for_enrichr.txt");

    run(&[
        "promoter-genes",
        "--peaks",
        path_str(&data.join("annotated_peaks.txt")),
        "-o",
        path_str(&out_file),
    ]);

    let actual = fs::read_to_string(&out_file).expect("Could not read output file");
    let expected = fs::read_to_string(data.join("expected_promoter_genes.txt"))
        .expect("Could not read expected output file");
    assert_eq!(actual, expected, "Output did not match expected");
}

#[test]
fn test_peak_stats() {
    let data = data_dir();

    let output = run(&[
        "peak-stats",
        "--rnaseq",
        path_str(&data.join("rnaseq_log2_foldchange.txt")),
        "--peaks",
        path_str(&data.join("annotated_peaks.txt")),
    ]);

    let out = stdout(&output);
    assert!(out.contains("Total peaks: 7"), "{}", out);
    assert!(out.contains("Total genes in RNA-seq: 6"));
    assert!(out.contains("Significant DE genes: 3"));
    assert!(out.contains("Genes with both peaks and significant DE: 3"));
    assert!(out.contains("1. Gene: MALAT1"));
    assert!(out.contains("3. Gene: NEAT1"));
    assert!(out.contains(">>> GOOD CANDIDATE <<<"));
    assert!(out.contains("Significant DE: NO"));
    assert!(out.contains("Description: metastasis associated lung adenocarcinoma transcript 1"));
}

#[test]
fn test_peak_stats_without_shared_genes() {
    let data = data_dir();

    let output = run(&[
        "peak-stats",
        "--rnaseq",
        path_str(&data.join("rnaseq_unmatched.txt")),
        "--peaks",
        path_str(&data.join("annotated_peaks.txt")),
    ]);

    let out = stdout(&output);
    assert!(out.contains("Genes with both peaks and significant DE: 0"), "{}", out);
    assert!(out.contains("No overlap found"));
    assert!(out.contains(r#"["MALAT1", "NEAT1", "BMP2", "MALAT1", "RUNX1"]"#));
    assert!(out.contains(r#"["TP53", "MYC"]"#));
}

#[test]
fn test_chip_vs_rna() {
    let data = data_dir();
    let dir = tempdir().unwrap();
    let figure = dir.path().join("figure_2F.svg");

    let output = run(&[
        "chip-vs-rna",
        "--rnaseq",
        path_str(&data.join("rnaseq_log2_foldchange.txt")),
        "--peaks",
        path_str(&data.join("annotated_peaks.txt")),
        "-o",
        path_str(&figure),
    ]);

    let out = stdout(&output);
    assert!(out.contains("Up TSS ±5kb: 0/1 (0.0%)"), "{}", out);
    assert!(out.contains("Down TSS ±5kb: 2/2 (100.0%)"));
    assert!(out.contains("Up Gene ±20kb: 1/1 (100.0%)"));
    assert!(out.contains("Down Gene ±20kb: 2/2 (100.0%)"));
    assert!(figure.exists());
}

#[test]
fn test_correlation() {
    let data = data_dir();

    let output = run(&[
        "correlation",
        "--matrix",
        path_str(&data.join("correlation_matrix.tab")),
    ]);

    let out = stdout(&output);
    assert!(out.contains("IP replicate correlation: 0.930"), "{}", out);
    assert!(out.contains("INPUT replicate correlation: 0.960"));
    assert!(out.contains("Average IP-INPUT correlation: 0.690"));
}

#[test]
fn test_correlation_missing_matrix_is_not_an_error() {
    let dir = tempdir().unwrap();
    run(&[
        "correlation",
        "--matrix",
        path_str(&dir.path().join("correlation_matrix.tab")),
    ]);
}

#[test]
fn test_enrichment() {
    let data = data_dir();
    let dir = tempdir().unwrap();
    let figure = dir.path().join("enrichment.svg");

    let hallmark = format!("Hallmark={}", path_str(&data.join("hallmark_table.txt")));
    let go = format!("GO Process={}", path_str(&data.join("go_process_table.txt")));

    let output = run(&[
        "enrichment",
        "-l",
        &hallmark,
        &go,
        "-o",
        path_str(&figure),
    ]);

    let out = stdout(&output);
    assert!(out.contains("3.78e-03"), "{}", out);
    assert!(out.contains("Translation"));
    assert!(!out.contains("GO:0006412"));
    // Only the top 5 Hallmark terms are kept.
    assert!(!out.contains("Apoptosis"));

    let svg = fs::read_to_string(&figure).expect("Could not read figure");
    assert!(svg.contains("p = 0.05"));
}

#[test]
fn test_missing_input_fails() {
    let dir = tempdir().unwrap();
    let status = Command::new(env!("CARGO_BIN_EXE_chiprepro"))
        .args([
            "promoter-genes",
            "--peaks",
            path_str(&dir.path().join("missing.txt")),
            "-o",
            path_str(&dir.path().join("genes.txt")),
        ])
        .status()
        .expect("Failed to execute chiprepro");

    assert!(!status.success());
}
