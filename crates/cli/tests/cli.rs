use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn write_fasta(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_full_substitution_keeps_length() {
    let temp = tempdir().unwrap();
    let fasta = write_fasta(&temp, "in.fa", ">seq1\nacgtacgt\n");

    let output = Command::cargo_bin("variantize")
        .unwrap()
        .arg(&fasta)
        .arg("s")
        .arg("--snp-rate")
        .arg("1.0")
        .arg("--seed")
        .arg("42")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], ">seq1");
    assert_eq!(lines[1].len(), 8);
    assert!(lines[1].chars().all(|c| "ACGT".contains(c)));
    assert!(stdout.ends_with("\n\n"));
}

#[test]
fn test_marked_output_shows_mutated_positions() {
    let temp = tempdir().unwrap();
    let fasta = write_fasta(&temp, "in.fa", ">seq1\nACGTACGT\n");

    Command::cargo_bin("variantize")
        .unwrap()
        .arg(&fasta)
        .arg("s")
        .arg("--snp-rate")
        .arg("0")
        .arg("--marked")
        .assert()
        .success()
        .stdout(">seq1\nacgtacgt\n\n");
}

#[test]
fn test_unknown_operator_warns_and_succeeds() {
    let temp = tempdir().unwrap();
    let fasta = write_fasta(&temp, "in.fa", ">seq1\nacgtacgt\n");

    Command::cargo_bin("variantize")
        .unwrap()
        .arg(&fasta)
        .arg("z")
        .assert()
        .success()
        .stdout(">seq1\nACGTACGT\n\n")
        .stderr(predicate::str::contains("Unknown operator code 'z'"));
}

#[test]
fn test_unknown_operator_warns_once_for_many_records() {
    let temp = tempdir().unwrap();
    let fasta = write_fasta(&temp, "in.fa", ">a\nacgt\n>b\nacgt\n>c\nacgt\n");

    Command::cargo_bin("variantize")
        .unwrap()
        .arg(&fasta)
        .arg("zs")
        .args(["--snp-rate", "0"])
        .assert()
        .success()
        .stdout(">a\nACGT\n\n>b\nACGT\n\n>c\nACGT\n\n")
        .stderr(predicate::function(|err: &str| {
            err.matches("Unknown operator code 'z'").count() == 1
        }));
}

#[test]
fn test_header_is_echoed_verbatim() {
    let temp = tempdir().unwrap();
    let fasta = write_fasta(&temp, "in.fa", "> s1 chromosome one\nacgt\n");

    Command::cargo_bin("variantize")
        .unwrap()
        .arg(&fasta)
        .arg("")
        .assert()
        .success()
        .stdout("> s1 chromosome one\nACGT\n\n");
}

#[test]
fn test_records_keep_file_order() {
    let temp = tempdir().unwrap();
    let fasta = write_fasta(&temp, "in.fa", ">b\nAC\nGT\n\n>a\ntttt\n");

    Command::cargo_bin("variantize")
        .unwrap()
        .arg(&fasta)
        .arg("")
        .assert()
        .success()
        .stdout(">b\nACGT\n\n>a\nTTTT\n\n");
}

#[test]
fn test_seeded_runs_are_identical() {
    let temp = tempdir().unwrap();
    let fasta = write_fasta(
        &temp,
        "in.fa",
        ">chr1\nacgtacgtacgtacgtacgtacgtacgtacgtacgtacgtacgtacgtacgtacgt\n",
    );

    let run = || {
        Command::cargo_bin("variantize")
            .unwrap()
            .arg(&fasta)
            .arg("sivt")
            .args(["--snp-rate", "0.2", "--small-indel-rate", "0.05"])
            .args(["--inversion-rate", "0.05", "--tandem-dup-rate", "0.05"])
            .args(["--seed", "7"])
            .output()
            .unwrap()
    };
    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_config_file_is_used() {
    let temp = tempdir().unwrap();
    let fasta = write_fasta(&temp, "in.fa", ">seq1\nacgtacgt\n");
    let config = temp.path().join("config.json");
    fs::write(
        &config,
        r#"{ "seed": 1, "mutation": { "substitution": { "rate": 0.0 } } }"#,
    )
    .unwrap();

    Command::cargo_bin("variantize")
        .unwrap()
        .arg(&fasta)
        .arg("ss")
        .arg("--config")
        .arg(&config)
        .arg("--marked")
        .assert()
        .success()
        .stdout(">seq1\nacgtacgt\n\n");
}

#[test]
fn test_invalid_rate_fails_before_output() {
    let temp = tempdir().unwrap();
    let fasta = write_fasta(&temp, "in.fa", ">seq1\nacgtacgt\n");

    Command::cargo_bin("variantize")
        .unwrap()
        .arg(&fasta)
        .arg("v")
        .arg("--inversion-rate")
        .arg("1.5")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid probability for inversion"));
}

#[test]
fn test_invalid_record_is_skipped_with_failure_status() {
    let temp = tempdir().unwrap();
    let fasta = write_fasta(&temp, "in.fa", ">bad\nacgnnt\n>good\nacgt\n");

    Command::cargo_bin("variantize")
        .unwrap()
        .arg(&fasta)
        .arg("")
        .assert()
        .failure()
        .stdout(">good\nACGT\n\n")
        .stderr(predicate::str::contains("Skipping record 'bad'"));
}

#[test]
fn test_missing_input_file_fails() {
    Command::cargo_bin("variantize")
        .unwrap()
        .arg("/nonexistent/input.fa")
        .arg("s")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read FASTA file"));
}

#[test]
fn test_missing_arguments_fail() {
    Command::cargo_bin("variantize")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_simseq_writes_lowercase_records() {
    Command::cargo_bin("simseq")
        .unwrap()
        .args(["50", "3", "--seed", "4"])
        .assert()
        .success()
        .stdout(predicate::function(|out: &str| {
            let lines: Vec<&str> = out.lines().collect();
            lines.len() == 6
                && lines[0] == ">0"
                && lines[2] == ">1"
                && lines[4] == ">2"
                && [1, 3, 5].iter().all(|&i| {
                    lines[i].len() == 50 && lines[i].chars().all(|c| "acgt".contains(c))
                })
        }));
}

#[test]
fn test_simseq_writes_output_file() {
    let temp = tempdir().unwrap();
    let out = temp.path().join("synthetic.fa");

    Command::cargo_bin("simseq")
        .unwrap()
        .arg("20")
        .arg("2")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with(">0\n"));
    assert_eq!(content.lines().count(), 4);
}

#[test]
fn test_simseq_output_feeds_variantize() {
    let temp = tempdir().unwrap();
    let synthetic = temp.path().join("synthetic.fa");

    Command::cargo_bin("simseq")
        .unwrap()
        .args(["200", "2"])
        .arg(&synthetic)
        .args(["--seed", "11"])
        .assert()
        .success();

    Command::cargo_bin("variantize")
        .unwrap()
        .arg(&synthetic)
        .arg("svn")
        .args(["--seed", "11"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(">0\n"));
}
