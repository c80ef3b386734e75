//! End-to-end flow across the five binaries: index a tiny corpus, then
//! drive search, boolean-AND, evaluate and get-doc against it.

mod common;

use std::fs;

use predicates::prelude::*;
use tempfile::TempDir;

use common::{bin, write_sample_corpus_gz};

fn index_sample(source: &std::path::Path, index_dir: &std::path::Path) {
    bin("index")
        .arg(source)
        .arg(index_dir)
        .arg("false")
        .assert()
        .success();
}

#[test]
fn index_then_get_doc_round_trips_a_document() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("corpus.gz");
    write_sample_corpus_gz(&source);
    let index_dir = dir.path().join("idx");

    bin("index")
        .arg(&source)
        .arg(&index_dir)
        .arg("false")
        .assert()
        .success()
        .stdout(predicate::str::contains("indexed 2 documents"));

    bin("get-doc")
        .arg(&index_dir)
        .arg("docno")
        .arg("LA010189-0001")
        .assert()
        .success()
        .stdout(predicate::str::contains("docno: LA010189-0001"))
        .stdout(predicate::str::contains("headline: Cats Win"));

    bin("get-doc")
        .arg(&index_dir)
        .arg("id")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("docno: LA020289-0002"));
}

#[test]
fn index_refuses_an_existing_destination() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("corpus.gz");
    write_sample_corpus_gz(&source);
    let index_dir = dir.path().join("idx");
    fs::create_dir_all(&index_dir).unwrap();

    bin("index")
        .arg(&source)
        .arg(&index_dir)
        .arg("false")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn index_requires_absolute_paths() {
    bin("index")
        .arg("relative.gz")
        .arg("relative-dest")
        .arg("false")
        .assert()
        .failure()
        .stderr(predicate::str::contains("absolute"));
}

#[test]
fn search_repl_finds_a_query_and_exits_cleanly() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("corpus.gz");
    write_sample_corpus_gz(&source);
    let index_dir = dir.path().join("idx");
    index_sample(&source, &index_dir);

    bin("search")
        .arg(&index_dir)
        .write_stdin("cats\nq\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cats Win"))
        .stdout(predicate::str::contains("LA010189-0001"));
}

#[test]
fn search_reports_no_results_for_an_unknown_term() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("corpus.gz");
    write_sample_corpus_gz(&source);
    let index_dir = dir.path().join("idx");
    index_sample(&source, &index_dir);

    bin("search")
        .arg(&index_dir)
        .write_stdin("zzyzx\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found"));
}

#[test]
fn boolean_and_writes_a_run_file_for_an_intersecting_topic() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("corpus.gz");
    write_sample_corpus_gz(&source);
    let index_dir = dir.path().join("idx");
    index_sample(&source, &index_dir);

    let topics_file = dir.path().join("topics.json");
    fs::write(&topics_file, r#"{"401": "cats dogs", "416": "ignored"}"#).unwrap();
    let output_file = dir.path().join("run.txt");

    bin("boolean-and")
        .arg(&index_dir)
        .arg(&topics_file)
        .arg(&output_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote 1 run lines"));

    let run_contents = fs::read_to_string(&output_file).unwrap();
    assert_eq!(run_contents.trim(), "401 QO LA010189-0001 1 1 ctiscareAND");
}

#[test]
fn boolean_and_refuses_an_existing_output_file() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("corpus.gz");
    write_sample_corpus_gz(&source);
    let index_dir = dir.path().join("idx");
    index_sample(&source, &index_dir);

    let topics_file = dir.path().join("topics.json");
    fs::write(&topics_file, r#"{"401": "cats"}"#).unwrap();
    let output_file = dir.path().join("run.txt");
    fs::write(&output_file, "existing").unwrap();

    bin("boolean-and")
        .arg(&index_dir)
        .arg(&topics_file)
        .arg(&output_file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn evaluate_scores_a_run_against_qrels_and_writes_a_metrics_file() {
    let dir = TempDir::new().unwrap();
    let qrels = dir.path().join("qrels.txt");
    fs::write(&qrels, "401 0 LA010189-0001 1\n").unwrap();
    let run = dir.path().join("myrun.txt");
    fs::write(&run, "401 QO LA010189-0001 1 1.0 tag\n").unwrap();

    bin("evaluate")
        .current_dir(dir.path())
        .arg(&qrels)
        .arg(&run)
        .assert()
        .success()
        .stdout(predicate::str::contains("ap 401 1.000"));

    assert!(dir.path().join("myrun_results.txt").exists());
}

#[test]
fn evaluate_fails_on_a_malformed_run_line() {
    let dir = TempDir::new().unwrap();
    let qrels = dir.path().join("qrels.txt");
    fs::write(&qrels, "401 0 LA010189-0001 1\n").unwrap();
    let run = dir.path().join("run.txt");
    fs::write(&run, "401 QO LA010189-0001 only-five-cols\n").unwrap();

    bin("evaluate")
        .current_dir(dir.path())
        .arg(&qrels)
        .arg(&run)
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse error"));
}

#[test]
fn get_doc_reports_not_found_for_an_absent_docno() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("corpus.gz");
    write_sample_corpus_gz(&source);
    let index_dir = dir.path().join("idx");
    index_sample(&source, &index_dir);

    bin("get-doc")
        .arg(&index_dir)
        .arg("docno")
        .arg("LA123199-9999")
        .assert()
        .success()
        .stdout(predicate::str::contains("Document not found"));
}

#[test]
fn get_doc_rejects_a_malformed_docno() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("corpus.gz");
    write_sample_corpus_gz(&source);
    let index_dir = dir.path().join("idx");
    index_sample(&source, &index_dir);

    bin("get-doc")
        .arg(&index_dir)
        .arg("docno")
        .arg("not-a-docno")
        .assert()
        .failure()
        .stderr(predicate::str::contains("docno"));
}
