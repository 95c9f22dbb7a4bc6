// Imports used by all tests in this file
// We use assert_cmd for spawning the compiled binary and
// capturing stdout/stderr in a platform-agnostic way.
use assert_cmd::prelude::*;
// We use Command from std::process to launch the binary.
use std::process::Command;
// We create temporary on-disk fixtures with assert_fs so tests
// are hermetic and do not rely on the developer's filesystem.
use assert_fs::prelude::*;
// We parse the JSON report to assert on structure.
use serde_json::Value;
// Concise assertions on stdout/stderr content.
use predicates::prelude::*;

mod util;

// Helper: the binary, started inside the fixture so no stray
// revsent.toml from the developer's tree is picked up.
fn revsent(dir: &assert_fs::TempDir) -> Command
{
    let mut cmd = Command::cargo_bin("revsent").expect("bin");
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn json_stdout(assert: &assert_cmd::assert::Assert) -> Value
{
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    serde_json::from_str(&stdout).expect("json")
}

#[test]
fn test_analyze_json_report()
{
    let tmp = util::make_corpus();

    let assert = revsent(&tmp)
        .args(["--quiet", "analyze", "reviews.csv", "--lexicon", "afinn.tsv", "--json"])
        .assert()
        .success();
    let v = json_stdout(&assert);

    // Cardinalities of the fixture corpus
    assert_eq!(v["stats"]["reviews"], 5);
    assert_eq!(v["stats"]["occurrences"], 15);
    assert_eq!(v["stats"]["scored_words"], 10);

    // Products come back ordered by id with their labels
    let products = v["products"].as_array().expect("products");
    let ids: Vec<_> = products
        .iter()
        .map(|p| p["product_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["A1", "B2", "C3"]);
    assert_eq!(products[0]["mean_rating"], 4.0);
    assert_eq!(products[0]["sentiment"], 1.0);
    assert_eq!(products[0]["quadrant"], "Positive Review/Positive Sentiment");
    assert_eq!(products[1]["quadrant"], "Negative Review/Negative Sentiment");

    // Words: count descending, then alphabetical
    let words = v["words"].as_array().expect("words");
    assert_eq!(words[0]["word"], "bad");
    assert_eq!(words[1]["word"], "good");
    assert_eq!(words[1]["count"], 2);
    assert_eq!(words[1]["score"], 3.0);
}

#[test]
fn test_analyze_writes_tables()
{
    let tmp = util::make_corpus();

    revsent(&tmp)
        .args(["analyze", "reviews.csv", "-l", "afinn.tsv", "--output-dir", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote"));

    let words = std::fs::read_to_string(tmp.path().join("out/words.csv")).expect("words.csv");
    assert!(words.starts_with("word,mean_rating,score,count\n"));
    assert!(words.contains("good,5.0,3.0,2"));

    let products =
        std::fs::read_to_string(tmp.path().join("out/products.csv")).expect("products.csv");
    assert!(products.contains("B2,1.4,-3.0,5,Negative Review/Negative Sentiment"));

    let quadrants =
        std::fs::read_to_string(tmp.path().join("out/quadrants.csv")).expect("quadrants.csv");
    assert_eq!(quadrants.lines().count(), 5);
}

// Running twice on the same input must give byte-identical tables.
#[test]
fn test_tables_are_deterministic()
{
    let tmp = util::make_corpus();

    for dir in ["run1", "run2"]
    {
        revsent(&tmp)
            .args(["--quiet", "analyze", "reviews.csv", "-l", "afinn.tsv", "-o", dir])
            .assert()
            .success();
    }

    for file in ["words.csv", "products.csv", "quadrants.csv"]
    {
        let a = std::fs::read(tmp.path().join("run1").join(file)).expect("run1");
        let b = std::fs::read(tmp.path().join("run2").join(file)).expect("run2");
        assert_eq!(a, b, "{file} differs between runs");
    }
}

#[test]
fn test_missing_column_fails()
{
    let tmp = util::make_corpus();
    tmp.child("broken.csv")
        .write_str("reviewerID,asin,reviewText\nR1,A1,good\n")
        .expect("write");

    revsent(&tmp)
        .args(["analyze", "broken.csv", "-l", "afinn.tsv", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required column"));
}

#[test]
fn test_missing_input_file_fails()
{
    let tmp = util::make_corpus();

    revsent(&tmp)
        .args(["analyze", "nope.csv", "-l", "afinn.tsv", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read review file"));
}

#[test]
fn test_header_only_needs_allow_empty()
{
    let tmp = util::make_corpus();
    tmp.child("empty.csv")
        .write_str("reviewerID,asin,overall,reviewText\n")
        .expect("write");

    revsent(&tmp)
        .args(["analyze", "empty.csv", "-l", "afinn.tsv", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no records"));

    let assert = revsent(&tmp)
        .args(["analyze", "empty.csv", "-l", "afinn.tsv", "--json", "--allow-empty"])
        .assert()
        .success();
    let v = json_stdout(&assert);
    assert_eq!(v["stats"]["reviews"], 0);
    assert!(v["words"].as_array().unwrap().is_empty());
    assert!(v["products"].as_array().unwrap().is_empty());
}

// An empty corpus still writes tables with their columns
#[test]
fn test_empty_corpus_tables_keep_headers()
{
    let tmp = util::make_corpus();
    tmp.child("empty.csv")
        .write_str("reviewerID,asin,overall,reviewText\n")
        .expect("write");

    revsent(&tmp)
        .args(["--quiet", "analyze", "empty.csv", "-l", "afinn.tsv", "--allow-empty", "-o", "out"])
        .assert()
        .success();

    let read = |name: &str| std::fs::read_to_string(tmp.path().join("out").join(name)).expect(name);
    assert_eq!(read("words.csv"), "word,mean_rating,score,count\n");
    assert_eq!(read("products.csv"), "product_id,mean_rating,sentiment,count,quadrant\n");
    // Every quadrant is still listed, with zero products
    assert_eq!(read("quadrants.csv").lines().count(), 5);
}

#[test]
fn test_no_lexicon_is_reported()
{
    let tmp = util::make_corpus();

    revsent(&tmp)
        .args(["analyze", "reviews.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no lexicon configured"));
}

#[test]
fn test_lexicon_from_config_file()
{
    let tmp = util::make_corpus();
    tmp.child("revsent.toml")
        .write_str("[resources]\nlexicon = \"afinn.tsv\"\n\n[quadrant]\nx_mid = 4.5\n")
        .expect("write config");

    let assert = revsent(&tmp)
        .args(["--quiet", "products", "reviews.csv", "--json"])
        .assert()
        .success();
    let v = json_stdout(&assert);

    // With x_mid = 4.5 product A1 (mean 4.0) is no longer a positive review
    assert_eq!(v[0]["product_id"], "A1");
    assert_eq!(v[0]["quadrant"], "Negative Review/Positive Sentiment");
}

#[test]
fn test_products_quadrant_filter()
{
    let tmp = util::make_corpus();

    let assert = revsent(&tmp)
        .args(["--quiet", "products", "reviews.csv", "-l", "afinn.tsv", "--quadrant", "neg-neg", "--json"])
        .assert()
        .success();
    let v = json_stdout(&assert);

    let rows = v.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["product_id"], "B2");
}

#[test]
fn test_words_negative_view()
{
    let tmp = util::make_corpus();

    // Default floor of 1000 hides every negative word in a tiny corpus
    let assert = revsent(&tmp)
        .args(["--quiet", "words", "reviews.csv", "-l", "afinn.tsv", "--view", "negative", "--json"])
        .assert()
        .success();
    assert!(json_stdout(&assert).as_array().unwrap().is_empty());

    let assert = revsent(&tmp)
        .args([
            "--quiet",
            "words",
            "reviews.csv",
            "-l",
            "afinn.tsv",
            "--view",
            "negative",
            "--negative-min-count",
            "0",
            "--json",
        ])
        .assert()
        .success();
    let v = json_stdout(&assert);
    let words: Vec<_> = v
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["word"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(words, vec!["awful", "hated", "terrible", "bad", "boring", "sad"]);
}

#[test]
fn test_words_table_output()
{
    let tmp = util::make_corpus();

    revsent(&tmp)
        .args(["words", "reviews.csv", "-l", "afinn.tsv", "-n", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bad").and(predicate::str::contains("good")))
        .stdout(predicate::str::contains("terrible").not());
}

#[test]
fn test_dry_run_reads_nothing()
{
    let tmp = util::make_corpus();

    // Input does not exist; dry run must still succeed
    revsent(&tmp)
        .args(["--dry-run", "--no-color", "analyze", "missing.csv", "-l", "afinn.tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN"))
        .stdout(predicate::str::contains("missing.csv"));
}

#[test]
fn test_init_refuses_overwrite()
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    revsent(&tmp)
        .arg("init")
        .assert()
        .success();
    tmp.child("revsent.toml")
        .assert(predicate::str::contains("x_mid = 3.5"));

    revsent(&tmp)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    revsent(&tmp)
        .args(["init", "--force"])
        .assert()
        .success();
}
