mod common;

use assert_fs::prelude::{FileWriteStr, PathChild};
use common::run_keg_command;
use fake::Fake;
use fake::faker::lorem::en::{Word, Words};
use predicates::prelude::*;

#[test]
fn init_reports_the_repository_path() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let dir_absolute_path = dir.path().canonicalize()?.display().to_string();

    let mut sut = run_keg_command(dir.path(), &["init"]);

    sut.assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Initialized empty keg repository in .+$",
        )?)
        .stdout(predicate::str::contains(dir_absolute_path));

    Ok(())
}

#[test]
fn init_is_safe_to_repeat() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;

    run_keg_command(dir.path(), &["init"]).assert().success();
    run_keg_command(dir.path(), &["init"]).assert().success();

    Ok(())
}

#[test]
fn added_files_show_up_in_status() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    run_keg_command(dir.path(), &["init"]).assert().success();

    let file_name = format!("{}.txt", Word().fake::<String>());
    let file_content = Words(5..10).fake::<Vec<String>>().join(" ");
    dir.child(&file_name).write_str(&file_content)?;

    run_keg_command(dir.path(), &["add", &file_name])
        .assert()
        .success();

    run_keg_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("On branch master"))
        .stdout(predicate::str::contains("Changes to be committed:"))
        .stdout(predicate::str::contains(&file_name));

    Ok(())
}

#[test]
fn adding_a_missing_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    run_keg_command(dir.path(), &["init"]).assert().success();

    run_keg_command(dir.path(), &["add", "no-such-file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));

    Ok(())
}

#[test]
fn unstage_removes_a_path_from_status() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    run_keg_command(dir.path(), &["init"]).assert().success();

    dir.child("a.txt").write_str("content")?;
    run_keg_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_keg_command(dir.path(), &["unstage", "a.txt"])
        .assert()
        .success();

    run_keg_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing staged for commit"));

    Ok(())
}

#[test]
fn first_commit_is_reported_as_the_root_commit() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    run_keg_command(dir.path(), &["init"]).assert().success();

    dir.child("a.txt").write_str("content")?;
    run_keg_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    run_keg_command(dir.path(), &["commit", "-m", "initial snapshot"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^\[\(root-commit\) [0-9a-f]{7}\] initial snapshot$",
        )?);

    Ok(())
}

#[test]
fn committing_with_nothing_staged_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    run_keg_command(dir.path(), &["init"]).assert().success();

    run_keg_command(dir.path(), &["commit", "-m", "empty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing staged for commit"));

    Ok(())
}

#[test]
fn log_lists_commits_newest_first() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    run_keg_command(dir.path(), &["init"]).assert().success();

    for message in ["first", "second"] {
        dir.child("a.txt").write_str(message)?;
        run_keg_command(dir.path(), &["add", "a.txt"])
            .assert()
            .success();
        run_keg_command(dir.path(), &["commit", "-m", message])
            .assert()
            .success();
    }

    let output = run_keg_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("first"))
        .stdout(predicate::str::contains("second"))
        .get_output()
        .stdout
        .clone();

    let output = String::from_utf8(output)?;
    assert!(output.find("second").unwrap() < output.find("first").unwrap());

    Ok(())
}

#[test]
fn log_honors_the_commit_limit() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    run_keg_command(dir.path(), &["init"]).assert().success();

    for n in 1..=3 {
        dir.child("a.txt").write_str(&format!("rev {n}"))?;
        run_keg_command(dir.path(), &["add", "a.txt"])
            .assert()
            .success();
        run_keg_command(dir.path(), &["commit", "-m", &format!("c{n}")])
            .assert()
            .success();
    }

    run_keg_command(dir.path(), &["log", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("c3"))
        .stdout(predicate::str::contains("c2").not());

    Ok(())
}

#[test]
fn branch_listing_marks_the_active_branch() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    run_keg_command(dir.path(), &["init"]).assert().success();

    run_keg_command(dir.path(), &["branch", "topic"])
        .assert()
        .success();

    run_keg_command(dir.path(), &["branch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* master"))
        .stdout(predicate::str::contains("  topic"));

    Ok(())
}

#[test]
fn checkout_switches_branches() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    run_keg_command(dir.path(), &["init"]).assert().success();

    run_keg_command(dir.path(), &["branch", "topic"])
        .assert()
        .success();
    run_keg_command(dir.path(), &["checkout", "topic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to branch 'topic'"));

    run_keg_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("On branch topic"));

    Ok(())
}

#[test]
fn deleting_the_active_branch_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    run_keg_command(dir.path(), &["init"]).assert().success();

    run_keg_command(dir.path(), &["branch", "master", "--delete"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot delete the current branch"));

    Ok(())
}

#[test]
fn inspect_prints_a_stored_blob() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    run_keg_command(dir.path(), &["init"]).assert().success();

    let file_content = Words(5..10).fake::<Vec<String>>().join(" ");
    dir.child("a.txt").write_str(&file_content)?;
    run_keg_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    // recover the blob fingerprint from the index file
    let index_content = std::fs::read_to_string(dir.path().join(".keg").join("index"))?;
    let records: serde_json::Value = serde_json::from_str(&index_content)?;
    let fingerprint = records[0]["fingerprint"]
        .as_str()
        .ok_or("missing fingerprint")?
        .to_string();

    run_keg_command(dir.path(), &["inspect", &fingerprint])
        .assert()
        .success()
        .stdout(predicate::eq(file_content));

    Ok(())
}

#[test]
fn inspect_rejects_a_malformed_fingerprint() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    run_keg_command(dir.path(), &["init"]).assert().success();

    run_keg_command(dir.path(), &["inspect", "not-a-fingerprint"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid object id"));

    Ok(())
}
