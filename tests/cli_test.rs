use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

fn fixture(
    dir: &tempfile::TempDir,
    expenses: &[[&str; 6]],
    participants: &[[&str; 5]],
) -> (std::path::PathBuf, std::path::PathBuf) {
    let expenses_path = dir.path().join("expenses.csv");
    let participants_path = dir.path().join("participants.csv");
    common::write_expenses(&expenses_path, expenses).unwrap();
    common::write_participants(&participants_path, participants).unwrap();
    (expenses_path, participants_path)
}

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let (expenses, participants) = fixture(
        &dir,
        &[["e1", "trip", "90", "USD", "alice", "equal"]],
        &[
            ["e1", "alice", "", "", ""],
            ["e1", "bob", "", "", ""],
            ["e1", "carol", "", "", ""],
        ],
    );

    let mut cmd = Command::new(cargo_bin!("dutch"));
    cmd.arg(&expenses).arg(&participants);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("group,from,to,amount"))
        .stdout(predicate::str::contains("trip,bob,alice,30"))
        .stdout(predicate::str::contains("trip,carol,alice,30"));

    Ok(())
}

#[test]
fn test_cli_mixed_policies_across_groups() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let (expenses, participants) = fixture(
        &dir,
        &[
            ["e1", "trip", "90", "USD", "ann", "shares"],
            ["e2", "dinner", "100", "EUR", "dan", "percentage"],
        ],
        &[
            ["e1", "ann", "", "", "1"],
            ["e1", "ben", "", "", "2"],
            ["e1", "cam", "", "", "3"],
            ["e2", "dan", "", "60", ""],
            ["e2", "eva", "", "40", ""],
        ],
    );

    let mut cmd = Command::new(cargo_bin!("dutch"));
    cmd.arg(&expenses).arg(&participants);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("trip,cam,ann,45"))
        .stdout(predicate::str::contains("trip,ben,ann,30"))
        .stdout(predicate::str::contains("dinner,eva,dan,40"));

    Ok(())
}

#[test]
fn test_cli_group_filter() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let (expenses, participants) = fixture(
        &dir,
        &[
            ["e1", "trip", "40", "USD", "alice", "equal"],
            ["e2", "dinner", "60", "USD", "bob", "equal"],
        ],
        &[
            ["e1", "alice", "", "", ""],
            ["e1", "bob", "", "", ""],
            ["e2", "alice", "", "", ""],
            ["e2", "bob", "", "", ""],
        ],
    );

    let mut cmd = Command::new(cargo_bin!("dutch"));
    cmd.arg(&expenses).arg(&participants).args(["--group", "trip"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("trip,bob,alice,20"))
        .stdout(predicate::str::contains("dinner").not());

    Ok(())
}

#[test]
fn test_cli_json_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let (expenses, participants) = fixture(
        &dir,
        &[["e1", "trip", "40", "USD", "alice", "equal"]],
        &[["e1", "alice", "", "", ""], ["e1", "bob", "", "", ""]],
    );

    let mut cmd = Command::new(cargo_bin!("dutch"));
    cmd.arg(&expenses).arg(&participants).arg("--json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"transfers\""))
        .stdout(predicate::str::contains("\"from\": \"bob\""))
        .stdout(predicate::str::contains("\"to\": \"alice\""));

    Ok(())
}

#[test]
fn test_cli_summary_flag() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let (expenses, participants) = fixture(
        &dir,
        &[["e1", "trip", "90", "USD", "alice", "equal"]],
        &[
            ["e1", "alice", "", "", ""],
            ["e1", "bob", "", "", ""],
            ["e1", "carol", "", "", ""],
        ],
    );

    let mut cmd = Command::new(cargo_bin!("dutch"));
    cmd.arg(&expenses).arg(&participants).arg("--summary");

    cmd.assert().success().stderr(predicate::str::contains(
        "trip: 1 expenses totalling $90.00 (avg $90.00)",
    ));

    Ok(())
}

#[test]
fn test_cli_fails_on_residual_imbalance() -> Result<(), Box<dyn std::error::Error>> {
    // Custom split that covers only 10 of the 100 the payer fronted
    let dir = tempfile::tempdir()?;
    let (expenses, participants) = fixture(
        &dir,
        &[["e1", "trip", "100", "USD", "alice", "custom"]],
        &[["e1", "bob", "10", "", ""]],
    );

    let mut cmd = Command::new(cargo_bin!("dutch"));
    cmd.arg(&expenses).arg(&participants);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("do not settle to zero"));

    Ok(())
}

#[test]
fn test_cli_skips_malformed_rows() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let (expenses, participants) = fixture(
        &dir,
        &[
            ["e0", "trip", "not-a-number", "USD", "alice", "equal"],
            ["e1", "trip", "40", "USD", "alice", "equal"],
        ],
        &[["e1", "alice", "", "", ""], ["e1", "bob", "", "", ""]],
    );

    let mut cmd = Command::new(cargo_bin!("dutch"));
    cmd.arg(&expenses).arg(&participants);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("trip,bob,alice,20"))
        .stderr(predicate::str::contains("malformed expense row"));

    Ok(())
}

#[test]
fn test_cli_missing_input_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let (expenses, _) = fixture(&dir, &[], &[]);

    let mut cmd = Command::new(cargo_bin!("dutch"));
    cmd.arg(&expenses).arg(dir.path().join("missing.csv"));

    cmd.assert().failure();
    Ok(())
}
