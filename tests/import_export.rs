use assert_cmd::Command;
use predicates::prelude::*;
use std::{fs, path::Path};

fn contactbook(file: &Path) -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env("CONTACTBOOK_FILE", file).env("STORAGE_CHOICE", "json");
    cmd
}

#[test]
fn import_then_export() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let file = dir.path().join("contactbook.json");
    let src = dir.path().join("contacts.csv");
    let des = dir.path().join("out");
    fs::create_dir(&des)?;

    fs::write(
        &src,
        "name,phone,email\n\
         Alice,555-1234,alice@example.com\n\
         Bob,111,bob@x.com\n\
         Alice,000,dup@example.com\n",
    )?;

    contactbook(&file)
        .args(["import", "--src"])
        .arg(&src)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Successfully imported 2 contacts (1 skipped).",
        ));

    contactbook(&file)
        .args(["export", "--des"])
        .arg(&des)
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully exported 2 contacts"));

    let exported = fs::read_to_string(des.join("exported.csv"))?;
    assert_eq!(
        exported,
        "name,phone,email\nAlice,555-1234,alice@example.com\nBob,111,bob@x.com\n"
    );

    // Export path with the wrong extension
    contactbook(&file)
        .args(["export", "--des"])
        .arg(dir.path().join("contacts.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Export file must be a .csv file"));

    Ok(())
}
