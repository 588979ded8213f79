use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn addrbook(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("addrbook").unwrap();
    cmd.env("ADDRBOOK_DATA_DIR", data_dir.path());
    cmd
}

fn book_file(data_dir: &TempDir) -> std::path::PathBuf {
    data_dir.path().join("data").join("address_book.json")
}

#[test]
fn test_add_then_find() {
    let temp = TempDir::new().unwrap();

    addrbook(&temp)
        .args(["add", "John Smith", "--phone", "555123456", "--email", "john@smith.net"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID: 1, Name: John Smith"));

    addrbook(&temp)
        .args(["add", "Jane Doe", "--phone", "111222333"])
        .assert()
        .success();

    addrbook(&temp)
        .args(["find", "smith"])
        .assert()
        .success()
        .stdout(predicate::str::contains("John Smith"))
        .stdout(predicate::str::contains("Jane Doe").not());

    addrbook(&temp)
        .args(["find", "555"])
        .assert()
        .success()
        .stdout(predicate::str::contains("John Smith"));
}

#[test]
fn test_invalid_phone_rejected() {
    let temp = TempDir::new().unwrap();

    addrbook(&temp)
        .args(["add", "Ann", "--phone", "12345"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid phone number"));

    assert!(!book_file(&temp).exists());
}

#[test]
fn test_delete_reuses_id() {
    let temp = TempDir::new().unwrap();

    addrbook(&temp).args(["add", "First"]).assert().success();
    addrbook(&temp).args(["add", "Second"]).assert().success();

    addrbook(&temp)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted contact: First"));

    addrbook(&temp)
        .args(["add", "Third"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID: 1, Name: Third"));

    addrbook(&temp)
        .args(["delete", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record not found: 9"));
}

#[test]
fn test_list_and_pages() {
    let temp = TempDir::new().unwrap();

    for i in 0..7 {
        addrbook(&temp)
            .args(["add", &format!("Person {}", i)])
            .assert()
            .success();
    }

    addrbook(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 7 contact(s)"));

    addrbook(&temp)
        .args(["list", "--page", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Person 6"))
        .stdout(predicate::str::contains("Total: 2 contact(s)"));
}

#[test]
fn test_edit_contact() {
    let temp = TempDir::new().unwrap();

    addrbook(&temp)
        .args(["add", "Ann", "--phone", "111111111"])
        .assert()
        .success();

    addrbook(&temp)
        .args([
            "edit",
            "1",
            "--name",
            "Ann Smith",
            "--replace-phone",
            "111111111",
            "222222222",
            "--birthday",
            "1990-02-03",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: Ann Smith, Phones: 222222222"));

    addrbook(&temp)
        .args(["show", "ID:1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Birthday: 1990-02-03"));
}

#[test]
fn test_corrupt_file_is_reported_and_kept() {
    let temp = TempDir::new().unwrap();
    let path = book_file(&temp);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{ not json").unwrap();

    addrbook(&temp)
        .args(["add", "Ann"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is unreadable"));

    assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
}

#[test]
fn test_shell_session() {
    let temp = TempDir::new().unwrap();

    addrbook(&temp)
        .write_stdin("add\nJohn Smith\n\n555123456\n\n\nfind\njohn\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added contact with ID 1."))
        .stdout(predicate::str::contains("Address book saved."));

    addrbook(&temp)
        .args(["find", "555123456"])
        .assert()
        .success()
        .stdout(predicate::str::contains("John Smith"));
}

#[test]
fn test_export_csv() {
    let temp = TempDir::new().unwrap();

    addrbook(&temp)
        .args(["add", "Ann", "--phone", "111111111", "--phone", "222222222"])
        .assert()
        .success();

    addrbook(&temp)
        .args(["export", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID,Name,Phones,Emails,Birthday"))
        .stdout(predicate::str::contains("1,Ann,111111111;222222222,,"));
}

#[test]
fn test_history() {
    let temp = TempDir::new().unwrap();

    addrbook(&temp).args(["add", "Ann"]).assert().success();
    addrbook(&temp).args(["delete", "1"]).assert().success();

    addrbook(&temp)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE"))
        .stdout(predicate::str::contains("DELETE"));
}

#[test]
fn test_config_init_writes_settings() {
    let temp = TempDir::new().unwrap();

    addrbook(&temp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Page size:        5"));
    assert!(!temp.path().join("config.json").exists());

    addrbook(&temp)
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings written to"));

    let written = fs::read_to_string(temp.path().join("config.json")).unwrap();
    assert!(written.contains("\"page_size\": 5"));
    assert!(written.contains("\"leap_day_policy\": \"march_first\""));
}

#[test]
fn test_birthday_with_whitespace_rejected() {
    let temp = TempDir::new().unwrap();

    addrbook(&temp)
        .args(["add", "Ann", "--birthday", " 1990-01-15"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid birthday"));
}
