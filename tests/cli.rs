use std::{fs, process::Command};
use tempfile::tempdir;

const BIN: &str = env!("CARGO_BIN_EXE_nodereset");

#[test]
fn default_paths_read_parent_and_write_cwd() {
    let root = tempdir().unwrap();
    let work = root.path().join("scripts");
    fs::create_dir(&work).unwrap();
    fs::write(root.path().join("data.csv"), "id,nodeid,value\n1,5,a\n2,7,b\n").unwrap();

    let out = Command::new(BIN)
        .current_dir(&work)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "Success! Check out 'data.csv' file.\n"
    );
    assert_eq!(
        fs::read_to_string(work.join("data.csv")).unwrap(),
        "id,nodeid,value\n1,1,a\n2,1,b\n"
    );
    // source is left alone
    assert_eq!(
        fs::read_to_string(root.path().join("data.csv")).unwrap(),
        "id,nodeid,value\n1,5,a\n2,7,b\n"
    );
}

#[test]
fn explicit_flags() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("sensors.csv");
    let output = dir.path().join("reset.csv");
    fs::write(&input, "station,temp\nA,1\nB,2\n").unwrap();

    let out = Command::new(BIN)
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .args(["--column", "station", "--value", "Z"])
        .output()
        .unwrap();

    assert!(out.status.success());
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "station,temp\nZ,1\nZ,2\n"
    );
}

#[test]
fn missing_column_exits_non_zero() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.csv");
    let output = dir.path().join("out.csv");
    fs::write(&input, "id,value\n1,a\n").unwrap();

    let out = Command::new(BIN)
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .output()
        .unwrap();

    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("nodeid"));
    assert!(!output.exists());
}

#[test]
fn missing_input_exits_non_zero() {
    let dir = tempdir().unwrap();

    let out = Command::new(BIN)
        .current_dir(dir.path())
        .arg("--input")
        .arg("absent.csv")
        .output()
        .unwrap();

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("absent.csv"));
    assert!(!dir.path().join("data.csv").exists());
}
