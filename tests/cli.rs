use assert_cmd::Command;
use std::io::Write;

#[test]
fn runs_a_script_and_exits_zero() {
    let mut script = tempfile::Builder::new().suffix(".rocks").tempfile().unwrap();
    writeln!(script, "print 1 + 2;").unwrap();

    Command::cargo_bin("rocks").unwrap()
        .arg(script.path())
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn syntax_error_exits_65() {
    let mut script = tempfile::Builder::new().suffix(".rocks").tempfile().unwrap();
    writeln!(script, "var;").unwrap();

    Command::cargo_bin("rocks").unwrap()
        .arg(script.path())
        .assert()
        .code(65);
}

#[test]
fn runtime_error_exits_70() {
    let mut script = tempfile::Builder::new().suffix(".rocks").tempfile().unwrap();
    writeln!(script, "print 1 + nil;").unwrap();

    Command::cargo_bin("rocks").unwrap()
        .arg(script.path())
        .assert()
        .code(70);
}

#[test]
fn missing_script_exits_64() {
    Command::cargo_bin("rocks").unwrap()
        .arg("/no/such/file.rocks")
        .assert()
        .code(64);
}

#[test]
fn too_many_arguments_exits_64() {
    let output = Command::cargo_bin("rocks").unwrap()
        .arg("one.rocks")
        .arg("two.rocks")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(64));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}
