use assert_cmd::Command;

#[test]
fn rejects_non_tty_stdin() {
    let output = Command::cargo_bin("typetrial")
        .unwrap()
        .write_stdin("")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("stdin must be a tty"), "stderr: {stderr}");
}

#[test]
fn rejects_unknown_view() {
    Command::cargo_bin("typetrial")
        .unwrap()
        .args(["--view", "nowhere"])
        .assert()
        .failure();
}

#[test]
fn help_lists_the_flags() {
    let output = Command::cargo_bin("typetrial")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    for flag in ["--view", "--round-secs", "--config", "--log-file"] {
        assert!(help.contains(flag), "missing {flag} in help");
    }
}
