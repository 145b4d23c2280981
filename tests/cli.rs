use assert_cmd::Command;
use describe_subtree::TestRoot;

fn describe_subtree() -> Command {
    let mut cmd = Command::cargo_bin("describe-subtree").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn fixture() -> TestRoot {
    let root = TestRoot::new().unwrap();
    root.create_file("afile.txt", b"abc").unwrap();
    root.create_dir("sub").unwrap();
    root.hard_link("afile.txt", "sub/zfile.txt").unwrap();
    root
}

#[test]
fn describes_a_directory() {
    let root = fixture();
    describe_subtree()
        .arg("--hash-length")
        .arg("8")
        .arg(root.path())
        .assert()
        .success()
        .stdout(". dir\nafile.txt reg size 3 sha256 ba7816bf\nsub dir\nsub/zfile.txt ref ==> afile.txt\n")
        .stderr("");
}

#[test]
fn flags_are_wired_through() {
    let root = fixture();
    describe_subtree()
        .args(["--no-sizes", "--relative-hardlinks", "--numbers"])
        .arg(root.path())
        .assert()
        .success()
        .stdout("0 dir\n0/afile.txt reg\n0/sub dir\n0/sub/zfile.txt ref => ../afile.txt\n");
}

#[test]
fn multiple_paths_are_numbered() {
    let root = fixture();
    describe_subtree()
        .args(["--hash-length", "8"])
        .arg(root.join("afile.txt"))
        .arg(root.join("sub/zfile.txt"))
        .assert()
        .success()
        .stdout("0 reg size 3 sha256 ba7816bf\n1 ref ==> 0\n");
}

#[test]
fn failure_reports_one_line_and_exits_non_zero() {
    let root = fixture();
    let missing = root.join("missing");
    let output = describe_subtree()
        .arg(root.path())
        .arg(&missing)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stderr.lines().count(), 1);
    assert!(stderr.starts_with("describe-subtree: Failed to access "));
    assert!(stderr.contains(&missing.display().to_string()));
}

#[test]
fn paths_are_required() {
    describe_subtree().assert().failure();
}

#[test]
fn out_of_range_precision_is_rejected() {
    let root = fixture();
    describe_subtree()
        .args(["--time-precision", "10"])
        .arg(root.path())
        .assert()
        .failure();
}
