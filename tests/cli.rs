use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn turkon(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_turkon"))
        .args(args)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch turkon")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn failing_file_does_not_stop_the_rest() {
    let output = turkon(&["test_files/division_by_zero.tkn", "test_files/example2.tkn"]);
    assert!(!output.status.success());

    let out = stdout(&output);
    assert!(out.starts_with("=== TURKON Programming Language Interpreter ==="), "{out}");
    assert!(out.contains("--- Processing test_files/division_by_zero.tkn ---"), "{out}");
    assert!(out.contains("TURKON Output: 4\n"), "{out}");
    assert!(out.contains("[OK] test_files/example2.tkn completed successfully."), "{out}");
    assert!(!out.contains("[OK] test_files/division_by_zero.tkn"), "{out}");
    assert!(out.contains("=== TURKON Language Processing Complete ==="), "{out}");

    let err = stderr(&output);
    assert!(
        err.contains("Error processing test_files/division_by_zero.tkn: Arithmetic fault: division by zero"),
        "{err}"
    );
}

#[test]
fn samples_flag_runs_the_bundled_programs() {
    let output = turkon(&["--samples"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let out = stdout(&output);
    for n in 1..=5 {
        let banner = format!("[OK] test_files/example{n}.tkn completed successfully.");
        assert!(out.contains(&banner), "missing {banner:?} in {out}");
    }
    assert!(out.contains("TURKON Output: 200\n"), "{out}");
}

#[test]
fn step_limit_is_reported() {
    let output = turkon(&["--max-steps", "5", "test_files/example2.tkn"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Step limit of 5 exceeded"), "{}", stderr(&output));
}

#[test]
fn bad_arguments_fail_before_running() {
    let output = turkon(&["--max-steps"]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("--max-steps needs a value"), "{}", stderr(&output));
}

#[test]
fn long_expression_file_runs_to_completion() {
    let dir = tempfile::tempdir().unwrap();
    let path: PathBuf = dir.path().join("long.tkn");
    let sum = vec!["1"; 200_000].join(" + ");
    fs::write(&path, format!("x = {sum};\nyazdır(x);\n")).unwrap();

    let path = path.to_str().unwrap();
    let output = turkon(&[path, "test_files/example3.tkn"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("TURKON Output: 200000\n"), "{out}");
    assert!(out.contains("[OK] test_files/example3.tkn completed successfully."));
}
