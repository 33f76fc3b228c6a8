//! Integration tests for the command-line interface (-in with -eval/-save/-dump)

use std::path::PathBuf;
use std::process::Command;

fn temp_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "sexpsheet_cli_{}_{}_{}_{:?}.txt",
        tag,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos(),
        std::thread::current().id(),
    ))
}

struct Cleanup(Vec<PathBuf>);
impl Drop for Cleanup {
    fn drop(&mut self) {
        for path in &self.0 {
            let _ = std::fs::remove_file(path);
        }
    }
}

fn run_command(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_sexpsheet"))
        // Tests must not depend on a user's ~/.config/sexpsheet/config.toml.
        .env("XDG_CONFIG_HOME", std::env::temp_dir().join("sexpsheet_cli_no_config"))
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn sheet_file(tag: &str, content: &str) -> (PathBuf, Cleanup) {
    let path = temp_path(tag);
    std::fs::write(&path, content).unwrap();
    (path.clone(), Cleanup(vec![path]))
}

#[test]
fn test_eval_number_prints_six_decimals() {
    let (path, _cleanup) = sheet_file("sum", "A1 1\nA2 2\nA3 =(SUM A1:A2)\n");
    let (stdout, _, code) = run_command(&["-in", path.to_str().unwrap(), "-eval", "A3"]);
    assert_eq!(stdout.trim(), "3.000000");
    assert_eq!(code, 0);
}

#[test]
fn test_eval_non_number_prints_verbatim() {
    let (path, _cleanup) = sheet_file(
        "verbatim",
        "A1 1\nB1 =(< A1 2)\nC1 =(ENUM A1 D1)\nD2 \"hi\"\n",
    );
    let p = path.to_str().unwrap();
    let (stdout, _, code) = run_command(&["-in", p, "-eval", "B1"]);
    assert_eq!(stdout.trim(), "true");
    assert_eq!(code, 0);

    let (stdout, _, _) = run_command(&["-in", p, "-eval", "C1"]);
    assert_eq!(stdout.trim(), "1.0 <blank>");

    let (stdout, _, _) = run_command(&["-in", p, "-eval", "D2"]);
    assert_eq!(stdout.trim(), "\"hi\"");
}

#[test]
fn test_eval_reports_every_error_cell() {
    let (path, _cleanup) = sheet_file("errors", "A1 =B1\nB1 =A1\nC1 5\nC2 =(< 4)\n");
    let (stdout, _, code) = run_command(&["-in", path.to_str().unwrap(), "-eval", "C1"]);
    assert_eq!(code, 1);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Error in cell A1: !#ERROR_CYCLICREF",
            "Error in cell B1: !#ERROR_CYCLICREF",
            "Error in cell C2: !#ERROR_ARITY",
        ]
    );
}

#[test]
fn test_dump_lists_populated_cells() {
    let (path, _cleanup) = sheet_file("dump", "B1 =(PRODUCT A1 4)\nA1 2\n");
    let (stdout, _, code) = run_command(&["-in", path.to_str().unwrap(), "-dump"]);
    assert_eq!(stdout, "A1 2.0\nB1 8.0\n");
    assert_eq!(code, 0);
}

#[test]
fn test_save_round_trips_content() {
    let (input, _cleanup_in) = sheet_file("save_in", "B2 =(SUM A1)  \nA1 \"x\"\n");
    let output = temp_path("save_out");
    let _cleanup_out = Cleanup(vec![output.clone()]);

    let (_, _, code) = run_command(&[
        "-in",
        input.to_str().unwrap(),
        "-save",
        output.to_str().unwrap(),
    ]);
    assert_eq!(code, 0);
    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written, "A1 \"x\"\nB2 =(SUM A1)  \n");
}

#[test]
fn test_config_limits_apply() {
    let (sheet, _cleanup_sheet) = sheet_file("limits", "A1 =(SUM B1:C9)\n");
    let config = temp_path("config").with_extension("toml");
    std::fs::write(&config, "[limits]\nmax_block_cells = 4\n").unwrap();
    let _cleanup_config = Cleanup(vec![config.clone()]);

    let (stdout, _, code) = run_command(&[
        "-in",
        sheet.to_str().unwrap(),
        "-dump",
        "--config",
        config.to_str().unwrap(),
    ]);
    assert_eq!(stdout.trim(), "A1 !#ERROR_RANGETOOLARGE");
    assert_eq!(code, 0);
}

#[test]
fn test_bad_config_warns_and_uses_defaults() {
    let (sheet, _cleanup_sheet) = sheet_file("badconfig", "A1 =(SUM 1 2)\n");
    let config = temp_path("badconfig").with_extension("toml");
    std::fs::write(&config, "[limits\n").unwrap();
    let _cleanup_config = Cleanup(vec![config.clone()]);

    let (stdout, stderr, code) = run_command(&[
        "--config",
        config.to_str().unwrap(),
        "-in",
        sheet.to_str().unwrap(),
        "-eval",
        "A1",
    ]);
    assert_eq!(stdout.trim(), "3.000000");
    assert!(stderr.contains("Warning: Failed to parse"));
    assert_eq!(code, 0);
}

#[test]
fn test_malformed_file_reports_line() {
    let (path, _cleanup) = sheet_file("malformed", "A1 1\nnope\n");
    let (_, stderr, code) = run_command(&["-in", path.to_str().unwrap(), "-dump"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("line 2"));
}

#[test]
fn test_missing_input_file() {
    let path = temp_path("missing");
    let (_, stderr, code) = run_command(&["-in", path.to_str().unwrap(), "-dump"]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("Error: Failed to load"));
}

#[test]
fn test_invalid_cell_argument() {
    let (path, _cleanup) = sheet_file("badcell", "A1 1\n");
    let (_, stderr, code) = run_command(&["-in", path.to_str().unwrap(), "-eval", "a1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid cell reference: a1"));
}

#[test]
fn test_usage_errors() {
    let (_, stderr, code) = run_command(&["-dump"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("No input file given"));

    let (_, stderr, code) = run_command(&["-h"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("Usage: sexpsheet"));
}
