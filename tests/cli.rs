use assert_cmd::Command;
use predicates::prelude::*;
use std::error::Error;
use std::fs;
use tempfile::TempDir;

fn write_program(dir: &TempDir, text: &str) -> Result<String, Box<dyn Error>> {
    let path = dir.path().join("program.txt");
    fs::write(&path, text)?;
    Ok(path.to_str().expect("utf-8 temp path").to_string())
}

#[test]
fn test_console_mode_echoes_input() -> Result<(), Box<dyn Error>> {
    let temp_dir = TempDir::new()?;
    let program = write_program(&temp_dir, "3,0,4,0,99\n")?;

    let mut cmd = Command::cargo_bin("intcode")?;
    cmd.arg(&program).arg("--input").arg("42");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("42"));

    Ok(())
}

#[test]
fn test_amplify_mode_with_phases() -> Result<(), Box<dyn Error>> {
    let temp_dir = TempDir::new()?;
    let program = write_program(
        &temp_dir,
        "3,15,3,16,1002,16,10,16,1,16,15,15,4,15,99,0,0",
    )?;

    let mut cmd = Command::cargo_bin("intcode")?;
    cmd.arg(&program)
        .arg("--mode")
        .arg("amplify")
        .arg("--phases")
        .arg("0,1,2,3,4");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("43210"));

    Ok(())
}

#[test]
fn test_arcade_mode_reports_block_count() -> Result<(), Box<dyn Error>> {
    let temp_dir = TempDir::new()?;
    let program = write_program(&temp_dir, "104,0,104,0,104,2,104,-1,104,0,104,5,99")?;

    let mut cmd = Command::cargo_bin("intcode")?;
    cmd.arg(&program).arg("--mode").arg("arcade");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1"));

    Ok(())
}

#[test]
fn test_faulting_program_exits_nonzero() -> Result<(), Box<dyn Error>> {
    let temp_dir = TempDir::new()?;
    let program = write_program(&temp_dir, "42,0,0,0")?;

    let mut cmd = Command::cargo_bin("intcode")?;
    cmd.arg(&program);

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("Unknown opcode"));

    Ok(())
}

#[test]
fn test_unknown_mode_is_rejected() -> Result<(), Box<dyn Error>> {
    let temp_dir = TempDir::new()?;
    let program = write_program(&temp_dir, "99")?;

    let mut cmd = Command::cargo_bin("intcode")?;
    cmd.arg(&program).arg("--mode").arg("bogus");

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("unknown mode"));

    Ok(())
}

#[test]
fn test_json_event_output() -> Result<(), Box<dyn Error>> {
    let temp_dir = TempDir::new()?;
    let program = write_program(&temp_dir, "104,7,99")?;

    let mut cmd = Command::cargo_bin("intcode")?;
    cmd.arg(&program).arg("--json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"tag\":\"console\""));

    Ok(())
}
