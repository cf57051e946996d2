mod common;

use common::EXPANDED;
use common::SCENARIO;
use common::unroll_cmd;
use serde_json::Value;
use unroll_core::AnyEmptyResult;

#[test]
fn check_fails_when_stale() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let path = tmp.path().join("generated.py");
	std::fs::write(&path, SCENARIO)?;

	unroll_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.arg(&path)
		.assert()
		.code(1)
		.stderr(predicates::str::contains("Stale files:"))
		.stderr(predicates::str::contains("generated.py"));

	// Checking never writes.
	assert_eq!(std::fs::read_to_string(&path)?, SCENARIO);

	Ok(())
}

#[test]
fn check_passes_when_up_to_date() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let path = tmp.path().join("generated.py");
	std::fs::write(&path, EXPANDED)?;

	unroll_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.arg(&path)
		.assert()
		.success()
		.stdout(predicates::str::contains("up to date"));

	Ok(())
}

#[test]
fn check_passes_for_files_without_markers() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let path = tmp.path().join("plain.txt");
	std::fs::write(&path, "nothing to see\nhere")?;

	unroll_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.arg(&path)
		.assert()
		.success();

	Ok(())
}

#[test]
fn check_diff_shows_generated_lines() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let path = tmp.path().join("generated.py");
	std::fs::write(&path, SCENARIO)?;

	unroll_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.arg("--diff")
		.arg(&path)
		.assert()
		.code(1)
		.stderr(predicates::str::contains("-stale body"))
		.stderr(predicates::str::contains("+Hi a = 1"));

	Ok(())
}

#[test]
fn check_json_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let stale = tmp.path().join("stale.py");
	let fresh = tmp.path().join("fresh.py");
	std::fs::write(&stale, SCENARIO)?;
	std::fs::write(&fresh, EXPANDED)?;

	let output = unroll_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.arg("--format")
		.arg("json")
		.arg(&stale)
		.arg(&fresh)
		.output()?;

	assert_eq!(output.status.code(), Some(1));
	let json: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(json["ok"], Value::Bool(false));
	assert_eq!(json["files"][0]["stale"], Value::Bool(true));
	assert_eq!(json["files"][1]["stale"], Value::Bool(false));
	assert_eq!(json["files"][1]["generated_lines"], Value::from(2));

	Ok(())
}
