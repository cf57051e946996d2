mod common;

use common::EXPANDED;
use common::SCENARIO;
use common::unroll_cmd;
use unroll_core::AnyEmptyResult;

#[test]
fn update_rewrites_file_in_place() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let path = tmp.path().join("generated.py");
	std::fs::write(&path, SCENARIO)?;

	unroll_cmd()
		.current_dir(tmp.path())
		.arg("update")
		.arg(&path)
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"Updated 1 file(s): 1 region(s), 2 line(s) generated.",
		));

	assert_eq!(std::fs::read_to_string(&path)?, EXPANDED);

	Ok(())
}

#[test]
fn update_dry_run_does_not_write() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let path = tmp.path().join("generated.py");
	std::fs::write(&path, SCENARIO)?;

	unroll_cmd()
		.current_dir(tmp.path())
		.arg("update")
		.arg("--dry-run")
		.arg(&path)
		.assert()
		.success()
		.stdout(EXPANDED);

	assert_eq!(std::fs::read_to_string(&path)?, SCENARIO);

	Ok(())
}

#[test]
fn update_is_stable_on_second_run() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let path = tmp.path().join("generated.py");
	std::fs::write(&path, SCENARIO)?;

	for _ in 0..2 {
		unroll_cmd()
			.current_dir(tmp.path())
			.arg("update")
			.arg(&path)
			.assert()
			.success();
	}

	assert_eq!(std::fs::read_to_string(&path)?, EXPANDED);

	Ok(())
}

#[test]
fn update_aborts_on_ragged_table() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let path = tmp.path().join("broken.py");
	let content = SCENARIO.replace("b,2", "b");
	std::fs::write(&path, &content)?;

	unroll_cmd()
		.current_dir(tmp.path())
		.arg("update")
		.arg(&path)
		.assert()
		.code(2)
		.stderr(predicates::str::contains("malformed table"));

	assert_eq!(std::fs::read_to_string(&path)?, content);

	Ok(())
}

#[test]
fn update_fails_for_missing_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	unroll_cmd()
		.current_dir(tmp.path())
		.arg("update")
		.arg(tmp.path().join("missing.py"))
		.assert()
		.code(2);

	assert!(!tmp.path().join("missing.py").exists());

	Ok(())
}

#[test]
fn update_requires_a_file() {
	unroll_cmd().arg("update").assert().failure();
}

#[test]
fn update_reads_markers_from_discovered_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("unroll.toml"),
		"[markers]\ntemplate = \"// @template\"\ntable = \"// @table\"\nunroll = \
		 \"// @unroll\"\nend = \"// @end\"\n",
	)?;
	let path = tmp.path().join("consts.rs");
	std::fs::write(
		&path,
		"/*\n// @template\npub const {name}: u8 = {value};\n// @end\n// @table\nname,value\nONE,\
		 1\n// @end\n*/\n// @unroll\nstale\n// @end\n",
	)?;

	unroll_cmd()
		.current_dir(tmp.path())
		.arg("update")
		.arg(&path)
		.assert()
		.success();

	let content = std::fs::read_to_string(&path)?;
	assert!(content.ends_with("*/\n// @unroll\npub const ONE: u8 = 1;\n// @end\n"));

	Ok(())
}

#[test]
fn update_accepts_explicit_config_path() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let config = tmp.path().join("custom.toml");
	std::fs::write(&config, "[table]\ndelimiter = \";\"\n")?;
	let path = tmp.path().join("generated.py");
	let content = SCENARIO
		.replace("Name,Value", "Name;Value")
		.replace("a,1", "a;1")
		.replace("b,2", "b;2");
	std::fs::write(&path, content)?;

	unroll_cmd()
		.current_dir(tmp.path())
		.arg("--config")
		.arg(&config)
		.arg("update")
		.arg(&path)
		.assert()
		.success();

	let content = std::fs::read_to_string(&path)?;
	assert!(content.contains("\nHi a = 1\nHi b = 2\n"));

	Ok(())
}

#[test]
fn update_rejects_invalid_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("unroll.toml"), "[table]\ndelimiter = \"ab\"\n")?;
	let path = tmp.path().join("generated.py");
	std::fs::write(&path, SCENARIO)?;

	unroll_cmd()
		.current_dir(tmp.path())
		.arg("update")
		.arg(&path)
		.assert()
		.code(2)
		.stderr(predicates::str::contains("invalid table delimiter"));

	assert_eq!(std::fs::read_to_string(&path)?, SCENARIO);

	Ok(())
}
