#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn redirects_cmd() -> assert_cmd::Command {
	assert_cmd::Command::cargo_bin("redirects").unwrap()
}

const SAMPLE: &str = r#"
# Implicit 301 redirects
/home              /
/blog/my-post.php  /blog/my-post
/google            https://www.google.com

# Rewrite a path
/pass-through /index.html    200

# Proxying
/api/*  https://api.example.com/:splat  200

# Forcing
/app/*  /app/index.html  200!

# Params
/articles id=:id tag=:tag /posts/:tag/:id 301!
/israel/*  /israel/he/:splat  302  Country=au,nz Language=he
"#;

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
	let path = dir.path().join(name);
	fs::write(&path, content).unwrap();
	path
}

fn parse_json(output: &[u8]) -> serde_json::Value {
	serde_json::from_slice(output).unwrap()
}

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	redirects_cmd()
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains("_redirects"));
}

#[test]
fn test_version_flag() {
	redirects_cmd()
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("redirects"));
}

#[test]
fn test_no_args_shows_help() {
	redirects_cmd()
		.assert()
		.failure()
		.stderr(predicate::str::contains("Usage"));
}

// ============================================================================
// parse subcommand tests
// ============================================================================

#[test]
fn test_parse_file_outputs_json() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_file(&temp_dir, "_redirects", SAMPLE);

	let output = redirects_cmd()
		.arg("parse")
		.arg(&path)
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	let json = parse_json(&output);
	let rules = json.as_array().unwrap();
	assert_eq!(rules.len(), 8);

	assert_eq!(rules[0]["From"], "/home");
	assert_eq!(rules[0]["To"], "/");
	assert_eq!(rules[0]["Status"], 301);
	assert_eq!(rules[0]["Force"], false);
	assert!(rules[0]["Params"].is_null());

	assert_eq!(rules[5]["Status"], 200);
	assert_eq!(rules[5]["Force"], true);

	assert_eq!(rules[6]["Params"]["id"], ":id");
	assert_eq!(rules[6]["Params"]["tag"], ":tag");
	assert_eq!(rules[6]["Force"], true);
}

#[test]
fn test_parse_stdin() {
	let output = redirects_cmd()
		.args(["parse", "--compact"])
		.write_stdin("/ /auzy 302 Country=au,nz Language=he\n")
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	let json = parse_json(&output);
	assert_eq!(json[0]["Status"], 302);
	assert_eq!(json[0]["Country"], serde_json::json!(["au", "nz"]));
	assert_eq!(json[0]["Language"], serde_json::json!(["he"]));
}

#[test]
fn test_parse_dash_reads_stdin() {
	redirects_cmd()
		.args(["parse", "-", "--compact"])
		.write_stdin("/home /\n")
		.assert()
		.success()
		.stdout(predicate::str::contains(r#""From":"/home""#));
}

#[test]
fn test_parse_error_reports_line() {
	redirects_cmd()
		.arg("parse")
		.write_stdin("/home /\n/broken\n")
		.assert()
		.failure()
		.stderr(predicate::str::contains("line 2"))
		.stderr(predicate::str::contains("missing destination path"));
}

#[test]
fn test_parse_missing_file() {
	let temp_dir = tempfile::tempdir().unwrap();

	redirects_cmd()
		.arg("parse")
		.arg(temp_dir.path().join("nope"))
		.assert()
		.failure()
		.stderr(predicate::str::contains("Failed to open redirects file"));
}

// ============================================================================
// check subcommand tests
// ============================================================================

#[test]
fn test_check_summary() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_file(&temp_dir, "_redirects", SAMPLE);

	redirects_cmd()
		.arg("check")
		.arg(&path)
		.assert()
		.success()
		.stdout(predicate::str::contains("8 rules are valid"))
		.stdout(predicate::str::contains("rewrites: 3"))
		.stdout(predicate::str::contains("proxies: 2"))
		.stdout(predicate::str::contains("forced: 2"));
}

#[test]
fn test_check_invalid() {
	redirects_cmd()
		.arg("check")
		.write_stdin("/home / 302 foo=bar\n")
		.assert()
		.failure()
		.stderr(predicate::str::contains("Invalid redirects"))
		.stderr(predicate::str::contains("unknown option `foo`"));
}

#[test]
fn test_check_comments_only() {
	redirects_cmd()
		.arg("check")
		.write_stdin("# nothing here\n\n")
		.assert()
		.success()
		.stdout(predicate::str::contains("0 rules are valid"));
}

// ============================================================================
// config tests
// ============================================================================

#[test]
fn test_config_show_defaults() {
	redirects_cmd()
		.arg("config")
		.assert()
		.success()
		.stdout(predicate::str::contains("strict-paths = true"))
		.stdout(predicate::str::contains("ignore-unknown-options = false"));
}

#[test]
fn test_config_file_relaxes_parser() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config = write_file(
		&temp_dir,
		"redirects.toml",
		"strict-paths = false\nignore-unknown-options = true\n",
	);

	redirects_cmd()
		.arg("--config")
		.arg(&config)
		.arg("check")
		.write_stdin("home index.html 302 foo=bar\n")
		.assert()
		.success()
		.stdout(predicate::str::contains("1 rules are valid"));
}

#[test]
fn test_strict_paths_by_default() {
	redirects_cmd()
		.arg("check")
		.write_stdin("home index.html\n")
		.assert()
		.failure()
		.stderr(predicate::str::contains("path must start with"));
}

#[test]
fn test_invalid_config_file() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config = write_file(&temp_dir, "redirects.toml", "strict-paths = [");

	redirects_cmd()
		.arg("--config")
		.arg(&config)
		.arg("config")
		.assert()
		.failure()
		.stderr(predicate::str::contains("Failed to load configuration"));
}
