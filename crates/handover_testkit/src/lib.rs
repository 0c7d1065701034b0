//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Run `bin` with `args` and extra environment `envs`, clearing `HANDOVER_LOG`.
pub fn run(bin: &str, args: &[&str], envs: &[(&str, &str)]) -> Output {
	Command::new(bin)
		.args(args)
		.env_remove("HANDOVER_LOG")
		.envs(envs.iter().copied())
		.output()
		.unwrap_or_else(|err| panic!("failed to execute {bin}: {err}"))
}

/// Run `bin`, assert success, and parse stdout as JSON.
pub fn run_json(bin: &str, args: &[&str], envs: &[(&str, &str)]) -> serde_json::Value {
	let output = run(bin, args, envs);
	assert!(
		output.status.success(),
		"command should succeed, stderr: {}",
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}
