use std::path::PathBuf;

use handover::fill::{DynamicRecord, Result, Schema, Source, Sources};

use crate::cmd::util::parse_assignments;

/// Tag key answered by `--set` assignments.
const SET_TAG: &str = "set";

/// Fill the schema at `path` from the environment (when enabled) and then from `--set` assignments.
pub fn run(path: PathBuf, use_env: bool, assignments: Vec<String>, json: bool) -> Result<()> {
	let schema = Schema::open(&path)?;
	let mut record = DynamicRecord::new(&schema)?;

	let mut sources = Sources::new();
	if use_env {
		sources.push(Source::env());
	}
	sources.push(Source::table(SET_TAG, parse_assignments(&assignments)?));
	sources.fill(&mut record)?;

	if json {
		println!("{:#}", record.to_json());
		return Ok(());
	}

	println!("record: {}", schema.name);
	for field in record.fields() {
		match &field.value {
			Some(value) => println!("  {} = {}", field.name, value.to_json()),
			None => println!("  {} = (unset)", field.name),
		}
	}

	Ok(())
}
