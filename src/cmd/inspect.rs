use std::path::PathBuf;

use handover::fill::{DynamicRecord, Result, Schema, inspect};

use crate::cmd::util::render_tags;

/// Print the descriptor table of the schema at `path`.
pub fn run(path: PathBuf, json: bool) -> Result<()> {
	let schema = Schema::open(&path)?;
	let record = DynamicRecord::new(&schema)?;
	let fields = inspect(Some(&record))?;

	if json {
		let rows: Vec<serde_json::Value> = fields
			.iter()
			.map(|field| {
				let tags: serde_json::Map<String, serde_json::Value> = field
					.tags
					.iter()
					.map(|(key, value)| (key.to_owned(), serde_json::Value::String(value.to_owned())))
					.collect();
				serde_json::json!({
					"name": field.name.as_ref(),
					"index": field.index,
					"kind": field.kind.to_string(),
					"tags": tags,
				})
			})
			.collect();
		let out = serde_json::json!({
			"path": path.display().to_string(),
			"record": schema.name,
			"fields": rows,
		});
		println!("{out:#}");
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("record: {}", schema.name);
	println!("field_count: {}", fields.len());
	for field in &fields {
		println!("  [{}] {}: {} {}", field.index, field.name, field.kind, render_tags(&field.tags));
	}

	Ok(())
}
