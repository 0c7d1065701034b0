use super::{DynamicRecord, Schema};
use crate::fill::{HandoverError, Kind, Source, Value, fill, inspect};

const SERVICE: &str = r#"{
	"name": "Service",
	"fields": [
		{ "name": "port", "kind": "u16", "tags": { "env": "PORT", "set": "port" } },
		{ "name": "hosts", "kind": "Vec<string>", "tags": { "set": "host" } },
		{ "name": "timeout", "kind": "Option<duration>", "tags": { "set": "timeout" } },
		{ "name": "note", "kind": "string" }
	]
}"#;

#[test]
fn schema_builds_descriptors_in_order() {
	let schema = Schema::from_json(SERVICE).expect("schema parses");
	let record = DynamicRecord::new(&schema).expect("record builds");
	let fields = inspect(Some(&record)).expect("inspection succeeds");

	let names: Vec<_> = fields.iter().map(|field| field.name.as_ref()).collect();
	assert_eq!(names, ["port", "hosts", "timeout", "note"]);
	assert_eq!(fields[0].kind, Kind::unsigned(16));
	assert_eq!(fields[0].tags.lookup("env"), Some("PORT"));
	assert_eq!(fields[0].tags.lookup("set"), Some("port"));
	assert_eq!(fields[2].kind, Kind::Pointer(Box::new(Kind::duration())));
	assert!(fields[3].tags.is_empty());
}

#[test]
fn filled_values_render_as_json() {
	let schema = Schema::from_json(SERVICE).expect("schema parses");
	let mut record = DynamicRecord::new(&schema).expect("record builds");
	let sources = [Source::table(
		"set",
		[
			("port", vec!["8080".to_owned()]),
			("host", vec!["a".to_owned(), "b".to_owned()]),
			("timeout", vec!["90s".to_owned()]),
		],
	)];

	fill(Some(&mut record), &sources).expect("fill succeeds");

	assert_eq!(record.get("port"), Some(&Value::U64(8080)));
	assert_eq!(
		record.to_json(),
		serde_json::json!({
			"port": 8080,
			"hosts": ["a", "b"],
			"timeout": "1m30s",
			"note": null
		})
	);
}

#[test]
fn unknown_kind_expression_is_rejected() {
	let schema = Schema::from_json(r#"{ "name": "Bad", "fields": [ { "name": "x", "kind": "complex" } ] }"#).expect("schema parses");
	let err = DynamicRecord::new(&schema).expect_err("kind is unknown");
	assert!(matches!(err, HandoverError::InvalidKind { ref expr } if expr == "complex"));
}

#[test]
fn unknown_schema_keys_are_rejected() {
	let err = Schema::from_json(r#"{ "name": "Bad", "fields": [], "extra": 1 }"#).expect_err("extra key");
	assert!(matches!(err, HandoverError::Schema(_)));
}
