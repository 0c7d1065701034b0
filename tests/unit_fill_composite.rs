#![allow(missing_docs)]

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use handover::fill::{Cause, Source, fill, inspect};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct Endpoint {
	host: String,
	port: u16,
}

handover::json_decode!(Endpoint);

handover::record! {
	#[derive(Debug, Default)]
	struct Composite {
		retries: Option<i32> => r#"flag:"retries""#,
		label: Box<String> => r#"flag:"label""#,
		hosts: Vec<String> => r#"flag:"host""#,
		ports: Vec<u16> => r#"flag:"port""#,
		raw: Vec<u8> => r#"flag:"raw""#,
		timeout: Duration => r#"flag:"timeout""#,
		backoff: chrono::Duration => r#"flag:"backoff""#,
		started: Option<DateTime<Utc>> => r#"flag:"started""#,
		endpoint: Endpoint => r#"flag:"endpoint""#,
		extra: serde_json::Value => r#"flag:"extra""#,
	}
}

fn flags(argv: &[&str]) -> Source {
	let keys: Vec<String> = inspect(Some(&Composite::default()))
		.expect("inspect succeeds")
		.iter()
		.filter_map(|field| field.tags.lookup("flag").map(str::to_owned))
		.collect();
	Source::args("flag", keys, argv.iter().copied()).expect("arguments parse")
}

#[test]
fn pointers_are_allocated_and_filled() {
	let mut target = Composite::default();
	fill(Some(&mut target), &[flags(&["--retries=3", "--label", "primary"])]).expect("fill succeeds");

	assert_eq!(target.retries, Some(3));
	assert_eq!(*target.label, "primary");
}

#[test]
fn sequences_take_one_element_per_token() {
	let mut target = Composite::default();
	fill(Some(&mut target), &[flags(&["--host=a", "--host=b", "--port", "80", "--host=c", "--port=443"])]).expect("fill succeeds");

	assert_eq!(target.hosts, ["a", "b", "c"]);
	assert_eq!(target.ports, [80, 443]);
}

#[test]
fn byte_sequence_takes_the_octets_of_the_first_token() {
	let mut target = Composite::default();
	let json = r#"{ "some": "json" }"#;
	let arg = format!("--raw={json}");
	fill(Some(&mut target), &[flags(&[arg.as_str(), "--raw=ignored"])]).expect("fill succeeds");

	assert_eq!(target.raw, json.as_bytes());
}

#[test]
fn durations_and_timestamps_use_their_text_forms() {
	let mut target = Composite::default();
	fill(
		Some(&mut target),
		&[flags(&[
			"--timeout=1m30s",
			"--backoff=-1.5s",
			"--started=2024-05-01T12:30:00+02:00",
		])],
	)
	.expect("fill succeeds");

	assert_eq!(target.timeout, Duration::from_secs(90));
	assert_eq!(target.backoff, chrono::Duration::milliseconds(-1500));
	assert_eq!(target.started, Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).single().expect("valid date")));
}

#[test]
fn nested_records_decode_from_json() {
	let mut target = Composite::default();
	fill(
		Some(&mut target),
		&[flags(&[
			r#"--endpoint={"host":"db.local","port":5432}"#,
			r#"--extra=[1, "two", null]"#,
		])],
	)
	.expect("fill succeeds");

	assert_eq!(
		target.endpoint,
		Endpoint {
			host: "db.local".to_owned(),
			port: 5432,
		}
	);
	assert_eq!(target.extra, serde_json::json!([1, "two", null]));
}

#[test]
fn nested_record_rejects_unknown_json_fields() {
	let mut target = Composite::default();
	let err = fill(
		Some(&mut target),
		&[flags(&[r#"--endpoint={"host":"db.local","port":5432,"tls":true}"#])],
	)
	.expect_err("tls is not a known field");

	let decode = err.as_decode().expect("decode error");
	assert_eq!(decode.field, "endpoint");
	assert!(matches!(decode.cause, Cause::Deserialization(_)));
}

#[test]
fn malformed_json_is_a_decode_error() {
	let mut target = Composite::default();
	let err = fill(Some(&mut target), &[flags(&["--extra={not json"])]).expect_err("json is malformed");

	let decode = err.as_decode().expect("decode error");
	assert_eq!(decode.field, "extra");
	assert_eq!(decode.value, "{not json");
}

#[test]
fn negative_std_duration_is_rejected() {
	let mut target = Composite::default();
	let err = fill(Some(&mut target), &[flags(&["--timeout=-1s"])]).expect_err("std duration is unsigned");

	assert_eq!(err.as_decode().expect("decode error").field, "timeout");
	assert_eq!(target.timeout, Duration::ZERO);
}
