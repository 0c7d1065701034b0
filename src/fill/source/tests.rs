use super::{Source, Sources};
use crate::fill::HandoverError;

#[test]
fn table_source_returns_tokens_or_nothing() {
	let source = Source::table("cfg", [("hosts", vec!["a".to_owned(), "b".to_owned()])]);
	assert_eq!(source.tag(), "cfg");
	assert_eq!(source.resolve("hosts").expect("resolves"), ["a", "b"]);
	assert!(source.resolve("missing").expect("resolves").is_empty());
}

#[test]
fn args_source_accumulates_repeated_flags() {
	let source = Source::args(
		"flag",
		["host", "port", "verbose", "name"],
		["prog", "--host", "a", "--port=8080", "--host=b", "--verbose", "--name", "x"],
	)
	.expect("arguments parse");

	assert_eq!(source.resolve("host").expect("resolves"), ["a", "b"]);
	assert_eq!(source.resolve("port").expect("resolves"), ["8080"]);
	assert_eq!(source.resolve("verbose").expect("resolves"), ["true"]);
	assert_eq!(source.resolve("name").expect("resolves"), ["x"]);
	assert!(source.resolve("prog").expect("resolves").is_empty());
}

#[test]
fn trailing_bare_flag_is_true() {
	let source = Source::args("flag", ["debug"], ["--debug"]).expect("arguments parse");
	assert_eq!(source.resolve("debug").expect("resolves"), ["true"]);
}

#[test]
fn flags_after_terminator_are_operands() {
	let source = Source::args("flag", ["port"], ["--", "--port", "1"]).expect("arguments parse");
	assert!(source.resolve("port").expect("resolves").is_empty());
}

#[test]
fn equals_form_carries_hyphenated_values() {
	let source = Source::args("flag", ["note", "offset"], ["--note=--literal", "--offset=-5"]).expect("arguments parse");
	assert_eq!(source.resolve("note").expect("resolves"), ["--literal"]);
	assert_eq!(source.resolve("offset").expect("resolves"), ["-5"]);
}

#[test]
fn undeclared_flags_are_rejected() {
	for argv in [["--other", "1"], ["-p", "1"]] {
		let err = Source::args("flag", ["port"], argv).expect_err("flag is not declared");
		assert!(matches!(err, HandoverError::Args(_)));
	}
}

#[test]
fn duplicate_and_malformed_keys_are_dropped() {
	let source = Source::args("flag", ["port", "port", "", "-x", "a b"], ["--port=1"]).expect("arguments parse");
	assert_eq!(source.resolve("port").expect("resolves"), ["1"]);
	assert!(source.resolve("a b").expect("resolves").is_empty());
}

#[test]
fn env_source_treats_unset_as_empty() {
	let source = Source::env();
	assert_eq!(source.tag(), "env");
	assert!(source.resolve("HANDOVER_SOURCE_TEST_SURELY_UNSET").expect("resolves").is_empty());

	let path = source.resolve("PATH").expect("resolves");
	assert_eq!(path.len(), usize::from(std::env::var_os("PATH").is_some()));
}

#[test]
fn custom_resolver_errors_are_returned() {
	let source = Source::new("remote", |_| Err("unreachable".into()));
	let err = source.resolve("key").expect_err("resolver fails");
	assert_eq!(err.to_string(), "unreachable");
}

#[test]
fn sources_keep_insertion_order() {
	let sources = Sources::new().with(Source::env()).with(Source::args("flag", ["port"], Vec::<String>::new()).expect("no arguments parse"));
	let tags: Vec<_> = sources.as_slice().iter().map(Source::tag).collect();
	assert_eq!(tags, ["env", "flag"]);
	assert_eq!(format!("{:?}", sources.as_slice()[0]), "Source { tag: \"env\", .. }");
}
