use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, HandoverError>;

/// Boxed error returned by source resolvers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced while inspecting, filling, and describing records.
#[derive(Debug, Error)]
pub enum HandoverError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Fill target was absent.
	#[error("target is nil")]
	InvalidInput,
	/// A field could not be resolved or decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Schema document could not be parsed.
	#[error("schema: {0}")]
	Schema(#[from] serde_json::Error),
	/// Kind expression in a schema is not recognized.
	#[error("invalid kind expression: {expr}")]
	InvalidKind {
		/// Kind expression as written.
		expr: String,
	},
	/// Flag arguments given to an argument source could not be parsed.
	#[error("arguments: {0}")]
	Args(#[from] clap::Error),
	/// CLI assignment argument was not `KEY=VALUE`.
	#[error("invalid assignment {arg:?} (expected KEY=VALUE)")]
	InvalidAssignment {
		/// User-provided argument.
		arg: String,
	},
}

impl HandoverError {
	/// Borrow the structured field diagnostics when this is a decode failure.
	pub fn as_decode(&self) -> Option<&DecodeError> {
		match self {
			Self::Decode(err) => Some(err),
			_ => None,
		}
	}

	/// Take the structured field diagnostics when this is a decode failure.
	pub fn into_decode(self) -> Option<DecodeError> {
		match self {
			Self::Decode(err) => Some(err),
			_ => None,
		}
	}
}

/// Failure to set one field from one source.
#[derive(Debug, Error)]
#[error("failed to set field {field:?} from source {source_tag:?}: {cause}")]
pub struct DecodeError {
	/// Tag value the source was asked to resolve.
	pub field: String,
	/// Tag key of the source that supplied the tokens.
	pub source_tag: String,
	/// Offending raw token, or all tokens when no single one is to blame.
	pub value: String,
	/// Underlying failure.
	#[source]
	pub cause: Cause,
}

impl DecodeError {
	pub(crate) fn new(field: &str, source_tag: &str, tokens: &[String], cause: Cause) -> Self {
		let value = match &cause {
			Cause::Parse(err) => err.value.clone(),
			_ => render_tokens(tokens),
		};

		Self {
			field: field.to_owned(),
			source_tag: source_tag.to_owned(),
			value,
			cause,
		}
	}
}

fn render_tokens(tokens: &[String]) -> String {
	match tokens {
		[] => String::new(),
		[single] => single.clone(),
		many => format!("[{}]", many.join(" ")),
	}
}

/// Reason a field value could not be produced.
#[derive(Debug, Error)]
pub enum Cause {
	/// Field type falls outside the supported kind set.
	#[error("unsupported property kind {kind:?}")]
	UnsupportedKind {
		/// Name of the unsupported kind.
		kind: &'static str,
	},
	/// Token text is malformed for the destination kind.
	#[error(transparent)]
	Parse(#[from] ParseError),
	/// The source's resolver failed.
	#[error("{0}")]
	Resolution(#[source] BoxError),
	/// Nested JSON payload could not be deserialized.
	#[error(transparent)]
	Deserialization(#[from] serde_json::Error),
	/// Decoded value shape does not match the destination slot.
	#[error("value mismatch: expected {expected}, got {got}")]
	Mismatch {
		/// Value shape the slot accepts.
		expected: &'static str,
		/// Value shape that was produced.
		got: &'static str,
	},
	/// Coercion was invoked without any token.
	#[error("no tokens to decode")]
	NoTokens,
}

/// Malformed textual representation for a target kind.
#[derive(Debug, Error)]
#[error("parsing {value:?} as {target}: {reason}")]
pub struct ParseError {
	/// Destination type name.
	pub target: &'static str,
	/// Offending token.
	pub value: String,
	/// What was wrong with the token.
	#[source]
	pub reason: ParseReason,
}

impl ParseError {
	pub(crate) fn new(target: &'static str, value: &str, reason: ParseReason) -> Self {
		Self {
			target,
			value: value.to_owned(),
			reason,
		}
	}
}

/// Detailed parse failure classification.
#[derive(Debug, Error)]
pub enum ParseReason {
	/// Token does not follow the expected grammar.
	#[error("invalid syntax")]
	Syntax,
	/// Token is well-formed but does not fit the destination.
	#[error("value out of range")]
	Range,
	/// Duration component has no unit suffix.
	#[error("missing unit in duration")]
	MissingUnit,
	/// Duration component uses an unknown unit suffix.
	#[error("unknown unit {unit:?} in duration")]
	UnknownUnit {
		/// Offending unit text.
		unit: String,
	},
	/// RFC 3339 timestamp parse failure.
	#[error("{0}")]
	Timestamp(#[from] chrono::ParseError),
}
