use std::slice;

use chrono::DateTime;

use crate::fill::duration::parse_duration;
use crate::fill::kind::{signed_name, unsigned_name};
use crate::fill::{Cause, IntSemantic, Kind, ParseError, ParseReason, RecordSemantic, Slot, Value};

/// Decode `tokens` for the slot's kind and write the result through the slot.
///
/// The slot is written once, after the whole value has been built; on failure
/// it is left untouched.
pub fn coerce(slot: &mut dyn Slot, tokens: &[String]) -> Result<(), Cause> {
	let value = coerce_value(&slot.kind(), tokens)?;
	slot.set(value)
}

/// Decode `tokens` into a value tree shaped by `kind`.
pub fn coerce_value(kind: &Kind, tokens: &[String]) -> Result<Value, Cause> {
	let Some(first) = tokens.first() else {
		return Err(Cause::NoTokens);
	};

	match kind {
		Kind::Pointer(inner) => Ok(Value::Pointer(Box::new(coerce_value(inner, tokens)?))),
		Kind::Sequence(elem) if kind.is_byte_sequence() => coerce_bytes(elem, first),
		Kind::Sequence(elem) => coerce_sequence(elem, tokens),
		Kind::String => Ok(Value::String(first.as_str().into())),
		Kind::SignedInt {
			semantic: IntSemantic::Duration,
			..
		} => Ok(Value::Duration(parse_duration(first)?)),
		Kind::SignedInt { bits, .. } => Ok(Value::I64(parse_signed(first, *bits)?)),
		Kind::UnsignedInt { bits } => Ok(Value::U64(parse_unsigned(first, *bits)?)),
		Kind::Bool => Ok(Value::Bool(parse_bool(first)?)),
		Kind::Float32 => Ok(Value::F32(parse_f32(first)?)),
		Kind::Float64 => Ok(Value::F64(parse_f64(first)?)),
		Kind::Record(RecordSemantic::Timestamp) => DateTime::parse_from_rfc3339(first)
			.map(Value::Timestamp)
			.map_err(|err| Cause::Parse(ParseError::new("timestamp", first, ParseReason::Timestamp(err)))),
		Kind::Record(RecordSemantic::Json) => Ok(Value::Json(serde_json::from_str(first)?)),
		Kind::Unsupported(name) => Err(Cause::UnsupportedKind { kind: *name }),
	}
}

fn coerce_sequence(elem: &Kind, tokens: &[String]) -> Result<Value, Cause> {
	let mut items = Vec::with_capacity(tokens.len());
	for token in tokens {
		items.push(coerce_value(elem, slice::from_ref(token))?);
	}
	Ok(Value::Array(items))
}

/// Each octet of `raw` goes through the element's numeric path as a decimal token.
fn coerce_bytes(elem: &Kind, raw: &str) -> Result<Value, Cause> {
	let tokens: Vec<String> = raw.bytes().map(|byte| byte.to_string()).collect();
	coerce_sequence(elem, &tokens)
}

fn parse_signed(token: &str, bits: u32) -> Result<i64, ParseError> {
	let target = signed_name(bits);
	let value = token.parse::<i64>().map_err(|err| int_error(target, token, err))?;
	if bits < 64 {
		let max = (1_i64 << (bits - 1)) - 1;
		let min = -max - 1;
		if !(min..=max).contains(&value) {
			return Err(ParseError::new(target, token, ParseReason::Range));
		}
	}
	Ok(value)
}

fn parse_unsigned(token: &str, bits: u32) -> Result<u64, ParseError> {
	let target = unsigned_name(bits);
	if token.starts_with('+') {
		return Err(ParseError::new(target, token, ParseReason::Syntax));
	}
	let value = token.parse::<u64>().map_err(|err| int_error(target, token, err))?;
	if bits < 64 && value > (1_u64 << bits) - 1 {
		return Err(ParseError::new(target, token, ParseReason::Range));
	}
	Ok(value)
}

fn int_error(target: &'static str, token: &str, err: std::num::ParseIntError) -> ParseError {
	use std::num::IntErrorKind;

	let reason = match err.kind() {
		IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ParseReason::Range,
		_ => ParseReason::Syntax,
	};
	ParseError::new(target, token, reason)
}

fn parse_bool(token: &str) -> Result<bool, ParseError> {
	match token {
		"1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
		"0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
		_ => Err(ParseError::new("bool", token, ParseReason::Syntax)),
	}
}

fn parse_f32(token: &str) -> Result<f32, ParseError> {
	let value = token.parse::<f32>().map_err(|_| ParseError::new("f32", token, ParseReason::Syntax))?;
	if value.is_infinite() && !is_infinity_literal(token) {
		return Err(ParseError::new("f32", token, ParseReason::Range));
	}
	Ok(value)
}

fn parse_f64(token: &str) -> Result<f64, ParseError> {
	let value = token.parse::<f64>().map_err(|_| ParseError::new("f64", token, ParseReason::Syntax))?;
	if value.is_infinite() && !is_infinity_literal(token) {
		return Err(ParseError::new("f64", token, ParseReason::Range));
	}
	Ok(value)
}

fn is_infinity_literal(token: &str) -> bool {
	let unsigned = token.trim_start_matches(['+', '-']);
	unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}
