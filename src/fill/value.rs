use chrono::{DateTime, FixedOffset};

use crate::fill::duration::format_duration;

/// Typed value produced by coercion, before it is written into a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Bool(bool),
	/// Any signed integer width.
	I64(i64),
	/// Any unsigned integer width.
	U64(u64),
	F32(f32),
	F64(f64),
	String(Box<str>),
	/// Signed nanoseconds.
	Duration(i64),
	Timestamp(DateTime<FixedOffset>),
	Json(serde_json::Value),
	Array(Vec<Value>),
	/// Freshly allocated pointee.
	Pointer(Box<Value>),
}

impl Value {
	/// Shape label used in mismatch diagnostics.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Bool(_) => "bool",
			Self::I64(_) => "i64",
			Self::U64(_) => "u64",
			Self::F32(_) => "f32",
			Self::F64(_) => "f64",
			Self::String(_) => "string",
			Self::Duration(_) => "duration",
			Self::Timestamp(_) => "timestamp",
			Self::Json(_) => "json",
			Self::Array(_) => "array",
			Self::Pointer(_) => "pointer",
		}
	}

	/// Render as JSON; durations use their literal form and timestamps RFC 3339.
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			Self::Bool(v) => serde_json::Value::Bool(*v),
			Self::I64(v) => serde_json::Value::from(*v),
			Self::U64(v) => serde_json::Value::from(*v),
			Self::F32(v) => float_json(f64::from(*v)),
			Self::F64(v) => float_json(*v),
			Self::String(v) => serde_json::Value::String(v.to_string()),
			Self::Duration(nanos) => serde_json::Value::String(format_duration(*nanos)),
			Self::Timestamp(v) => serde_json::Value::String(v.to_rfc3339()),
			Self::Json(v) => v.clone(),
			Self::Array(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
			Self::Pointer(inner) => inner.to_json(),
		}
	}
}

fn float_json(value: f64) -> serde_json::Value {
	serde_json::Number::from_f64(value).map_or(serde_json::Value::Null, serde_json::Value::Number)
}
