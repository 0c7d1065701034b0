use std::fmt;

use crate::fill::{HandoverError, Result};

/// Closed classification of a field's type, driving coercion dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
	/// Optional or boxed indirection to the inner kind.
	Pointer(Box<Kind>),
	/// Ordered collection of the element kind.
	Sequence(Box<Kind>),
	/// UTF-8 text.
	String,
	/// Signed integer of `bits` width.
	SignedInt {
		/// Destination width in bits.
		bits: u32,
		/// Plain integer or nanosecond duration.
		semantic: IntSemantic,
	},
	/// Unsigned integer of `bits` width.
	UnsignedInt {
		/// Destination width in bits.
		bits: u32,
	},
	/// Boolean.
	Bool,
	/// Single-precision float.
	Float32,
	/// Double-precision float.
	Float64,
	/// Nested structured value.
	Record(RecordSemantic),
	/// Type outside the supported set, named for diagnostics.
	Unsupported(&'static str),
}

/// Interpretation of a signed-integer destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntSemantic {
	/// Base-10 integer literal.
	Plain,
	/// Duration literal stored as nanoseconds.
	Duration,
}

/// Interpretation of a record destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSemantic {
	/// RFC 3339 timestamp.
	Timestamp,
	/// JSON payload deserialized into the destination type.
	Json,
}

impl Kind {
	/// Plain signed integer of the given width.
	pub const fn signed(bits: u32) -> Self {
		Self::SignedInt {
			bits,
			semantic: IntSemantic::Plain,
		}
	}

	/// Nanosecond duration.
	pub const fn duration() -> Self {
		Self::SignedInt {
			bits: 64,
			semantic: IntSemantic::Duration,
		}
	}

	/// Unsigned integer of the given width.
	pub const fn unsigned(bits: u32) -> Self {
		Self::UnsignedInt { bits }
	}

	/// Short kind label used in diagnostics.
	pub fn name(&self) -> &'static str {
		match self {
			Self::Pointer(_) => "ptr",
			Self::Sequence(_) => "slice",
			Self::String => "string",
			Self::SignedInt {
				semantic: IntSemantic::Duration,
				..
			} => "duration",
			Self::SignedInt { bits, .. } => signed_name(*bits),
			Self::UnsignedInt { bits } => unsigned_name(*bits),
			Self::Bool => "bool",
			Self::Float32 => "f32",
			Self::Float64 => "f64",
			Self::Record(RecordSemantic::Timestamp) => "timestamp",
			Self::Record(RecordSemantic::Json) => "json",
			Self::Unsupported(name) => *name,
		}
	}

	/// True for `Sequence(UnsignedInt { bits: 8 })`, decoded as an octet string.
	pub fn is_byte_sequence(&self) -> bool {
		matches!(self, Self::Sequence(elem) if **elem == Self::UnsignedInt { bits: 8 })
	}

	/// Parse a textual kind expression such as `Vec<Option<u16>>`.
	pub fn parse(expr: &str) -> Result<Self> {
		let invalid = || HandoverError::InvalidKind { expr: expr.to_owned() };
		let trimmed = expr.trim();

		for (wrapper, make) in WRAPPERS {
			if let Some(inner) = trimmed.strip_prefix(wrapper).and_then(|rest| rest.strip_suffix('>')) {
				let inner = Self::parse(inner).map_err(|_| invalid())?;
				return Ok(make(Box::new(inner)));
			}
		}

		let kind = match trimmed {
			"string" | "String" => Self::String,
			"bool" => Self::Bool,
			"i8" => Self::signed(8),
			"i16" => Self::signed(16),
			"i32" => Self::signed(32),
			"i64" => Self::signed(64),
			"isize" => Self::signed(usize::BITS),
			"u8" => Self::unsigned(8),
			"u16" => Self::unsigned(16),
			"u32" => Self::unsigned(32),
			"u64" => Self::unsigned(64),
			"usize" => Self::unsigned(usize::BITS),
			"f32" => Self::Float32,
			"f64" => Self::Float64,
			"duration" => Self::duration(),
			"timestamp" => Self::Record(RecordSemantic::Timestamp),
			"json" => Self::Record(RecordSemantic::Json),
			_ => return Err(invalid()),
		};
		Ok(kind)
	}
}

type KindWrapper = fn(Box<Kind>) -> Kind;

const WRAPPERS: [(&str, KindWrapper); 3] = [("Vec<", Kind::Sequence), ("Option<", Kind::Pointer), ("Box<", Kind::Pointer)];

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Pointer(inner) => write!(f, "Option<{inner}>"),
			Self::Sequence(elem) => write!(f, "Vec<{elem}>"),
			other => f.write_str(other.name()),
		}
	}
}

pub(crate) fn signed_name(bits: u32) -> &'static str {
	match bits {
		8 => "i8",
		16 => "i16",
		32 => "i32",
		_ => "i64",
	}
}

pub(crate) fn unsigned_name(bits: u32) -> &'static str {
	match bits {
		8 => "u8",
		16 => "u16",
		32 => "u32",
		_ => "u64",
	}
}
