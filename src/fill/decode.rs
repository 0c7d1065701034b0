use std::collections::{BTreeMap, HashMap};
use std::sync::mpsc;

use chrono::{DateTime, FixedOffset, Utc};
use serde::de::DeserializeOwned;

use crate::fill::duration::format_duration;
use crate::fill::{Cause, Kind, ParseError, ParseReason, RecordSemantic, Value};

/// A field type the coercion engine can produce.
///
/// `kind` classifies the type statically; `from_value` converts the value tree
/// built for that kind into the concrete type.
pub trait Decode: Sized {
	/// Static kind classification of this type.
	fn kind() -> Kind;

	/// Convert a value built for [`Decode::kind`] into `Self`.
	fn from_value(value: Value) -> Result<Self, Cause>;
}

/// Settable storage location of a known kind inside a record.
pub trait Slot {
	/// Kind of the stored type.
	fn kind(&self) -> Kind;

	/// Replace the stored value.
	fn set(&mut self, value: Value) -> Result<(), Cause>;
}

impl<T: Decode> Slot for T {
	fn kind(&self) -> Kind {
		T::kind()
	}

	fn set(&mut self, value: Value) -> Result<(), Cause> {
		*self = T::from_value(value)?;
		Ok(())
	}
}

/// Deserialize a JSON value into a serde type; used by [`crate::json_decode!`].
pub fn from_json_value<T: DeserializeOwned>(value: Value) -> Result<T, Cause> {
	match value {
		Value::Json(json) => Ok(serde_json::from_value(json)?),
		other => Err(mismatch("json", &other)),
	}
}

fn mismatch(expected: &'static str, got: &Value) -> Cause {
	Cause::Mismatch {
		expected,
		got: got.kind_name(),
	}
}

impl Decode for String {
	fn kind() -> Kind {
		Kind::String
	}

	fn from_value(value: Value) -> Result<Self, Cause> {
		match value {
			Value::String(text) => Ok(text.into_string()),
			other => Err(mismatch("string", &other)),
		}
	}
}

macro_rules! decode_signed {
	($($ty:ty),+) => {
		$(
			impl Decode for $ty {
				fn kind() -> Kind {
					Kind::signed(<$ty>::BITS)
				}

				fn from_value(value: Value) -> Result<Self, Cause> {
					match value {
						Value::I64(number) => <$ty>::try_from(number)
							.map_err(|_| Cause::Parse(ParseError::new(stringify!($ty), &number.to_string(), ParseReason::Range))),
						other => Err(mismatch("i64", &other)),
					}
				}
			}
		)+
	};
}

macro_rules! decode_unsigned {
	($($ty:ty),+) => {
		$(
			impl Decode for $ty {
				fn kind() -> Kind {
					Kind::unsigned(<$ty>::BITS)
				}

				fn from_value(value: Value) -> Result<Self, Cause> {
					match value {
						Value::U64(number) => <$ty>::try_from(number)
							.map_err(|_| Cause::Parse(ParseError::new(stringify!($ty), &number.to_string(), ParseReason::Range))),
						other => Err(mismatch("u64", &other)),
					}
				}
			}
		)+
	};
}

decode_signed!(i8, i16, i32, i64, isize);
decode_unsigned!(u8, u16, u32, u64, usize);

impl Decode for bool {
	fn kind() -> Kind {
		Kind::Bool
	}

	fn from_value(value: Value) -> Result<Self, Cause> {
		match value {
			Value::Bool(flag) => Ok(flag),
			other => Err(mismatch("bool", &other)),
		}
	}
}

impl Decode for f32 {
	fn kind() -> Kind {
		Kind::Float32
	}

	fn from_value(value: Value) -> Result<Self, Cause> {
		match value {
			Value::F32(number) => Ok(number),
			other => Err(mismatch("f32", &other)),
		}
	}
}

impl Decode for f64 {
	fn kind() -> Kind {
		Kind::Float64
	}

	fn from_value(value: Value) -> Result<Self, Cause> {
		match value {
			Value::F64(number) => Ok(number),
			other => Err(mismatch("f64", &other)),
		}
	}
}

impl Decode for std::time::Duration {
	fn kind() -> Kind {
		Kind::duration()
	}

	fn from_value(value: Value) -> Result<Self, Cause> {
		match value {
			Value::Duration(nanos) => u64::try_from(nanos)
				.map(Self::from_nanos)
				.map_err(|_| Cause::Parse(ParseError::new("std::time::Duration", &format_duration(nanos), ParseReason::Range))),
			other => Err(mismatch("duration", &other)),
		}
	}
}

impl Decode for chrono::Duration {
	fn kind() -> Kind {
		Kind::duration()
	}

	fn from_value(value: Value) -> Result<Self, Cause> {
		match value {
			Value::Duration(nanos) => Ok(Self::nanoseconds(nanos)),
			other => Err(mismatch("duration", &other)),
		}
	}
}

impl Decode for DateTime<FixedOffset> {
	fn kind() -> Kind {
		Kind::Record(RecordSemantic::Timestamp)
	}

	fn from_value(value: Value) -> Result<Self, Cause> {
		match value {
			Value::Timestamp(stamp) => Ok(stamp),
			other => Err(mismatch("timestamp", &other)),
		}
	}
}

impl Decode for DateTime<Utc> {
	fn kind() -> Kind {
		Kind::Record(RecordSemantic::Timestamp)
	}

	fn from_value(value: Value) -> Result<Self, Cause> {
		DateTime::<FixedOffset>::from_value(value).map(|stamp| stamp.with_timezone(&Utc))
	}
}

impl Decode for serde_json::Value {
	fn kind() -> Kind {
		Kind::Record(RecordSemantic::Json)
	}

	fn from_value(value: Value) -> Result<Self, Cause> {
		match value {
			Value::Json(json) => Ok(json),
			other => Err(mismatch("json", &other)),
		}
	}
}

impl<T: Decode> Decode for Vec<T> {
	fn kind() -> Kind {
		Kind::Sequence(Box::new(T::kind()))
	}

	fn from_value(value: Value) -> Result<Self, Cause> {
		match value {
			Value::Array(items) => items.into_iter().map(T::from_value).collect(),
			other => Err(mismatch("array", &other)),
		}
	}
}

impl<T: Decode> Decode for Option<T> {
	fn kind() -> Kind {
		Kind::Pointer(Box::new(T::kind()))
	}

	fn from_value(value: Value) -> Result<Self, Cause> {
		match value {
			Value::Pointer(inner) => T::from_value(*inner).map(Some),
			other => Err(mismatch("pointer", &other)),
		}
	}
}

impl<T: Decode> Decode for Box<T> {
	fn kind() -> Kind {
		Kind::Pointer(Box::new(T::kind()))
	}

	fn from_value(value: Value) -> Result<Self, Cause> {
		match value {
			Value::Pointer(inner) => T::from_value(*inner).map(Box::new),
			other => Err(mismatch("pointer", &other)),
		}
	}
}

macro_rules! decode_unsupported {
	($name:literal => $([$($param:ident),+] $ty:ty),+) => {
		$(
			impl<$($param),+> Decode for $ty {
				fn kind() -> Kind {
					Kind::Unsupported($name)
				}

				fn from_value(_: Value) -> Result<Self, Cause> {
					Err(Cause::UnsupportedKind { kind: $name })
				}
			}
		)+
	};
}

decode_unsupported!("map" => [K, V] HashMap<K, V>, [K, V] BTreeMap<K, V>);
decode_unsupported!("chan" => [T] mpsc::Sender<T>, [T] mpsc::Receiver<T>);
