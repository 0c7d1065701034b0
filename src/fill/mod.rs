mod coerce;
mod decode;
mod duration;
mod dynamic;
mod error;
mod inspect;
mod kind;
mod orchestrate;
mod source;
mod tag;
mod value;

/// Type-directed token coercion entry points.
pub use coerce::{coerce, coerce_value};
/// Field type classification and write-handle traits.
pub use decode::{Decode, Slot, from_json_value};
/// Duration literal parsing and formatting.
pub use duration::{format_duration, parse_duration};
/// Runtime-described records and their schema.
pub use dynamic::{DynamicField, DynamicRecord, Schema, SchemaField};
/// Error and result aliases.
pub use error::{BoxError, Cause, DecodeError, HandoverError, ParseError, ParseReason, Result};
/// Record description and field inspection.
pub use inspect::{FieldDecl, FieldDescriptor, Record, inspect};
/// Kind classification.
pub use kind::{IntSemantic, Kind, RecordSemantic};
/// Source orchestration entry point.
pub use orchestrate::fill;
/// Token sources.
pub use source::{Source, Sources};
/// Field tag metadata.
pub use tag::Tags;
/// Decoded runtime value.
pub use value::Value;

/// Implement [`Decode`] for serde types decoded from a JSON token.
///
/// ```
/// #[derive(serde::Deserialize)]
/// struct Database {
/// 	url: String,
/// }
///
/// handover::json_decode!(Database);
/// ```
#[macro_export]
macro_rules! json_decode {
	($($ty:ty),+ $(,)?) => {
		$(
			impl $crate::fill::Decode for $ty {
				fn kind() -> $crate::fill::Kind {
					$crate::fill::Kind::Record($crate::fill::RecordSemantic::Json)
				}

				fn from_value(value: $crate::fill::Value) -> ::std::result::Result<Self, $crate::fill::Cause> {
					$crate::fill::from_json_value(value)
				}
			}
		)+
	};
}
