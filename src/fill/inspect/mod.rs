use crate::fill::{HandoverError, Kind, Result, Slot, Tags};

/// Declared shape of one record field, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
	/// Field identifier.
	pub name: Box<str>,
	/// Static kind classification.
	pub kind: Kind,
	/// Source tag metadata.
	pub tags: Tags,
}

impl FieldDecl {
	/// Declare a field from its name, kind, and tags.
	pub fn new(name: impl Into<Box<str>>, kind: Kind, tags: Tags) -> Self {
		Self {
			name: name.into(),
			kind,
			tags,
		}
	}
}

/// Static metadata needed to address and classify one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
	/// Field identifier.
	pub name: Box<str>,
	/// Zero-based position; addresses [`Record::slot`] for the whole fill.
	pub index: usize,
	/// Static kind classification.
	pub kind: Kind,
	/// All tag pairs declared on the field.
	pub tags: Tags,
}

/// A structured value whose fields can be described and written by index.
///
/// `describe` and `slot` must agree: the `i`-th declaration is stored behind
/// `slot(i)`. Use [`crate::record!`] to generate both from one declaration.
pub trait Record {
	/// Type label used in diagnostics.
	fn type_name(&self) -> &str;

	/// Field declarations in declaration order.
	fn describe(&self) -> Vec<FieldDecl>;

	/// Write handle for the field at `index`, or `None` when it is not writable.
	fn slot(&mut self, index: usize) -> Option<&mut dyn Slot>;
}

/// One level of indirection: a boxed record is read through its box. Only
/// `Box<dyn Record>` gets this impl, so `Box<Box<dyn Record>>` is not a record.
impl Record for Box<dyn Record> {
	fn type_name(&self) -> &str {
		(**self).type_name()
	}

	fn describe(&self) -> Vec<FieldDecl> {
		(**self).describe()
	}

	fn slot(&mut self, index: usize) -> Option<&mut dyn Slot> {
		(**self).slot(index)
	}
}

/// Produce ordered field descriptors for `record`.
pub fn inspect(record: Option<&dyn Record>) -> Result<Vec<FieldDescriptor>> {
	let record = record.ok_or(HandoverError::InvalidInput)?;

	Ok(record
		.describe()
		.into_iter()
		.enumerate()
		.map(|(index, decl)| FieldDescriptor {
			name: decl.name,
			index,
			kind: decl.kind,
			tags: decl.tags,
		})
		.collect())
}

/// Declare a struct together with its [`Record`](crate::fill::Record) implementation.
///
/// Each field may carry tag metadata after `=>`:
///
/// ```
/// handover::record! {
/// 	#[derive(Debug, Default)]
/// 	pub struct Server {
/// 		pub port: u16 => r#"env:"PORT" flag:"port""#,
/// 		pub hosts: Vec<String> => r#"flag:"host""#,
/// 		pub note: String,
/// 	}
/// }
/// ```
#[macro_export]
macro_rules! record {
	(
		$(#[$meta:meta])*
		$vis:vis struct $name:ident {
			$(
				$(#[$field_meta:meta])*
				$field_vis:vis $field:ident : $ty:ty $(=> $tag:literal)?
			),* $(,)?
		}
	) => {
		$(#[$meta])*
		$vis struct $name {
			$(
				$(#[$field_meta])*
				$field_vis $field: $ty,
			)*
		}

		impl $crate::fill::Record for $name {
			fn type_name(&self) -> &str {
				stringify!($name)
			}

			fn describe(&self) -> ::std::vec::Vec<$crate::fill::FieldDecl> {
				::std::vec![
					$(
						$crate::fill::FieldDecl::new(
							stringify!($field),
							<$ty as $crate::fill::Decode>::kind(),
							$crate::fill::Tags::parse($crate::__record_tag!($($tag)?)),
						),
					)*
				]
			}

			#[allow(unused_assignments)]
			fn slot(&mut self, index: usize) -> ::std::option::Option<&mut dyn $crate::fill::Slot> {
				let mut position = 0_usize;
				$(
					if position == index {
						return ::std::option::Option::Some(&mut self.$field);
					}
					position += 1;
				)*
				::std::option::Option::None
			}
		}
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_tag {
	() => {
		""
	};
	($tag:literal) => {
		$tag
	};
}
