use tracing::{debug, trace};

use crate::fill::{Cause, DecodeError, HandoverError, Record, Result, Source, coerce, inspect};

/// Fill `target` field by field from `sources`, in source order.
///
/// For every field, each source whose tag key appears in the field's tags is
/// consulted; a field carrying several matching tags is written by each of
/// them and the last applicable source wins. The first resolver or coercion
/// failure aborts the whole fill and leaves earlier fields as written.
pub fn fill(target: Option<&mut dyn Record>, sources: &[Source]) -> Result<()> {
	let target = target.ok_or(HandoverError::InvalidInput)?;
	if sources.is_empty() {
		return Ok(());
	}

	let fields = inspect(Some(&*target))?;
	let type_name = target.type_name().to_owned();

	for field in &fields {
		for source in sources {
			let Some(tag_value) = field.tags.lookup(source.tag()) else {
				continue;
			};

			let Some(slot) = target.slot(field.index) else {
				debug!(record = %type_name, field = %field.name, source = source.tag(), "field is not writable, skipping");
				continue;
			};

			let tokens = source.resolve(tag_value).map_err(|err| {
				debug!(record = %type_name, field = %field.name, source = source.tag(), error = %err, "source failed to resolve");
				DecodeError::new(tag_value, source.tag(), &[], Cause::Resolution(err))
			})?;

			if tokens.is_empty() {
				debug!(record = %type_name, field = %field.name, source = source.tag(), key = tag_value, "source has no value");
				continue;
			}

			coerce(slot, &tokens).map_err(|cause| {
				debug!(record = %type_name, field = %field.name, source = source.tag(), error = %cause, "value rejected");
				DecodeError::new(tag_value, source.tag(), &tokens, cause)
			})?;
			trace!(record = %type_name, field = %field.name, source = source.tag(), tokens = tokens.len(), "field set");
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::fill;
	use crate::fill::{HandoverError, Record, Slot, Source, Tags};

	crate::record! {
		#[derive(Debug, Default)]
		struct Layered {
			port: u16 => r#"env:"PORT" flag:"port""#,
			name: String => r#"flag:"name""#,
			untouched: String,
		}
	}

	fn fixed(tag: &str, key: &'static str, value: &'static str) -> Source {
		Source::new(tag.to_owned(), move |asked| {
			assert_eq!(asked, key);
			Ok(vec![value.to_owned()])
		})
	}

	#[test]
	fn last_applicable_source_wins() {
		let mut target = Layered::default();
		let sources = [fixed("env", "PORT", "80"), Source::table("flag", [("port", vec!["8080".to_owned()])])];

		fill(Some(&mut target), &sources).expect("fill succeeds");
		assert_eq!(target.port, 8080);
		assert_eq!(target.name, "");
		assert_eq!(target.untouched, "");
	}

	#[test]
	fn earlier_source_applies_when_later_has_no_value() {
		let mut target = Layered::default();
		let sources = [fixed("env", "PORT", "80"), Source::table("flag", Vec::<(String, Vec<String>)>::new())];

		fill(Some(&mut target), &sources).expect("fill succeeds");
		assert_eq!(target.port, 80);
	}

	#[test]
	fn nil_target_is_rejected_even_without_sources() {
		let err = fill(None, &[]).expect_err("nil target");
		assert!(matches!(err, HandoverError::InvalidInput));
		assert_eq!(err.to_string(), "target is nil");
	}

	#[test]
	fn empty_source_list_is_a_no_op() {
		let mut target = Layered {
			port: 1,
			name: "kept".to_owned(),
			untouched: String::new(),
		};
		fill(Some(&mut target), &[]).expect("fill succeeds");
		assert_eq!(target.port, 1);
		assert_eq!(target.name, "kept");
	}

	struct Locked {
		secret: String,
		open: String,
	}

	impl Record for Locked {
		fn type_name(&self) -> &str {
			"Locked"
		}

		fn describe(&self) -> Vec<crate::fill::FieldDecl> {
			vec![
				crate::fill::FieldDecl::new("secret", crate::fill::Kind::String, Tags::parse(r#"env:"SECRET""#)),
				crate::fill::FieldDecl::new("open", crate::fill::Kind::String, Tags::parse(r#"env:"OPEN""#)),
			]
		}

		fn slot(&mut self, index: usize) -> Option<&mut dyn Slot> {
			match index {
				1 => Some(&mut self.open),
				_ => None,
			}
		}
	}

	#[test]
	fn unwritable_fields_are_skipped_without_resolving() {
		let mut target = Locked {
			secret: "sealed".to_owned(),
			open: String::new(),
		};
		let sources = [Source::new("env", |key| {
			assert_ne!(key, "SECRET", "unwritable field must not be resolved");
			Ok(vec![format!("value-of-{key}")])
		})];

		fill(Some(&mut target), &sources).expect("fill succeeds");
		assert_eq!(target.secret, "sealed");
		assert_eq!(target.open, "value-of-OPEN");
	}
}
