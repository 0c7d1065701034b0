use std::collections::HashMap;
use std::fmt;

use clap::{Arg, ArgAction, Command};

use crate::fill::BoxError;

type Resolver = dyn Fn(&str) -> Result<Vec<String>, BoxError> + Send + Sync;

/// Named provider of raw tokens for fields tagged with its key.
pub struct Source {
	tag: Box<str>,
	resolve: Box<Resolver>,
}

impl Source {
	/// Source answering lookups for tag key `tag` with `resolve`.
	pub fn new<F>(tag: impl Into<Box<str>>, resolve: F) -> Self
	where
		F: Fn(&str) -> Result<Vec<String>, BoxError> + Send + Sync + 'static,
	{
		Self {
			tag: tag.into(),
			resolve: Box::new(resolve),
		}
	}

	/// Process environment under tag key `env`; unset variables yield no tokens.
	pub fn env() -> Self {
		Self::new("env", |name| match std::env::var(name) {
			Ok(value) => Ok(vec![value]),
			Err(std::env::VarError::NotPresent) => Ok(Vec::new()),
			Err(err) => Err(format!("environment variable {name}: {err}").into()),
		})
	}

	/// Static lookup table; missing keys yield no tokens.
	pub fn table<K, I>(tag: impl Into<Box<str>>, entries: I) -> Self
	where
		K: Into<String>,
		I: IntoIterator<Item = (K, Vec<String>)>,
	{
		let table: HashMap<String, Vec<String>> = entries.into_iter().map(|(key, tokens)| (key.into(), tokens)).collect();
		Self::new(tag, move |key| Ok(table.get(key).cloned().unwrap_or_default()))
	}

	/// Command-line style flags `--key value` / `--key=value` for each of `keys`, parsed with clap.
	///
	/// Repeated flags accumulate tokens in order and a flag given without a
	/// value yields `"true"`. Operands, including everything after `--`, are
	/// ignored. Undeclared flags are rejected. Values starting with `-` must use
	/// the `--key=value` form.
	pub fn args<K, S>(tag: impl Into<Box<str>>, keys: impl IntoIterator<Item = K>, argv: impl IntoIterator<Item = S>) -> crate::fill::Result<Self>
	where
		K: Into<String>,
		S: Into<String>,
	{
		let mut keys: Vec<String> = keys.into_iter().map(Into::into).filter(|key| is_flag_name(key)).collect();
		keys.sort();
		keys.dedup();

		let command = keys.iter().fold(flag_command(), |command, key| {
			command.arg(
				Arg::new(key.clone())
					.long(key.clone())
					.num_args(0..=1)
					.default_missing_value("true")
					.action(ArgAction::Append),
			)
		});
		let matches = command.try_get_matches_from(argv.into_iter().map(Into::<String>::into))?;

		let table: Vec<(String, Vec<String>)> = keys
			.into_iter()
			.map(|key| {
				let tokens = matches.get_many::<String>(&key).map(|values| values.cloned().collect()).unwrap_or_default();
				(key, tokens)
			})
			.collect();
		Ok(Self::table(tag, table))
	}

	/// Tag key this source answers for.
	pub fn tag(&self) -> &str {
		&self.tag
	}

	/// Resolve a tag value into raw tokens.
	pub fn resolve(&self, tag_value: &str) -> Result<Vec<String>, BoxError> {
		(self.resolve)(tag_value)
	}
}

impl fmt::Debug for Source {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Source").field("tag", &self.tag).finish_non_exhaustive()
	}
}

/// Argument id collecting operands; whitespace keeps it apart from flag names.
const OPERANDS: &str = " operands";

fn flag_command() -> Command {
	Command::new("handover-args")
		.no_binary_name(true)
		.disable_help_flag(true)
		.disable_version_flag(true)
		.arg(Arg::new(OPERANDS).num_args(1..).action(ArgAction::Append).hide(true))
}

fn is_flag_name(key: &str) -> bool {
	!key.is_empty() && !key.starts_with('-') && !key.contains(|c: char| c.is_whitespace() || c == '=')
}

/// Ordered list of sources; later applicable sources overwrite earlier ones.
#[derive(Debug, Default)]
pub struct Sources {
	items: Vec<Source>,
}

impl Sources {
	/// Empty source list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a source; it runs after, and so overrides, the ones already listed.
	pub fn with(mut self, source: Source) -> Self {
		self.items.push(source);
		self
	}

	/// Append a source.
	pub fn push(&mut self, source: Source) {
		self.items.push(source);
	}

	/// Sources in application order.
	pub fn as_slice(&self) -> &[Source] {
		&self.items
	}

	/// Fill `target` from these sources.
	pub fn fill(&self, target: &mut dyn crate::fill::Record) -> crate::fill::Result<()> {
		crate::fill::fill(Some(target), &self.items)
	}
}

impl From<Vec<Source>> for Sources {
	fn from(items: Vec<Source>) -> Self {
		Self { items }
	}
}

impl FromIterator<Source> for Sources {
	fn from_iter<I: IntoIterator<Item = Source>>(iter: I) -> Self {
		Self {
			items: iter.into_iter().collect(),
		}
	}
}

#[cfg(test)]
mod tests;
