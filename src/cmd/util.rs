use handover::fill::{HandoverError, Result, Tags};

/// Group `KEY=VALUE` arguments by key, keeping first-seen key order and value order.
pub(crate) fn parse_assignments(args: &[String]) -> Result<Vec<(String, Vec<String>)>> {
	let mut grouped: Vec<(String, Vec<String>)> = Vec::new();

	for arg in args {
		let Some((key, value)) = arg.split_once('=').filter(|(key, _)| !key.is_empty()) else {
			return Err(HandoverError::InvalidAssignment { arg: arg.clone() });
		};

		match grouped.iter_mut().find(|(name, _)| name == key) {
			Some((_, values)) => values.push(value.to_owned()),
			None => grouped.push((key.to_owned(), vec![value.to_owned()])),
		}
	}

	Ok(grouped)
}

/// Render tags as `key:"value"` pairs.
pub(crate) fn render_tags(tags: &Tags) -> String {
	tags.iter().map(|(key, value)| format!("{key}:{value:?}")).collect::<Vec<_>>().join(" ")
}
